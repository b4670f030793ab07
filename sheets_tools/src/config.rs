use std::env;

use ldg_common::{
    helpers::{secret_from_env, unescape_newlines},
    Secret,
};
use log::*;

pub const DEFAULT_SHEET_RANGE: &str = "Sheet1!A1";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";

/// Credentials and target for one spreadsheet.
///
/// The site writes to two spreadsheets (registrations and enquiries), each with its own service account, so the
/// environment variables are read under a caller-supplied prefix, e.g. `LDG_REGISTRATIONS_SHEET_CLIENT_EMAIL`.
#[derive(Debug, Clone, Default)]
pub struct SheetsConfig {
    pub client_email: String,
    /// PEM-encoded RSA private key of the service account.
    pub private_key: Secret<String>,
    pub project_id: String,
    pub spreadsheet_id: String,
    /// The A1 range that rows are appended after.
    pub range: String,
    pub token_uri: String,
    pub api_url: String,
}

impl SheetsConfig {
    pub fn new(client_email: &str, private_key: &str, spreadsheet_id: &str) -> Self {
        Self {
            client_email: client_email.to_string(),
            private_key: Secret::new(private_key.to_string()),
            project_id: String::default(),
            spreadsheet_id: spreadsheet_id.to_string(),
            range: DEFAULT_SHEET_RANGE.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            api_url: DEFAULT_SHEETS_API_URL.to_string(),
        }
    }

    pub fn from_env_with_prefix(prefix: &str) -> Self {
        let var = |suffix: &str| env::var(format!("{prefix}_{suffix}")).ok().filter(|s| !s.trim().is_empty());
        let client_email = var("CLIENT_EMAIL").unwrap_or_else(|| {
            warn!("🪛️ {prefix}_CLIENT_EMAIL is not set. Rows for this sheet cannot be saved until it is.");
            String::default()
        });
        let private_key = secret_from_env(&format!("{prefix}_PRIVATE_KEY"))
            .map(|k| Secret::new(unescape_newlines(k.reveal())))
            .unwrap_or_else(|| {
                warn!("🪛️ {prefix}_PRIVATE_KEY is not set. Rows for this sheet cannot be saved until it is.");
                Secret::default()
            });
        let project_id = var("PROJECT_ID").unwrap_or_default();
        let spreadsheet_id = var("SPREADSHEET_ID").unwrap_or_else(|| {
            warn!("🪛️ {prefix}_SPREADSHEET_ID is not set. Rows for this sheet cannot be saved until it is.");
            String::default()
        });
        let range = var("RANGE").unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_string());
        let token_uri = var("TOKEN_URI").unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());
        let api_url = var("API_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SHEETS_API_URL.to_string());
        Self { client_email, private_key, project_id, spreadsheet_id, range, token_uri, api_url }
    }

    /// The name of the first missing setting, if any.
    pub fn missing_setting(&self) -> Option<&'static str> {
        if self.client_email.trim().is_empty() {
            Some("client email")
        } else if self.private_key.is_empty() {
            Some("private key")
        } else if self.spreadsheet_id.trim().is_empty() {
            Some("spreadsheet id")
        } else {
            None
        }
    }
}
