use std::sync::Arc;

use log::*;
use reqwest::Client;

use crate::{
    auth::ServiceAccountAuth,
    data_objects::{AppendResponse, ValueRange},
    SheetsApiError,
    SheetsConfig,
};

#[derive(Clone)]
pub struct SheetsApi {
    config: SheetsConfig,
    client: Arc<Client>,
    auth: ServiceAccountAuth,
}

impl SheetsApi {
    pub fn new(config: SheetsConfig) -> Result<Self, SheetsApiError> {
        let client = Client::builder().build().map_err(|e| SheetsApiError::Initialization(e.to_string()))?;
        let client = Arc::new(client);
        let auth = ServiceAccountAuth::new(&config, Arc::clone(&client));
        Ok(Self { config, client, auth })
    }

    /// The `values:append` endpoint for the configured spreadsheet and range.
    pub fn append_url(&self) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}:append?valueInputOption=USER_ENTERED",
            self.config.api_url,
            urlencoding::encode(&self.config.spreadsheet_id),
            urlencoding::encode(&self.config.range)
        )
    }

    /// Appends the given rows after the last row of the table found at the configured range. Values are interpreted
    /// as if typed into the sheet, so numbers and dates are parsed by Sheets.
    pub async fn append_rows(&self, rows: &[Vec<String>]) -> Result<AppendResponse, SheetsApiError> {
        if let Some(missing) = self.config.missing_setting() {
            return Err(SheetsApiError::NotConfigured(format!("The {missing} is missing")));
        }
        let token = self.auth.access_token().await?;
        let url = self.append_url();
        trace!("📄️ Appending {} row(s) to {url}", rows.len());
        let response = self
            .client
            .post(url)
            .bearer_auth(token.reveal())
            .json(&ValueRange { values: rows })
            .send()
            .await
            .map_err(|e| SheetsApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            let result =
                response.json::<AppendResponse>().await.map_err(|e| SheetsApiError::JsonError(e.to_string()))?;
            debug!("📄️ Appended {} row(s) at {}", result.updates.updated_rows, result.updates.updated_range);
            Ok(result)
        } else {
            let status = response.status().as_u16();
            let message =
                response.text().await.map_err(|e| SheetsApiError::RestResponseError(e.to_string()))?;
            Err(SheetsApiError::QueryError { status, message })
        }
    }

    pub async fn append_row(&self, row: Vec<String>) -> Result<AppendResponse, SheetsApiError> {
        self.append_rows(&[row]).await
    }
}
