use std::{env, path::PathBuf};

use ldg_common::{
    helpers::{env_or_default, parse_boolean_flag, secret_from_env},
    Secret,
};
use log::*;
use razorpay_tools::RazorpayConfig;
use sheets_tools::SheetsConfig;

const DEFAULT_LDG_HOST: &str = "127.0.0.1";
const DEFAULT_LDG_PORT: u16 = 8380;
pub const DEFAULT_SITE_URL: &str = "https://learningdestiny.in";
const DEFAULT_CHECKOUT_NAME: &str = "Learning Destiny";
const DEFAULT_CHECKOUT_DESCRIPTION: &str = "Course Enrollment Payment";
const DEFAULT_CHECKOUT_THEME_COLOR: &str = "#FBA758";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The public address of the site, without a trailing slash. Sitemap entries are rooted here.
    pub site_url: String,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the Forwarded header will be used to determine the client's IP address.
    pub use_forwarded: bool,
    /// When set, catalog writes must carry this key in the `ldg_admin_key` header.
    pub admin_api_key: Option<Secret<String>>,
    pub razorpay: RazorpayConfig,
    pub checkout: CheckoutBranding,
    /// Paid registrations are appended here.
    pub registrations_sheet: SheetsConfig,
    /// Enquiry forms are appended here.
    pub enquiries_sheet: SheetsConfig,
    pub events_seed_file: Option<PathBuf>,
    pub workshops_seed_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LDG_HOST.to_string(),
            port: DEFAULT_LDG_PORT,
            site_url: DEFAULT_SITE_URL.to_string(),
            use_x_forwarded_for: false,
            use_forwarded: false,
            admin_api_key: None,
            razorpay: RazorpayConfig::default(),
            checkout: CheckoutBranding::default(),
            registrations_sheet: SheetsConfig::default(),
            enquiries_sheet: SheetsConfig::default(),
            events_seed_file: None,
            workshops_seed_file: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("LDG_HOST").ok().unwrap_or_else(|| DEFAULT_LDG_HOST.into());
        let port = env::var("LDG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for LDG_PORT. {e} Using the default, {DEFAULT_LDG_PORT}, instead."
                    );
                    DEFAULT_LDG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_LDG_PORT);
        let site_url = env_or_default("LDG_SITE_URL", DEFAULT_SITE_URL).trim_end_matches('/').to_string();
        let use_x_forwarded_for = parse_boolean_flag(env::var("LDG_USE_X_FORWARDED_FOR").ok(), false);
        let use_forwarded = parse_boolean_flag(env::var("LDG_USE_FORWARDED").ok(), false);
        let admin_api_key = secret_from_env("LDG_ADMIN_API_KEY");
        if admin_api_key.is_none() {
            warn!(
                "🚨️ LDG_ADMIN_API_KEY is not set. Anyone who can reach the server can add, edit and delete listings. \
                 Set it to require a key for catalog changes."
            );
        }
        let razorpay = RazorpayConfig::new_from_env_or_default();
        let checkout = CheckoutBranding::from_env_or_default();
        let registrations_sheet = SheetsConfig::from_env_with_prefix("LDG_REGISTRATIONS_SHEET");
        let enquiries_sheet = SheetsConfig::from_env_with_prefix("LDG_ENQUIRIES_SHEET");
        let events_seed_file = seed_file_from_env("LDG_EVENTS_SEED_FILE");
        let workshops_seed_file = seed_file_from_env("LDG_WORKSHOPS_SEED_FILE");
        Self {
            host,
            port,
            site_url,
            use_x_forwarded_for,
            use_forwarded,
            admin_api_key,
            razorpay,
            checkout,
            registrations_sheet,
            enquiries_sheet,
            events_seed_file,
            workshops_seed_file,
        }
    }
}

fn seed_file_from_env(name: &str) -> Option<PathBuf> {
    match env::var(name) {
        Ok(s) if !s.trim().is_empty() => Some(PathBuf::from(s)),
        _ => {
            info!("🪛️ {name} is not set. Using the built-in listings.");
            None
        },
    }
}

//-------------------------------------------------  CheckoutBranding  --------------------------------------------------
/// What the payment widget shows the customer.
#[derive(Clone, Debug)]
pub struct CheckoutBranding {
    pub name: String,
    pub description: String,
    pub theme_color: String,
}

impl Default for CheckoutBranding {
    fn default() -> Self {
        Self {
            name: DEFAULT_CHECKOUT_NAME.to_string(),
            description: DEFAULT_CHECKOUT_DESCRIPTION.to_string(),
            theme_color: DEFAULT_CHECKOUT_THEME_COLOR.to_string(),
        }
    }
}

impl CheckoutBranding {
    pub fn from_env_or_default() -> Self {
        Self {
            name: env_or_default("LDG_CHECKOUT_NAME", DEFAULT_CHECKOUT_NAME),
            description: env_or_default("LDG_CHECKOUT_DESCRIPTION", DEFAULT_CHECKOUT_DESCRIPTION),
            theme_color: env_or_default("LDG_CHECKOUT_THEME_COLOR", DEFAULT_CHECKOUT_THEME_COLOR),
        }
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that is used to configure the server's behaviour. Generally we try to keep this
/// as small as possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerOptions {
    pub use_x_forwarded_for: bool,
    pub use_forwarded: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { use_x_forwarded_for: config.use_x_forwarded_for, use_forwarded: config.use_forwarded }
    }
}

//-------------------------------------------------  WidgetSettings  ---------------------------------------------------
/// The public settings the checkout widget needs. Never holds the key secret.
#[derive(Clone, Debug, Default)]
pub struct WidgetSettings {
    pub key_id: String,
    pub branding: CheckoutBranding,
}

impl WidgetSettings {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { key_id: config.razorpay.key_id.clone(), branding: config.checkout.clone() }
    }
}
