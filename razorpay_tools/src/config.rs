use ldg_common::{helpers::secret_from_env, Secret};
use log::*;

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";

#[derive(Debug, Clone, Default)]
pub struct RazorpayConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// The public key id. It is also handed to the checkout widget.
    pub key_id: String,
    /// Signs payment confirmations and authenticates REST calls. `None` if it was not configured, in which case
    /// verification fails closed.
    pub key_secret: Option<Secret<String>>,
}

impl RazorpayConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("LDG_RAZORPAY_API_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_RAZORPAY_API_URL.to_string());
        let key_id = std::env::var("LDG_RAZORPAY_KEY_ID").unwrap_or_else(|_| {
            warn!("LDG_RAZORPAY_KEY_ID not set. Orders cannot be created until it is.");
            String::default()
        });
        let key_secret = secret_from_env("LDG_RAZORPAY_KEY_SECRET");
        if key_secret.is_none() {
            error!(
                "🪛️ LDG_RAZORPAY_KEY_SECRET is not set. Every payment verification will fail until it is set to the \
                 key secret for your Razorpay account."
            );
        }
        Self { api_url, key_id, key_secret }
    }
}
