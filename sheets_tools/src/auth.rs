use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use ldg_common::Secret;
use log::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{data_objects::TokenResponse, SheetsApiError, SheetsConfig};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Cached tokens are discarded this long before Google says they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The claim set of the signed assertion that is exchanged for an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl ServiceAccountClaims {
    pub fn new(client_email: &str, token_uri: &str, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            iss: client_email.to_string(),
            scope: SHEETS_SCOPE.to_string(),
            aud: token_uri.to_string(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Clone)]
struct CachedToken {
    token: Secret<String>,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Obtains and caches OAuth access tokens for a Google service account.
#[derive(Clone)]
pub struct ServiceAccountAuth {
    client_email: String,
    private_key: Secret<String>,
    token_uri: String,
    client: Arc<Client>,
    cache: Arc<Mutex<Option<CachedToken>>>,
}

impl ServiceAccountAuth {
    pub fn new(config: &SheetsConfig, client: Arc<Client>) -> Self {
        Self {
            client_email: config.client_email.clone(),
            private_key: config.private_key.clone(),
            token_uri: config.token_uri.clone(),
            client,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Signs a fresh assertion with the service account key.
    pub fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsApiError> {
        let claims = ServiceAccountClaims::new(&self.client_email, &self.token_uri, now);
        let key = EncodingKey::from_rsa_pem(self.private_key.reveal().as_bytes())
            .map_err(|e| SheetsApiError::SigningError(e.to_string()))?;
        encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| SheetsApiError::SigningError(e.to_string()))
    }

    /// Returns a cached access token, or exchanges a new assertion for one.
    ///
    /// The cache lock is held across the exchange so that concurrent requests wait for a single token request.
    pub async fn access_token(&self) -> Result<Secret<String>, SheetsApiError> {
        let mut cache = self.cache.lock().await;
        let now = Utc::now();
        if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh(now)) {
            trace!("📄️ Using cached access token for {}", self.client_email);
            return Ok(cached.token.clone());
        }
        let fresh = self.exchange_assertion(now).await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn exchange_assertion(&self, now: DateTime<Utc>) -> Result<CachedToken, SheetsApiError> {
        debug!("📄️ Requesting a new access token for {}", self.client_email);
        let assertion = self.signed_assertion(now)?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];
        let response = self
            .client
            .post(&self.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| SheetsApiError::TokenError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!("📄️ Token request for {} was rejected ({status}). {message}", self.client_email);
            return Err(SheetsApiError::TokenError(format!("status {status}: {message}")));
        }
        let token =
            response.json::<TokenResponse>().await.map_err(|e| SheetsApiError::TokenError(e.to_string()))?;
        info!("📄️ Obtained access token for {}, valid for {}s", self.client_email, token.expires_in);
        Ok(CachedToken {
            token: Secret::new(token.access_token),
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
