use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SheetsApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The service account is not configured: {0}")]
    NotConfigured(String),
    #[error("Could not sign the service account assertion: {0}")]
    SigningError(String),
    #[error("Could not obtain an access token: {0}")]
    TokenError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
