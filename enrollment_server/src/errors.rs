use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use enrollment_engine::{CatalogError, CheckoutError, EnquiryError, LedgerError, PaymentGatewayError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Event not found")]
    ListingNotFound,
    #[error("{0}")]
    ListingConflict(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid amount. {0}")]
    InvalidAmount(String),
    #[error("The payment gateway could not process the request. {0}")]
    GatewayError(String),
    #[error("{0}")]
    SaveFailed(String),
    #[error("{0}")]
    IncompleteForm(String),
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
}

/// How the error body is shaped. The storefront reads `message` from catalog calls and `success`/`message` from the
/// checkout and spreadsheet calls.
enum ErrorBody {
    Message,
    Outcome,
    Error,
}

impl ServerError {
    fn body_kind(&self) -> ErrorBody {
        match self {
            Self::ListingNotFound | Self::ListingConflict(_) | Self::MethodNotAllowed => ErrorBody::Message,
            Self::SaveFailed(_) | Self::IncompleteForm(_) => ErrorBody::Outcome,
            _ => ErrorBody::Error,
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Self::IncompleteForm(_) => StatusCode::BAD_REQUEST,
            Self::ListingNotFound => StatusCode::NOT_FOUND,
            Self::ListingConflict(_) => StatusCode::CONFLICT,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GatewayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SaveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self.body_kind() {
            ErrorBody::Message => json!({ "message": self.to_string() }),
            ErrorBody::Outcome => json!({ "success": false, "message": self.to_string() }),
            ErrorBody::Error => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(_) => Self::ListingNotFound,
            CatalogError::VersionConflict { .. } => Self::ListingConflict(e.to_string()),
            CatalogError::StorageError(s) => Self::BackendError(s),
        }
    }
}

impl From<PaymentGatewayError> for ServerError {
    fn from(e: PaymentGatewayError) -> Self {
        match e {
            PaymentGatewayError::MissingSecret => Self::ConfigurationError(e.to_string()),
            PaymentGatewayError::InvalidOrder(s) => Self::InvalidAmount(s),
            PaymentGatewayError::GatewayRejected(_) | PaymentGatewayError::CommunicationError(_) => {
                Self::GatewayError(e.to_string())
            },
        }
    }
}

impl From<LedgerError> for ServerError {
    fn from(e: LedgerError) -> Self {
        Self::SaveFailed(e.to_string())
    }
}

impl From<CheckoutError> for ServerError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::InvalidAmount(s) => Self::InvalidAmount(s),
            CheckoutError::GatewayError(e) => e.into(),
            CheckoutError::LedgerError(e) => e.into(),
            CheckoutError::InvalidTransition(e) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<EnquiryError> for ServerError {
    fn from(e: EnquiryError) -> Self {
        match e {
            EnquiryError::IncompleteForm(_) => Self::IncompleteForm(e.to_string()),
            EnquiryError::LedgerError(e) => e.into(),
        }
    }
}
