use std::fmt::Display;

use enrollment_engine::{
    checkout::CheckoutState,
    db_types::{PaymentConfirmation, Registrant},
};
use ldg_common::{parse_display_price, Paise, PriceParseError, DEFAULT_CURRENCY_CODE};
use razorpay_tools::CheckoutOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// A rupee amount as the storefront sends it: usually a number, sometimes the listing's display price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RupeeAmount {
    Number(f64),
    Text(String),
}

impl RupeeAmount {
    pub fn to_paise(&self) -> Result<Paise, PriceParseError> {
        match self {
            Self::Number(n) => Paise::try_from_rupees_f64(*n),
            Self::Text(s) => parse_display_price(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub amount: RupeeAmount,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_CODE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    /// In paise
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

/// The field names used by the storefront's payment handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub order_creation_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

impl From<VerifyRequest> for PaymentConfirmation {
    fn from(req: VerifyRequest) -> Self {
        Self { order_id: req.order_creation_id, payment_id: req.razorpay_payment_id, signature: req.razorpay_signature }
    }
}

/// A paid registration, as posted to `/api/saveToSheet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRegistrationRequest {
    #[serde(flatten)]
    pub registrant: Registrant,
    pub amount: RupeeAmount,
    pub payment_id: String,
    pub order_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub amount: RupeeAmount,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub prefill: PrefillRequest,
}

/// Everything the storefront needs to open the payment widget for a fresh order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: String,
    pub state: CheckoutState,
    pub script_url: String,
    /// Id of the script element. If an element with this id already exists, the script must not be injected again.
    pub script_id: String,
    pub options: CheckoutOptions,
}

/// Posted by the storefront when the widget reports a successful payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteCheckoutRequest {
    #[serde(flatten)]
    pub payment: VerifyRequest,
    #[serde(flatten)]
    pub registrant: Registrant,
    pub amount: RupeeAmount,
}
