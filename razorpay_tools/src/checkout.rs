use serde::{Deserialize, Serialize};

/// Where the storefront loads the checkout widget from.
pub const CHECKOUT_SCRIPT_URL: &str = "https://checkout.razorpay.com/v1/checkout.js";
/// The element id of the injected `<script>` tag. The storefront checks for it before injecting the script again.
pub const CHECKOUT_SCRIPT_ID: &str = "razorpay-script";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub color: String,
}

/// The options object passed to `new Razorpay(options)` in the browser. The completion handler is attached
/// client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    pub key: String,
    /// In paise.
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

impl CheckoutOptions {
    pub fn new<S: Into<String>>(key: S, order_id: S, amount: i64, currency: S) -> Self {
        Self {
            key: key.into(),
            amount,
            currency: currency.into(),
            name: String::default(),
            description: String::default(),
            order_id: order_id.into(),
            prefill: Prefill::default(),
            theme: Theme { color: "#FBA758".to_string() },
        }
    }

    pub fn with_branding<S: Into<String>>(mut self, name: S, description: S, color: S) -> Self {
        self.name = name.into();
        self.description = description.into();
        self.theme = Theme { color: color.into() };
        self
    }

    pub fn with_prefill(mut self, prefill: Prefill) -> Self {
        self.prefill = prefill;
        self
    }
}
