use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CURRENCY_CODE: &str = "INR";

//--------------------------------------       Paise         ---------------------------------------------------------
/// An amount in the minor unit of the Indian rupee. Razorpay expects all amounts in this unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paise(i64);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}₹{}.{:02}", abs / 100, abs % 100)
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Converts a fractional rupee amount, as sent by the storefront, into paise. Sub-paisa fractions are rounded to
    /// the nearest paisa.
    pub fn try_from_rupees_f64(rupees: f64) -> Result<Self, PriceParseError> {
        if !rupees.is_finite() {
            return Err(PriceParseError::InvalidAmount(rupees.to_string()));
        }
        let paise = (rupees * 100.0).round();
        if paise.abs() > i64::MAX as f64 {
            return Err(PriceParseError::InvalidAmount(rupees.to_string()));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(paise as i64))
    }

    /// The amount in whole and fractional rupees, for display in spreadsheet rows.
    pub fn as_rupees_string(&self) -> String {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        if abs % 100 == 0 {
            format!("{sign}{}", abs / 100)
        } else {
            format!("{sign}{}.{:02}", abs / 100, abs % 100)
        }
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

//--------------------------------------   Display prices    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceParseError {
    #[error("The price '{0}' does not contain an amount")]
    NoDigits(String),
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
}

/// Parses a catalog display price such as `"1,999 Rs"`, `"₹ 499.50"` or `"Free"` into paise.
///
/// The first run of digits (with any thousands separators and a decimal point) is taken as the rupee amount. Any
/// currency symbols or words around it are ignored. `"Free"` and blank prices are zero.
pub fn parse_display_price(price: &str) -> Result<Paise, PriceParseError> {
    let trimmed = price.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("free") {
        return Ok(Paise::default());
    }
    let start = trimmed.find(|c: char| c.is_ascii_digit()).ok_or_else(|| PriceParseError::NoDigits(price.into()))?;
    let amount = trimmed[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != ',')
        .collect::<String>();
    let amount = amount.trim_end_matches('.');
    let rupees = amount.parse::<f64>().map_err(|_| PriceParseError::InvalidAmount(price.into()))?;
    Paise::try_from_rupees_f64(rupees).map_err(|_| PriceParseError::InvalidAmount(price.into()))
}
