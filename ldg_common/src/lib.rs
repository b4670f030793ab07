pub mod helpers;
mod paise;
mod secret;

pub use paise::{parse_display_price, Paise, PriceParseError, DEFAULT_CURRENCY_CODE};
pub use secret::Secret;
