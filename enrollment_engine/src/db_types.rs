use std::fmt::Display;

use chrono::{DateTime, Local};
use ldg_common::{parse_display_price, Paise, PriceParseError};
use serde::{Deserialize, Serialize};

//--------------------------------------     Catalog       ---------------------------------------------------------
/// The two catalogs that the site publishes. They share a record shape and an API contract, but are stored
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Events,
    Workshops,
}

impl Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Events => f.write_str("events"),
            Self::Workshops => f.write_str("workshops"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub time: String,
    pub session: String,
    pub speaker: String,
}

/// An event or workshop listing.
///
/// `price` is whatever the admin typed (e.g. "Free" or "1,999 Rs"). Use [`Event::price_in_paise`] to get a chargeable
/// amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(alias = "instructor")]
    pub organizer: String,
    pub date: String,
    pub location: String,
    pub price: String,
    pub image_url: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub agenda: Vec<AgendaItem>,
    /// Incremented on every update. Clients can echo it back on PUT to detect concurrent edits.
    #[serde(default = "initial_version")]
    pub version: u64,
}

fn initial_version() -> u64 {
    1
}

impl Event {
    pub fn price_in_paise(&self) -> Result<Paise, PriceParseError> {
        parse_display_price(&self.price)
    }

    /// Overwrites every field that is present in `update` and bumps the version.
    pub fn apply(&mut self, update: EventUpdate) {
        let EventUpdate {
            id: _,
            version: _,
            title,
            organizer,
            date,
            location,
            price,
            image_url,
            description,
            highlights,
            agenda,
        } = update;
        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = organizer {
            self.organizer = v;
        }
        if let Some(v) = date {
            self.date = v;
        }
        if let Some(v) = location {
            self.location = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = image_url {
            self.image_url = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = highlights {
            self.highlights = v;
        }
        if let Some(v) = agenda {
            self.agenda = v;
        }
        self.version += 1;
    }
}

/// A listing submitted by the admin panel. Any field that is left out is stored as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEvent {
    pub title: String,
    #[serde(alias = "instructor")]
    pub organizer: String,
    pub date: String,
    pub location: String,
    pub price: String,
    pub image_url: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub agenda: Vec<AgendaItem>,
}

impl NewEvent {
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            title: self.title,
            organizer: self.organizer,
            date: self.date,
            location: self.location,
            price: self.price,
            image_url: self.image_url,
            description: self.description,
            highlights: self.highlights,
            agenda: self.agenda,
            version: initial_version(),
        }
    }
}

/// A partial update for a listing. `id` selects the record; `version`, when supplied, must match the stored version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "instructor", skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<Vec<AgendaItem>>,
}

//--------------------------------------   Registrants     ---------------------------------------------------------
/// The enrollment form that accompanies a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registrant {
    pub full_name: String,
    pub email: String,
    pub contact: String,
    pub stream: String,
    pub qualification: String,
}

/// The pre-payment enquiry form on the event details page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnquiryForm {
    pub name: String,
    pub contact_number: String,
    pub stream: String,
    pub qualification: String,
}

impl EnquiryForm {
    /// Names of the fields that were left blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("contactNumber", &self.contact_number),
            ("stream", &self.stream),
            ("qualification", &self.qualification),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![self.name.clone(), self.contact_number.clone(), self.stream.clone(), self.qualification.clone()]
    }
}

/// A single spreadsheet row recording a verified payment against a registrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRow {
    pub full_name: String,
    pub email: String,
    pub contact: String,
    pub stream: String,
    pub qualification: String,
    pub amount: String,
    pub payment_id: String,
    pub order_id: String,
    pub timestamp: String,
}

pub const REGISTRATION_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

impl RegistrationRow {
    pub fn new(
        registrant: Registrant,
        amount: String,
        payment_id: String,
        order_id: String,
        at: DateTime<Local>,
    ) -> Self {
        let Registrant { full_name, email, contact, stream, qualification } = registrant;
        Self {
            full_name,
            email,
            contact,
            stream,
            qualification,
            amount,
            payment_id,
            order_id,
            timestamp: at.format(REGISTRATION_TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// The cell values in sheet column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone(),
            self.contact.clone(),
            self.stream.clone(),
            self.qualification.clone(),
            self.amount.clone(),
            self.payment_id.clone(),
            self.order_id.clone(),
            self.timestamp.clone(),
        ]
    }
}

//--------------------------------------  Gateway orders   ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGatewayOrder {
    pub amount: Paise,
    pub currency: String,
    pub receipt: String,
}

/// An order as issued by the payment gateway. It lives only as long as the checkout attempt that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount: Paise,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// The payload the checkout widget hands to its completion callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}
