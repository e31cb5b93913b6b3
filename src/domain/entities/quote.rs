use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

pub const QUOTE_CURRENCY: &str = "USD";

/// Lower and upper bound of a generated quote, in cents.
pub const MIN_QUOTE_CENTS: i64 = 10_000;
pub const MAX_QUOTE_CENTS: i64 = 100_000;

/// A priced insurance request for one event. The amount is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub location: String,
    pub attendees: i32,
    pub quote_amount_cents: i64,
    pub created_at: NaiveDateTime,
}

impl Quote {
    pub fn quote_amount(&self) -> f64 {
        cents_to_amount(self.quote_amount_cents)
    }
}

/// Quote joined with its owner's email, for the admin listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteWithOwner {
    pub quote: Quote,
    pub email: String,
}

pub fn cents_to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Renders cents as a fixed two-decimal string, e.g. `12345` -> `"123.45"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
