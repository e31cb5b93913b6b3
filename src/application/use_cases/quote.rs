use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{ports::QuotePricer, validators::present},
    domain::entities::quote::{MAX_QUOTE_CENTS, MIN_QUOTE_CENTS, Quote, QuoteWithOwner},
};

const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw quote request as submitted; every field may be absent.
#[derive(Debug, Clone, Default)]
pub struct QuoteSubmission {
    pub event_type: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
    pub attendees: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub user_id: Uuid,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub location: String,
    pub attendees: i32,
    pub quote_amount_cents: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteTotals {
    pub count: i64,
    pub revenue_cents: i64,
}

#[async_trait]
pub trait QuoteRepo: Send + Sync {
    async fn create(&self, new_quote: &NewQuote) -> AppResult<Quote>;
    /// Newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Quote>>;
    /// Every quote with its owner's email, newest first.
    async fn list_with_owner(&self) -> AppResult<Vec<QuoteWithOwner>>;
    async fn delete(&self, quote_id: Uuid) -> AppResult<bool>;
    async fn totals(&self) -> AppResult<QuoteTotals>;
}

#[derive(Clone)]
pub struct QuoteUseCases {
    repo: Arc<dyn QuoteRepo>,
    pricer: Arc<dyn QuotePricer>,
}

impl QuoteUseCases {
    pub fn new(repo: Arc<dyn QuoteRepo>, pricer: Arc<dyn QuotePricer>) -> Self {
        Self { repo, pricer }
    }

    #[instrument(skip(self))]
    pub async fn create_quote(&self, user_id: Uuid, submission: QuoteSubmission) -> AppResult<Quote> {
        let (Some(event_type), Some(event_date), Some(location), Some(attendees)) = (
            present(submission.event_type.as_deref()),
            present(submission.event_date.as_deref()),
            present(submission.location.as_deref()),
            submission.attendees.filter(|n| *n != 0),
        ) else {
            return Err(AppError::InvalidInput("All fields are required".into()));
        };

        let event_date = NaiveDate::parse_from_str(event_date, EVENT_DATE_FORMAT).map_err(|_| {
            AppError::InvalidInput("Event date must be formatted as YYYY-MM-DD".into())
        })?;
        let attendees = parse_attendees(attendees)?;

        let quote_amount_cents = self.pricer.price_cents();
        if !(MIN_QUOTE_CENTS..=MAX_QUOTE_CENTS).contains(&quote_amount_cents) {
            return Err(AppError::Internal(format!(
                "pricer returned out-of-range amount: {quote_amount_cents}"
            )));
        }

        let quote = self
            .repo
            .create(&NewQuote {
                user_id,
                event_type: event_type.to_string(),
                event_date,
                location: location.to_string(),
                attendees,
                quote_amount_cents,
            })
            .await?;

        info!(quote_id = %quote.id, amount_cents = quote.quote_amount_cents, "Quote created");
        Ok(quote)
    }

    #[instrument(skip(self))]
    pub async fn list_quotes(&self, user_id: Uuid) -> AppResult<Vec<Quote>> {
        self.repo.list_for_user(user_id).await
    }
}

fn parse_attendees(raw: i64) -> AppResult<i32> {
    if raw < 1 {
        return Err(AppError::InvalidInput("Attendees must be at least 1".into()));
    }
    i32::try_from(raw).map_err(|_| AppError::InvalidInput("Attendees is too large".into()))
}
