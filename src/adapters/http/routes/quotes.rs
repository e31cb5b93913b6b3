use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{CurrentUser, require_authenticated},
    },
    app_error::{AppError, AppResult},
    application::use_cases::quote::QuoteSubmission,
    domain::entities::quote::{QUOTE_CURRENCY, Quote},
};

pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/quotes", get(list_quotes).post(create_quote))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_authenticated,
        ))
}

/// Browser forms send attendees as a string; API clients send a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Attendees {
    Number(i64),
    Text(String),
}

impl Attendees {
    /// `Ok(None)` for a blank string, so it reads as a missing field.
    fn parse(self) -> AppResult<Option<i64>> {
        match self {
            Attendees::Number(n) => Ok(Some(n)),
            Attendees::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse()
                    .map(Some)
                    .map_err(|_| AppError::InvalidInput("Attendees must be a number".into()))
            }
        }
    }
}

#[derive(Deserialize)]
struct CreateQuotePayload {
    event_type: Option<String>,
    event_date: Option<String>,
    location: Option<String>,
    attendees: Option<Attendees>,
}

#[derive(Serialize)]
struct CreateQuoteResponse {
    message: &'static str,
    quote_amount: f64,
    currency: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub location: String,
    pub attendees: i32,
    pub quote_amount: f64,
    pub created_at: NaiveDateTime,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            quote_amount: quote.quote_amount(),
            event_type: quote.event_type,
            event_date: quote.event_date,
            location: quote.location,
            attendees: quote.attendees,
            created_at: quote.created_at,
        }
    }
}

#[derive(Serialize)]
struct QuotesResponse {
    quotes: Vec<QuoteResponse>,
}

async fn create_quote(
    State(app_state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateQuotePayload>, AppError>,
) -> AppResult<impl IntoResponse> {
    let attendees = match payload.attendees {
        Some(attendees) => attendees.parse()?,
        None => None,
    };

    let quote = app_state
        .quote_use_cases
        .create_quote(
            user.id,
            QuoteSubmission {
                event_type: payload.event_type,
                event_date: payload.event_date,
                location: payload.location,
                attendees,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateQuoteResponse {
            message: "Quote created",
            quote_amount: quote.quote_amount(),
            currency: QUOTE_CURRENCY,
        }),
    ))
}

async fn list_quotes(
    State(app_state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let quotes = app_state.quote_use_cases.list_quotes(user.id).await?;

    Ok(Json(QuotesResponse {
        quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
    }))
}
