pub mod admin;
pub mod event_types;
pub mod me;
pub mod quotes;

use axum::Router;

use crate::adapters::http::app_state::AppState;

/// Everything under `/api`. Each module applies its own access gate.
pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(me::router(app_state))
        .merge(quotes::router(app_state))
        .merge(event_types::router(app_state))
        .merge(admin::router(app_state))
}
