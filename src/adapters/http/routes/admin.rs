use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{delete, get, put},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{CurrentUser, require_admin, require_authenticated},
        routes::{me::UserResponse, quotes::QuoteResponse},
    },
    app_error::{AppError, AppResult},
    domain::entities::{quote::QuoteWithOwner, user::UserRole},
};

pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", delete(delete_user))
        .route("/admin/users/{id}/role", put(set_user_role))
        .route("/admin/quotes", get(list_quotes))
        .route("/admin/quotes/{id}", delete(delete_quote))
        .route("/admin/stats", get(get_stats))
        // Last added runs first: authenticate, then check the role.
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_authenticated,
        ))
}

#[derive(Serialize)]
struct UsersResponse {
    users: Vec<UserResponse>,
}

#[derive(Serialize)]
struct AdminQuoteResponse {
    #[serde(flatten)]
    quote: QuoteResponse,
    user_id: Uuid,
    email: String,
}

impl From<QuoteWithOwner> for AdminQuoteResponse {
    fn from(row: QuoteWithOwner) -> Self {
        Self {
            user_id: row.quote.user_id,
            quote: row.quote.into(),
            email: row.email,
        }
    }
}

#[derive(Serialize)]
struct AdminQuotesResponse {
    quotes: Vec<AdminQuoteResponse>,
}

#[derive(Deserialize)]
struct SetRolePayload {
    role: Option<String>,
}

async fn list_users(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = app_state.admin_use_cases.list_users().await?;
    Ok(Json(UsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

async fn delete_user(
    State(app_state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<impl IntoResponse> {
    app_state.admin_use_cases.delete_user(admin.id, id).await?;
    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}

async fn set_user_role(
    State(app_state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<SetRolePayload>, AppError>,
) -> AppResult<impl IntoResponse> {
    let role: UserRole = payload
        .role
        .as_deref()
        .ok_or_else(|| AppError::InvalidInput("Role is required".into()))?
        .parse()
        .map_err(AppError::InvalidInput)?;

    app_state
        .admin_use_cases
        .set_user_role(admin.id, id, role)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Role updated" })))
}

async fn list_quotes(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let quotes = app_state.admin_use_cases.list_quotes().await?;
    Ok(Json(AdminQuotesResponse {
        quotes: quotes.into_iter().map(AdminQuoteResponse::from).collect(),
    }))
}

async fn delete_quote(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<impl IntoResponse> {
    app_state.admin_use_cases.delete_quote(id).await?;
    Ok(Json(serde_json::json!({ "message": "Quote deleted" })))
}

async fn get_stats(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = app_state.admin_use_cases.stats().await?;
    Ok(Json(stats))
}
