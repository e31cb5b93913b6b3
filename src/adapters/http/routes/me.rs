use axum::{
    Extension, Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{CurrentUser, require_authenticated},
    },
    app_error::{AppError, AppResult},
    domain::entities::user::{User, UserRole},
};

pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_authenticated,
        ))
}

/// User as exposed over HTTP. Never carries the subject identifier.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: Option<NaiveDateTime>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
struct MeResponse {
    user: UserResponse,
}

#[derive(Deserialize)]
struct UpdateProfilePayload {
    first_name: Option<String>,
    last_name: Option<String>,
}

async fn get_me(
    State(app_state): State<AppState>,
    Extension(CurrentUser(current)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let user = app_state.user_use_cases.get_profile(current.id).await?;
    Ok(Json(MeResponse { user: user.into() }))
}

async fn update_me(
    State(app_state): State<AppState>,
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateProfilePayload>, AppError>,
) -> AppResult<impl IntoResponse> {
    app_state
        .user_use_cases
        .update_profile(
            current.id,
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
        )
        .await?;

    Ok(Json(serde_json::json!({ "message": "Profile updated" })))
}
