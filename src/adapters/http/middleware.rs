use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{
    adapters::http::app_state::AppState, app_error::AppError, domain::entities::user::User,
};

/// The resolved caller, inserted into request extensions by `require_authenticated`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Bearer credential from `Authorization: Bearer <credential>`, if well formed.
fn bearer_credential(request: &Request) -> Option<&str> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let credential = value.strip_prefix("Bearer ")?.trim();
    if credential.is_empty() {
        None
    } else {
        Some(credential)
    }
}

pub async fn require_authenticated(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credential = bearer_credential(&request)
        .ok_or(AppError::InvalidCredentials)?
        .to_owned();
    let user = app_state.user_use_cases.authenticate(&credential).await?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Runs after `require_authenticated`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let Some(CurrentUser(user)) = request.extensions().get::<CurrentUser>() else {
        return Err(AppError::InvalidCredentials);
    };
    if !user.role.is_admin() {
        tracing::warn!(user_id = %user.id, "Non-admin denied admin route");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
