use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{MethodRouter, delete, get, post},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{require_admin, require_authenticated},
    },
    app_error::{AppError, AppResult},
    domain::entities::event_type::EventType,
};

/// Listing is public; create and delete sit behind the admin guard.
pub fn router(app_state: &AppState) -> Router<AppState> {
    let admin_only = |method_router: MethodRouter<AppState>| {
        method_router
            .route_layer(middleware::from_fn(require_admin))
            .route_layer(middleware::from_fn_with_state(
                app_state.clone(),
                require_authenticated,
            ))
    };

    Router::new()
        .route(
            "/event-types",
            get(list_event_types).merge(admin_only(post(create_event_type))),
        )
        .route("/event-types/{id}", admin_only(delete(delete_event_type)))
}

#[derive(Deserialize)]
struct CreateEventTypePayload {
    name: Option<String>,
}

#[derive(Serialize)]
struct EventTypesResponse {
    event_types: Vec<EventType>,
}

#[derive(Serialize)]
struct EventTypeCreatedResponse {
    message: &'static str,
    event_type: EventType,
}

async fn list_event_types(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let event_types = app_state.event_type_use_cases.list().await?;
    Ok(Json(EventTypesResponse { event_types }))
}

async fn create_event_type(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEventTypePayload>, AppError>,
) -> AppResult<impl IntoResponse> {
    let event_type = app_state
        .event_type_use_cases
        .create(payload.name.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EventTypeCreatedResponse {
            message: "Event type added",
            event_type,
        }),
    ))
}

async fn delete_event_type(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<impl IntoResponse> {
    app_state.event_type_use_cases.delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Event type deleted" })))
}
