use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        if self.is_fault() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        match self {
            AppError::Database(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError,
                "Server error",
            ),
            AppError::InvalidCredentials => error_resp(
                StatusCode::UNAUTHORIZED,
                ErrorCode::InvalidCredentials,
                "Unauthorized",
            ),
            AppError::Forbidden => error_resp(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Access denied. Admins only.",
            ),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, &msg)
            }
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, ErrorCode::NotFound, "Not found"),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "Server error",
            ),
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = serde_json::json!({ "code": code.as_str(), "message": message });
    (status, Json(body)).into_response()
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::InvalidInput("Invalid id".into())
    }
}
