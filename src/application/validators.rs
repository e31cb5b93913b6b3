use crate::app_error::{AppError, AppResult};

/// Returns the trimmed value if it is present and non-blank.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trims a required field, failing with `message` when it is missing or blank.
pub fn require_present(value: Option<&str>, message: &str) -> AppResult<String> {
    present(value)
        .map(str::to_owned)
        .ok_or_else(|| AppError::InvalidInput(message.into()))
}
