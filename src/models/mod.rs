//! Data models for the SmartMine backend.
//!
//! Field names match the JSON contract consumed by the dashboard frontend.

mod dashboard;
mod equipment;
mod maintenance;

pub use dashboard::*;
pub use equipment::*;
pub use maintenance::*;

use serde::Serialize;

use crate::errors::AppError;

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned with `201 Created`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

/// Unwrap a required text field, treating blank input as absent.
pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::missing_field(field)),
    }
}

/// Reject a provided-but-blank text field on partial updates.
pub(crate) fn optional_text(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(AppError::Validation(format!(
            "Field {} must not be blank",
            field
        ))),
        other => Ok(other),
    }
}

pub(crate) fn check_non_negative(value: i64, field: &str) -> Result<i64, AppError> {
    if value < 0 {
        return Err(AppError::Validation(format!(
            "Field {} must not be negative",
            field
        )));
    }
    Ok(value)
}

pub(crate) fn check_positive(value: i64, field: &str) -> Result<i64, AppError> {
    if value <= 0 {
        return Err(AppError::Validation(format!(
            "Field {} must be greater than zero",
            field
        )));
    }
    Ok(value)
}
