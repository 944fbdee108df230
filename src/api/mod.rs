//! REST API module.
//!
//! Contains all API routes and handlers following the dashboard frontend contract.

mod dashboard;
mod equipment;
mod maintenance;
mod seed;

pub use dashboard::*;
pub use equipment::*;
pub use maintenance::*;
pub use seed::*;

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::errors::AppError;

/// Response type for all handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// JSON body extractor whose rejections render as [`AppError`] bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections render as [`AppError`] bodies.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
