//! REST API module.
//!
//! Contains all API routes and handlers.

mod extract;
mod help;
mod projects;
mod toggles;

pub use help::*;
pub use projects::*;
pub use toggles::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response: a JSON body with its status code.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub body: T,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// 200 OK with a body.
pub fn ok<T: Serialize>(body: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::OK,
        body,
    })
}

/// 201 Created with a body.
pub fn created<T: Serialize>(body: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::CREATED,
        body,
    })
}

/// Log and return an error response.
pub fn error<T: Serialize>(err: crate::errors::AppError, context: &str) -> ApiResult<T> {
    err.log(context);
    Err(err)
}
