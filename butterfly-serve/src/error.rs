//! Errors surfaced over HTTP: a query error maps to a status code and a
//! small JSON body, never a panic.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Core(#[from] butterfly_common::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServeError::Core(butterfly_common::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ServeError::Core(butterfly_common::Error::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ServeError::Core(butterfly_common::Error::RangeError(_)) => StatusCode::BAD_REQUEST,
            ServeError::Core(butterfly_common::Error::InternalInvariant(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
