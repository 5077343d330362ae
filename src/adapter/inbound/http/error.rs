use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use super::view;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Not found")]
    NotFound,

    #[error("Anti-forgery token missing or invalid")]
    Antiforgery,

    #[error("Internal error: {0}")]
    Internal(#[from] crate::error::Error),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            HttpError::NotFound => (StatusCode::NOT_FOUND, view::not_found()),
            HttpError::Antiforgery => (StatusCode::BAD_REQUEST, view::bad_request()),
            HttpError::Internal(e) => {
                error!(error = %e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, view::server_error())
            }
        };

        (status, Html(body)).into_response()
    }
}
