//! RFC 9457 problem details for error responses.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::ServiceError;

/// Content type of problem responses.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Problem details body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub type_url: String,
    /// Short summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Explanation specific to this occurrence.
    pub detail: String,
}

impl Problem {
    /// Create a new problem with the given status, title, and detail.
    #[must_use]
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    /// Problem titled with the status code's canonical reason phrase.
    #[must_use]
    pub fn from_status(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or("Error"), detail)
    }

    /// 404 with the given detail.
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", detail)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut resp = Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

impl From<ServiceError> for Problem {
    fn from(err: ServiceError) -> Self {
        let detail = err.to_string();
        match err {
            ServiceError::Parse(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid Expression", detail)
            }
            ServiceError::IdMismatch { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "Bad Request", detail)
            }
            ServiceError::Validation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Failed", detail)
            }
            ServiceError::NotFound { .. } => Self::not_found(detail),
            ServiceError::Storage(e) => {
                error!(error = %e, "storage failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "The calculation store is unavailable",
                )
            }
        }
    }
}
