//! Request extractors that reject with [`Problem`] bodies.
//!
//! axum's own `Path` and `Json` rejections answer in `text/plain`; these
//! wrappers keep the status axum picks and return it as problem details.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::problem::Problem;

/// Path parameters, rejected as a [`Problem`].
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

/// JSON request body, rejected as a [`Problem`].
#[derive(Debug, Clone, Copy)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(Problem::from)
    }
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(Problem::from)
    }
}

impl From<PathRejection> for Problem {
    fn from(rejection: PathRejection) -> Self {
        Self::from_status(rejection.status(), rejection.body_text())
    }
}

impl From<JsonRejection> for Problem {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_status(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};

    #[tokio::test]
    async fn test_json_syntax_error_is_bad_request_problem() {
        let req = HttpRequest::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let problem = ApiJson::<serde_json::Value>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(problem.status, 400);
        assert_eq!(problem.title, "Bad Request");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported_media_type() {
        let req = HttpRequest::builder().body(Body::from("{}")).unwrap();
        let problem = ApiJson::<serde_json::Value>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(problem.status, StatusCode::UNSUPPORTED_MEDIA_TYPE.as_u16());
    }

    #[tokio::test]
    async fn test_json_body_is_extracted() {
        let req = HttpRequest::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"a":1}"#))
            .unwrap();
        let ApiJson(value) = ApiJson::<serde_json::Value>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(value["a"], 1);
    }
}
