//! REST handlers for the calculations API.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::service::CalculationService;

use super::dto::{CalculationModel, CreateCalculationRequest};
use super::extract::{ApiJson, ApiPath};
use super::problem::Problem;

type ApiResult<T> = Result<T, Problem>;

/// Handler for GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /calculations/history
///
/// Returns every calculation, newest first, or 404 when there are none.
pub async fn history(
    Extension(svc): Extension<Arc<CalculationService>>,
) -> ApiResult<Json<Vec<CalculationModel>>> {
    info!("History calculations API call");
    let calculations = svc.history().await?;
    if calculations.is_empty() {
        warn!("History is empty");
        return Err(Problem::not_found("History is empty"));
    }
    Ok(Json(calculations.into_iter().map(Into::into).collect()))
}

/// Handler for GET /calculations/{id}
pub async fn get_by_id(
    Extension(svc): Extension<Arc<CalculationService>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<CalculationModel>> {
    info!(id, "Get calculation API call");
    let calculation = svc.get(id).await.map_err(|e| {
        warn!(id, error = %e, "calculation lookup failed");
        e
    })?;
    Ok(Json(calculation.into()))
}

/// Handler for GET /calculations/search/{predicate}
pub async fn search(
    Extension(svc): Extension<Arc<CalculationService>>,
    ApiPath(predicate): ApiPath<String>,
) -> ApiResult<Json<Vec<CalculationModel>>> {
    info!(%predicate, "Search calculations API call");
    let calculations = svc.search(&predicate).await?;
    if calculations.is_empty() {
        warn!(%predicate, "No calculations match");
        return Err(Problem::not_found(format!(
            "No calculations match '{predicate}'"
        )));
    }
    Ok(Json(calculations.into_iter().map(Into::into).collect()))
}

/// Handler for POST /calculations
///
/// Evaluates the expression, records it, and answers 201 with a `Location`.
pub async fn create(
    Extension(svc): Extension<Arc<CalculationService>>,
    ApiJson(req): ApiJson<CreateCalculationRequest>,
) -> ApiResult<impl IntoResponse> {
    info!(expression = %req.expression, "Create calculation API call");
    let calculation = svc.create(&req.expression).await?;
    let location = format!("/calculations/{}", calculation.id);
    let dto: CalculationModel = calculation.into();
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(dto)))
}

/// Handler for PUT /calculations/{id}
pub async fn update(
    Extension(svc): Extension<Arc<CalculationService>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<CalculationModel>,
) -> ApiResult<Json<CalculationModel>> {
    info!(id, "Update calculation API call");
    let updated = svc.update(id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// Handler for DELETE /calculations/{id}
pub async fn delete(
    Extension(svc): Extension<Arc<CalculationService>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    info!(id, "Delete calculation API call");
    svc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::server::{router, APPLICATION_PROBLEM_JSON};
    use crate::test_utils::{fixed_time, sample_calculation, service_with};
    use crate::traits::MockCalculationRepository;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use tower::ServiceExt as _;

    async fn send(
        repo: MockCalculationRepository,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        let app = router(service_with(repo));
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Failed to parse JSON")
    }

    #[tokio::test]
    async fn test_health() {
        let resp = send(MockCalculationRepository::new(), "GET", "/health", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_history_empty_is_not_found() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_get_all().returning(|| Ok(vec![]));

        let resp = send(repo, "GET", "/calculations/history", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let problem = json_body(resp).await;
        assert_eq!(problem["detail"], "History is empty");
    }

    #[tokio::test]
    async fn test_history_lists_records() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_get_all()
            .returning(|| Ok(vec![sample_calculation(2), sample_calculation(1)]));

        let resp = send(repo, "GET", "/calculations/history", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["id"], 2);
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(sample_calculation(id))));

        let resp = send(repo, "GET", "/calculations/5", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["id"], 5);
        assert_eq!(body["type"], "Addition");
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let resp = send(repo, "GET", "/calculations/5", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_by_id_non_numeric() {
        let resp = send(MockCalculationRepository::new(), "GET", "/calculations/abc", None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );
        let problem = json_body(resp).await;
        assert_eq!(problem["title"], "Bad Request");
        assert_eq!(problem["status"], 400);
    }

    #[tokio::test]
    async fn test_search_no_matches() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_search().returning(|_| Ok(vec![]));

        let resp = send(repo, "GET", "/calculations/search/Divide", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_decodes_predicate() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_search()
            .withf(|p| p == "3 + 5")
            .returning(|_| Ok(vec![sample_calculation(1)]));

        let resp = send(repo, "GET", "/calculations/search/3%20+%205", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_returns_created_with_location() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_create().returning(|new| Ok(new.with_id(11)));

        let resp = send(
            repo,
            "POST",
            "/calculations",
            Some(json!({ "expression": "2+3*4" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/calculations/11"
        );
        let body = json_body(resp).await;
        assert_eq!(body["type"], "Combine");
        assert_eq!(body["result"], 20.0);
        assert_eq!(body["createDate"], json!(fixed_time()));
    }

    #[tokio::test]
    async fn test_create_division_by_zero() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_create().returning(|new| Ok(new.with_id(1)));

        let resp = send(
            repo,
            "POST",
            "/calculations",
            Some(json!({ "expression": "8/0" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(json_body(resp).await["result"], "Infinity");
    }

    #[tokio::test]
    async fn test_create_parse_error_is_bad_request() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_create().never();

        let resp = send(
            repo,
            "POST",
            "/calculations",
            Some(json!({ "expression": "5#5" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let problem = json_body(resp).await;
        assert_eq!(problem["title"], "Invalid Expression");
        assert!(problem["detail"].as_str().unwrap().contains("'#'"));
    }

    #[tokio::test]
    async fn test_create_too_long_is_unprocessable() {
        let resp = send(
            MockCalculationRepository::new(),
            "POST",
            "/calculations",
            Some(json!({ "expression": "1".repeat(101) })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_ok() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_update().times(1).returning(Ok);

        let body = serde_json::to_value(CalculationModel::from(sample_calculation(3))).unwrap();
        let resp = send(repo, "PUT", "/calculations/3", Some(body.clone())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, body);
    }

    #[tokio::test]
    async fn test_update_id_mismatch() {
        let body = serde_json::to_value(CalculationModel::from(sample_calculation(3))).unwrap();
        let resp = send(
            MockCalculationRepository::new(),
            "PUT",
            "/calculations/4",
            Some(body),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_update()
            .returning(|c| Err(StorageError::CalculationNotFound { id: c.id }));

        let body = serde_json::to_value(CalculationModel::from(sample_calculation(3))).unwrap();
        let resp = send(repo, "PUT", "/calculations/3", Some(body)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_field_is_unprocessable() {
        let resp = send(
            MockCalculationRepository::new(),
            "PUT",
            "/calculations/3",
            Some(json!({ "id": 3, "expression": "1+1" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );
        let problem = json_body(resp).await;
        assert_eq!(problem["title"], "Unprocessable Entity");
        assert!(problem["detail"].as_str().unwrap().contains("type"));
    }

    #[tokio::test]
    async fn test_delete_no_content() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(()));

        let resp = send(repo, "DELETE", "/calculations/3", None).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_delete()
            .returning(|id| Err(StorageError::CalculationNotFound { id }));

        let resp = send(repo, "DELETE", "/calculations/3", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_error() {
        let mut repo = MockCalculationRepository::new();
        repo.expect_get_all().returning(|| {
            Err(StorageError::ConnectionFailed {
                message: "locked".into(),
            })
        });

        let resp = send(repo, "GET", "/calculations/history", None).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
