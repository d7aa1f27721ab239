//! HTTP request handlers for the certified payroll API.
//!
//! This module contains the router, the CORS layer builder, and the handler
//! functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Employee, Project, Signature, Stored, Submission, SubmissionStatus, TimesheetEntry,
};

use super::request::{
    GenerateRequest, ProjectWeekQuery, SignRequest, SignatureQuery, TimesheetBulkRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, BulkInsertResponse, CreatedResponse, HealthResponse,
    RootResponse, SignResponse,
};
use super::state::AppState;

/// Service name reported by `GET /`.
pub const SERVICE_NAME: &str = "PrevailPay";

const HEALTH_COLLECTION_LIMIT: usize = 10;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
///
/// CORS is not applied here; wrap the router with [`build_cors_layer`].
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/projects",
            post(create_project_handler).get(list_projects_handler),
        )
        .route(
            "/employees",
            post(create_employee_handler).get(list_employees_handler),
        )
        .route(
            "/timesheets",
            post(create_timesheet_handler).get(list_timesheets_handler),
        )
        .route("/timesheets/bulk", post(bulk_timesheets_handler))
        .route("/submissions", get(list_submissions_handler))
        .route("/submissions/generate", post(generate_handler))
        .route("/submissions/sign", post(sign_handler))
        .route("/signatures", get(list_signatures_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the CORS layer for the configured origins.
///
/// `"*"` mirrors the caller's origin and allows credentials. Any other list
/// is used as an exact allow-list; an origin that is not a valid header
/// value is an `InvalidConfig` error.
pub fn build_cors_layer(config: &ServerConfig) -> PayrollResult<CorsLayer> {
    if config.allows_any_origin() {
        return Ok(CorsLayer::very_permissive());
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| PayrollError::InvalidConfig {
                    field: "cors_origins".to_string(),
                    message: format!("'{}' is not a valid origin: {}", origin.escape_debug(), e),
                })
        })
        .collect::<PayrollResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Unwraps a JSON body, mapping extractor rejections to 400 responses.
fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps a query string, mapping rejections to 400 responses.
fn query_params<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(params)| params).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(
            correlation_id = %correlation_id,
            error = %body_text,
            "Query string rejected"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Logs a service failure and converts it to an error response.
fn failure(correlation_id: Uuid, err: PayrollError) -> ApiErrorResponse {
    match &err {
        PayrollError::Storage(store_err) => {
            error!(correlation_id = %correlation_id, error = %store_err, "Storage failure");
        }
        other => {
            warn!(correlation_id = %correlation_id, error = %other, "Request failed");
        }
    }
    err.into()
}

/// Handler for GET /.
async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        name: SERVICE_NAME.to_string(),
        message: "Certified payroll & compliance API running".to_string(),
    })
}

/// Handler for GET /health.
///
/// Always answers 200; a store failure is reported in the body.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.service().repository().store();

    let (status, collections, store_error) = match store.collections().await {
        Ok(mut names) => {
            names.truncate(HEALTH_COLLECTION_LIMIT);
            ("ok", names, None)
        }
        Err(err) => {
            warn!(backend = store.backend(), error = %err, "Health check could not reach store");
            ("error", Vec::new(), Some(err.to_string()))
        }
    };

    Json(HealthResponse {
        backend: store.backend().to_string(),
        status: status.to_string(),
        collections,
        error: store_error,
    })
}

/// Handler for POST /projects.
async fn create_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<Project>, JsonRejection>,
) -> ApiResult<CreatedResponse> {
    let correlation_id = Uuid::new_v4();
    let project = json_body(correlation_id, payload)?;

    let id = state
        .service()
        .create_project(&project)
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(CreatedResponse { id }))
}

/// Handler for GET /projects.
async fn list_projects_handler(State(state): State<AppState>) -> ApiResult<Vec<Stored<Project>>> {
    let correlation_id = Uuid::new_v4();
    let projects = state
        .service()
        .list_projects()
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(projects))
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<CreatedResponse> {
    let correlation_id = Uuid::new_v4();
    let employee = json_body(correlation_id, payload)?;

    let id = state
        .service()
        .create_employee(&employee)
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(CreatedResponse { id }))
}

/// Handler for GET /employees.
async fn list_employees_handler(
    State(state): State<AppState>,
) -> ApiResult<Vec<Stored<Employee>>> {
    let correlation_id = Uuid::new_v4();
    let employees = state
        .service()
        .list_employees()
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(employees))
}

/// Handler for POST /timesheets.
async fn create_timesheet_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimesheetEntry>, JsonRejection>,
) -> ApiResult<CreatedResponse> {
    let correlation_id = Uuid::new_v4();
    let entry = json_body(correlation_id, payload)?;

    let id = state
        .service()
        .record_timesheet(&entry)
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(CreatedResponse { id }))
}

/// Handler for POST /timesheets/bulk.
async fn bulk_timesheets_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimesheetBulkRequest>, JsonRejection>,
) -> ApiResult<BulkInsertResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        entries = request.entries.len(),
        "Processing timesheet upload"
    );

    let ids = state
        .service()
        .record_timesheets(&request.entries)
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(BulkInsertResponse {
        inserted: ids.len(),
        ids,
    }))
}

/// Handler for GET /timesheets.
async fn list_timesheets_handler(
    State(state): State<AppState>,
    query: Result<Query<ProjectWeekQuery>, QueryRejection>,
) -> ApiResult<Vec<Stored<TimesheetEntry>>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;

    let entries = state
        .service()
        .list_timesheets(query.project_id.as_deref(), query.week_ending)
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(entries))
}

/// Handler for POST /submissions/generate.
///
/// Returns the stored submission, including its `id`.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Stored<Submission>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        project_id = %request.project_id,
        week_ending = %request.week_ending,
        "Processing submission generation"
    );

    let submission = state
        .service()
        .generate_submission(&request.project_id, request.week_ending)
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(submission))
}

/// Handler for POST /submissions/sign.
async fn sign_handler(
    State(state): State<AppState>,
    payload: Result<Json<SignRequest>, JsonRejection>,
) -> ApiResult<SignResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;

    let signature_id = state
        .service()
        .sign_submission(
            &request.submission_id,
            &request.signer_name,
            &request.signer_title,
        )
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(SignResponse {
        signature_id,
        status: SubmissionStatus::Signed,
    }))
}

/// Handler for GET /submissions.
async fn list_submissions_handler(
    State(state): State<AppState>,
    query: Result<Query<ProjectWeekQuery>, QueryRejection>,
) -> ApiResult<Vec<Stored<Submission>>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;

    let submissions = state
        .service()
        .list_submissions(query.project_id.as_deref(), query.week_ending)
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(submissions))
}

/// Handler for GET /signatures.
async fn list_signatures_handler(
    State(state): State<AppState>,
    query: Result<Query<SignatureQuery>, QueryRejection>,
) -> ApiResult<Vec<Stored<Signature>>> {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;

    let signatures = state
        .service()
        .list_signatures(query.submission_id.as_deref())
        .await
        .map_err(|err| failure(correlation_id, err))?;
    Ok(Json(signatures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::PayrollService;
    use crate::store::{MemoryStore, PayrollRepository};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let repository = PayrollRepository::new(Arc::new(MemoryStore::new()));
        AppState::new(PayrollService::new(repository))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_reports_service_name() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], SERVICE_NAME);
    }

    #[tokio::test]
    async fn test_health_lists_collections() {
        let state = create_test_state();
        state
            .service()
            .create_employee(&Employee::new("Dana Ruiz"))
            .await
            .unwrap();

        let (status, body) = send(create_router(state), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "memory");
        assert_eq!(body["status"], "ok");
        assert_eq!(body["collections"], json!(["employee"]));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_create_then_list_projects() {
        let router = create_router(create_test_state());
        let project = json!({
            "name": "Route 9 Bridge",
            "wage_templates": [{"craft": "Electrician", "base_rate": "50.00", "fringe_rate": "5.00"}]
        });

        let (status, created) = send(router.clone(), post_json("/projects", project)).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, listed) = send(router, get_request("/projects")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["id"], id.as_str());
        assert_eq!(listed[0]["name"], "Route 9 Bridge");
        assert_eq!(listed[0]["wage_templates"][0]["apprentice_factor"], 0.6);
    }

    #[tokio::test]
    async fn test_generate_unknown_project_returns_404() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            post_json(
                "/submissions/generate",
                json!({"project_id": "missing", "week_ending": "2026-01-17"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PROJECT_NOT_FOUND");
        assert_eq!(body["message"], "Project not found");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            post_json("/submissions/generate", json!({"project_id": "p1"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/projects")
            .body(Body::from(r#"{"name": "X"}"#))
            .unwrap();

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_bad_query_date_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get_request("/timesheets?week_ending=last-friday")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn test_cors_wildcard_builds_permissive_layer() {
        assert!(build_cors_layer(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_cors_rejects_invalid_origin() {
        let config = ServerConfig {
            cors_origins: vec!["https://ok.example".to_string(), "bad\norigin".to_string()],
            ..ServerConfig::default()
        };

        match build_cors_layer(&config) {
            Err(PayrollError::InvalidConfig { field, .. }) => assert_eq!(field, "cors_origins"),
            other => panic!("Expected InvalidConfig, got {:?}", other.map(|_| ())),
        }
    }
}
