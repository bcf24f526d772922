//! Request handlers.
//!
//! Employee resource handlers plus health and status endpoints. Every handler
//! converts failures into an [`ApiError`] so nothing escapes to the transport.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use roster_core::{Employee, EmployeeDraft, EmployeeId, EmployeePatch, Error, RequestId};

use crate::api::{error_response, ApiError, DeleteResponse, ErrorResponse, ServerStatus};
use crate::server::AppState;

type ApiResult<T> = std::result::Result<T, ApiError>;

// === Health Endpoints ===

pub(crate) async fn health() -> &'static str {
    "OK"
}

pub(crate) async fn ready(State(state): State<Arc<AppState>>) -> Response {
    match state.service.store().ping().await {
        Ok(()) => (StatusCode::OK, "Ready").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable").into_response()
        },
    }
}

pub(crate) async fn server_status(State(state): State<Arc<AppState>>) -> Json<ServerStatus> {
    let employee_count = match state.service.count().await {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(error = %e, "Could not count employees for status");
            None
        },
    };

    Json(ServerStatus {
        status: "running".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        employee_count,
    })
}

pub(crate) async fn route_not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorResponse::new("Route not found", "not_found_error"),
    )
}

// === Employee Collection ===

pub(crate) async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Employee>>> {
    let start = Instant::now();
    let request_id = RequestId::new();

    let employees = state
        .service
        .list()
        .await
        .map_err(ApiError::during("fetch employees"))?;

    tracing::debug!(
        request_id = %request_id,
        count = employees.len(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Listed employees"
    );
    Ok(Json(employees))
}

pub(crate) async fn create_employee(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    const ACTION: &str = "create employee";
    let start = Instant::now();
    let request_id = RequestId::new();

    let draft: EmployeeDraft = decode_body(ACTION, &body)?;
    tracing::debug!(request_id = %request_id, "Create employee request");

    let employee = state
        .service
        .create(draft)
        .await
        .map_err(ApiError::during(ACTION))?;

    tracing::debug!(
        request_id = %request_id,
        id = %employee.id,
        latency_ms = start.elapsed().as_millis() as u64,
        "Create employee finished"
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

// === Employee Item ===

pub(crate) async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    const ACTION: &str = "fetch employee";
    let request_id = RequestId::new();
    let id = parse_id(ACTION, &id)?;

    let employee = state
        .service
        .get(id)
        .await
        .map_err(ApiError::during(ACTION))?;

    tracing::debug!(request_id = %request_id, id = %id, "Fetched employee");
    Ok(Json(employee))
}

pub(crate) async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Employee>> {
    const ACTION: &str = "update employee";
    let start = Instant::now();
    let request_id = RequestId::new();

    let id = parse_id(ACTION, &id)?;
    let patch: EmployeePatch = decode_body(ACTION, &body)?;
    tracing::debug!(request_id = %request_id, id = %id, "Update employee request");

    let employee = state
        .service
        .update(id, patch)
        .await
        .map_err(ApiError::during(ACTION))?;

    tracing::debug!(
        request_id = %request_id,
        id = %id,
        latency_ms = start.elapsed().as_millis() as u64,
        "Update employee finished"
    );
    Ok(Json(employee))
}

pub(crate) async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    const ACTION: &str = "delete employee";
    let request_id = RequestId::new();
    let id = parse_id(ACTION, &id)?;

    state
        .service
        .delete(id)
        .await
        .map_err(ApiError::during(ACTION))?;

    tracing::debug!(request_id = %request_id, id = %id, "Deleted employee");
    Ok(Json(DeleteResponse::default()))
}

fn parse_id(action: &'static str, raw: &str) -> ApiResult<EmployeeId> {
    raw.parse::<EmployeeId>()
        .map_err(|_| ApiError::new(action, Error::invalid_request("Invalid employee id")))
}

/// Decodes a JSON body regardless of the request's `Content-Type`.
fn decode_body<T: DeserializeOwned>(action: &'static str, body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(action, error = %e, "Rejected request body");
        ApiError::new(action, Error::invalid_request("Invalid request body"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_body() {
        let draft: EmployeeDraft =
            decode_body("test", &Bytes::from_static(br#"{"name":"Ann","email":"a@x.com"}"#))
                .unwrap();
        assert_eq!(draft.name.as_deref(), Some("Ann"));
        assert_eq!(draft.position, None);

        let err = decode_body::<EmployeePatch>("test", &Bytes::new()).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().error.message, "Invalid request body");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("test", "12").unwrap(), EmployeeId(12));
        let err = parse_id("test", "1.5").unwrap_err();
        assert_eq!(err.body().error.message, "Invalid employee id");
    }
}
