use crate::config::Config;
use crate::employee_client::{EmployeeInfoClient, LookupOutcome};
use crate::errors::AppError;
use crate::sizes::filter_sizes;
use crate::validation::select_request;
use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the upstream employee info service.
    pub employee_client: EmployeeInfoClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let employee_client =
            EmployeeInfoClient::new(config.employee_info_url.clone(), config.auth_header.clone())?;
        Ok(Self {
            config,
            employee_client,
        })
    }
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/employees/lookup
///
/// Looks up one employee by phone (`celular` + `empresa`) or by national ID and
/// birth date (`dni` + `fnac` + `empresa`), and returns the record with its size
/// catalog reduced to the employee's own sizes.
///
/// Flow:
/// 1. Reject anything but POST.
/// 2. Parse the body as JSON.
/// 3. Select and validate the lookup mode.
/// 4. Query the employee info service once.
/// 5. Map upstream errors and "not found" answers.
/// 6. Filter the size catalog and answer with pretty-printed JSON.
pub async fn lookup_employee(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    if request.method() != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let bytes = axum::body::to_bytes(request.into_body(), state.config.body_limit_bytes)
        .await
        .map_err(|e| AppError::MalformedBody(e.to_string()))?;
    let payload: Value =
        serde_json::from_slice(&bytes).map_err(|e| AppError::MalformedBody(e.to_string()))?;

    let upstream_payload = select_request(&payload)?;

    let record = match state.employee_client.lookup(&upstream_payload).await? {
        LookupOutcome::Found(record) => record,
        LookupOutcome::NotFound => return Err(AppError::NotFound),
    };

    let filtered = filter_sizes(record);
    tracing::info!(
        "Employee lookup succeeded ({} sizes matched)",
        filtered.talles().map_or(0, |talles| talles.len())
    );

    let body = serde_json::to_string_pretty(&filtered)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
