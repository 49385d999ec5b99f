use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::fmt;

/// Message returned when the upstream answers with a non-success status.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error del servicio de empleados";

/// Message returned when the upstream reports that no employee matched.
pub const NOT_FOUND_MESSAGE: &str = "No se encontró ningún empleado";

/// Fallback message for internal errors without a description.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno";

/// Maximum number of characters of the upstream body echoed back as `detalle`.
pub const UPSTREAM_DETAIL_MAX_CHARS: usize = 500;

/// Reasons a lookup request is rejected before any upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither `celular`+`empresa` nor `dni`+`fnac`+`empresa` were supplied.
    MissingParameters,
    /// The phone number was empty once the `549` prefix was stripped.
    EmptyPhoneAfterNormalization,
    /// `dni` is not 7 to 9 digits.
    InvalidDni,
    /// `fnac` is not a real `YYYY-MM-DD` date.
    InvalidBirthDate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationError::MissingParameters => {
                "Faltan parámetros: enviar celular y empresa, o dni, fnac y empresa"
            }
            ValidationError::EmptyPhoneAfterNormalization => {
                "El celular quedó vacío luego de normalizarlo"
            }
            ValidationError::InvalidDni => "DNI inválido: debe tener entre 7 y 9 dígitos",
            ValidationError::InvalidBirthDate => {
                "Fecha de nacimiento inválida: se espera el formato YYYY-MM-DD"
            }
        };
        f.write_str(message)
    }
}

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The endpoint only accepts POST.
    MethodNotAllowed,
    /// The request body is not valid JSON.
    MalformedBody(String),
    /// The request body failed validation.
    Validation(ValidationError),
    /// The upstream answered with a non-success status.
    UpstreamFailure {
        /// Status code returned by the upstream.
        status: u16,
        /// Leading part of the upstream body, if it could be read.
        detalle: Option<String>,
    },
    /// The upstream could not be reached.
    UpstreamUnreachable(String),
    /// The upstream reported that no employee matched.
    NotFound,
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::MalformedBody(msg) => write!(f, "Malformed body: {}", msg),
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::UpstreamFailure { status, .. } => {
                write!(f, "Employee info service returned {}", status)
            }
            AppError::UpstreamUnreachable(msg) => {
                write!(f, "Employee info service unreachable: {}", msg)
            }
            AppError::NotFound => write!(f, "Employee not found"),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Builds a JSON response with an explicit utf-8 charset.
pub fn json_response(status: StatusCode, body: &Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body.to_string(),
    )
        .into_response()
}

/// Example bodies included in the missing-parameters response.
fn missing_parameters_body(error: &ValidationError) -> Value {
    json!({
        "error": error.to_string(),
        "ejemplo_phone": { "celular": "5491112345678", "empresa": 1 },
        "ejemplo_dni_fnac": { "dni": "30111222", "fnac": "1996-12-16", "empresa": 1 },
    })
}

impl IntoResponse for AppError {
    /// Maps each error variant to a status code and JSON body, logging by severity.
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MethodNotAllowed => {
                let mut response = json_response(
                    StatusCode::METHOD_NOT_ALLOWED,
                    &json!({ "error": "Método no permitido" }),
                );
                response
                    .headers_mut()
                    .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
                return response;
            }
            AppError::MalformedBody(msg) => {
                tracing::warn!("Malformed request body: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::Validation(e @ ValidationError::MissingParameters) => {
                tracing::warn!("Rejected lookup: {}", e);
                (StatusCode::BAD_REQUEST, missing_parameters_body(e))
            }
            AppError::Validation(e) => {
                tracing::warn!("Rejected lookup: {}", e);
                (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() }))
            }
            AppError::UpstreamFailure { status, detalle } => {
                tracing::error!("Employee info service error {}: {:?}", status, detalle);
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    json!({
                        "error": UPSTREAM_ERROR_MESSAGE,
                        "status": status,
                        "detalle": detalle,
                    }),
                )
            }
            AppError::UpstreamUnreachable(msg) => {
                tracing::error!("Employee info service unreachable: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "No se pudo contactar al servicio de empleados" }),
                )
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "message": NOT_FOUND_MESSAGE }),
            ),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                let message = if msg.trim().is_empty() {
                    INTERNAL_ERROR_MESSAGE
                } else {
                    msg.as_str()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        json_response(status, &body)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamUnreachable(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Keeps at most `max_chars` characters of `text`, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
