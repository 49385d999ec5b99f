use crate::errors::{truncate_chars, AppError, UPSTREAM_DETAIL_MAX_CHARS};
use crate::models::{EmployeeRecord, Resultado, UpstreamPayload, UpstreamResponse};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

/// What the employee info service answered for a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(EmployeeRecord),
    /// `resultado` came back as an array.
    NotFound,
}

/// Client for the upstream employee info service.
#[derive(Clone)]
pub struct EmployeeInfoClient {
    client: reqwest::Client,
    url: String,
    auth_header: String,
}

impl EmployeeInfoClient {
    /// Creates a new `EmployeeInfoClient`.
    ///
    /// # Arguments
    ///
    /// * `url` - Endpoint of the employee info service.
    /// * `auth_header` - Value sent verbatim as the `Authorization` header.
    pub fn new(url: String, auth_header: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            AppError::InternalError(format!("Failed to create employee info client: {}", e))
        })?;

        Ok(Self {
            client,
            url,
            auth_header,
        })
    }

    /// Looks up one employee.
    ///
    /// Sends exactly one POST with `payload` as the JSON body. No retries.
    ///
    /// # Returns
    ///
    /// * `Ok(LookupOutcome)` - The employee record, or `NotFound`.
    /// * `Err(AppError::UpstreamFailure)` - The service answered with a non-success status.
    /// * `Err(AppError::UpstreamUnreachable)` - The request could not be sent.
    pub async fn lookup(&self, payload: &UpstreamPayload) -> Result<LookupOutcome, AppError> {
        tracing::info!("Querying employee info service ({} lookup)", payload.mode());

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, self.auth_header.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamUnreachable(format!("Employee info request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            // An unreadable body only loses the diagnostic detail
            let detalle = response
                .text()
                .await
                .ok()
                .map(|text| truncate_chars(&text, UPSTREAM_DETAIL_MAX_CHARS));
            return Err(AppError::UpstreamFailure {
                status: status.as_u16(),
                detalle,
            });
        }

        let body: UpstreamResponse = response.json().await.map_err(|e| {
            AppError::InternalError(format!(
                "Respuesta inválida del servicio de empleados: {}",
                e
            ))
        })?;

        interpret_response(body)
    }
}

/// Splits a successful upstream body into found / not found.
pub fn interpret_response(body: UpstreamResponse) -> Result<LookupOutcome, AppError> {
    match body.resultado {
        Value::Array(_) => {
            tracing::info!("Employee info service found no match");
            Ok(LookupOutcome::NotFound)
        }
        resultado => {
            let resultado: Resultado = serde_json::from_value(resultado).map_err(|e| {
                AppError::InternalError(format!(
                    "Respuesta inválida del servicio de empleados: {}",
                    e
                ))
            })?;
            tracing::debug!(
                "Employee info service answered codigo={:?} mensaje={:?}",
                resultado.codigo,
                resultado.mensaje
            );
            Ok(LookupOutcome::Found(resultado.datos))
        }
    }
}
