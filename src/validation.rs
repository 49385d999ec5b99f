//! Input validation for lookup requests.
//!
//! Turns the untyped JSON body into a [`LookupRequest`], then validates and
//! normalizes it into the [`UpstreamPayload`] sent to the employee info service.

use crate::errors::ValidationError;
use crate::models::{LookupRequest, UpstreamPayload};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Country code plus mobile indicator prepended by international callers.
const MOBILE_PREFIX: &str = "549";

static DNI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,9}$").expect("DNI regex is valid"));

static ISO_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date regex is valid"));

/// Strip the international mobile prefix from a phone number.
///
/// `"5491112345678"` becomes `"1112345678"`. Anything not starting with `549`
/// is returned unchanged.
pub fn normalize_phone(phone: &str) -> String {
    phone.strip_prefix(MOBILE_PREFIX).unwrap_or(phone).to_string()
}

/// Strict `YYYY-MM-DD` check that also rejects impossible calendar dates.
pub fn is_valid_iso_date(s: &str) -> bool {
    if !ISO_DATE_REGEX.is_match(s) {
        return false;
    }

    let (Ok(year), Ok(month), Ok(day)) = (
        s[0..4].parse::<i32>(),
        s[5..7].parse::<u32>(),
        s[8..10].parse::<u32>(),
    ) else {
        return false;
    };

    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Whether `dni` is 7 to 9 ASCII digits.
pub fn is_valid_dni(dni: &str) -> bool {
    DNI_REGEX.is_match(dni)
}

/// A field counts as present when it exists and is neither null nor an empty string.
fn present<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload
        .get(key)
        .filter(|v| !v.is_null() && v.as_str() != Some(""))
}

/// String form of a JSON scalar: strings as-is, everything else as its JSON text.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Recognize which lookup mode the body asks for.
///
/// The phone flow wins whenever `celular` and `empresa` are both present, even if
/// `dni` and `fnac` are sent too.
pub fn parse_lookup_request(payload: &Value) -> Result<LookupRequest, ValidationError> {
    let empresa = present(payload, "empresa");

    if let (Some(celular), Some(empresa)) = (present(payload, "celular"), empresa) {
        return Ok(LookupRequest::Phone {
            celular: coerce_to_string(celular),
            empresa: empresa.clone(),
        });
    }

    match (present(payload, "dni"), present(payload, "fnac"), empresa) {
        (Some(dni), Some(fnac), Some(empresa)) => Ok(LookupRequest::DniDob {
            dni: coerce_to_string(dni),
            fnac: coerce_to_string(fnac),
            empresa: empresa.clone(),
        }),
        _ => Err(ValidationError::MissingParameters),
    }
}

impl LookupRequest {
    /// Validate the fields of the selected mode and build the upstream body.
    pub fn into_upstream_payload(self) -> Result<UpstreamPayload, ValidationError> {
        match self {
            LookupRequest::Phone { celular, empresa } => {
                let celular = normalize_phone(&celular);
                if celular.is_empty() {
                    return Err(ValidationError::EmptyPhoneAfterNormalization);
                }
                Ok(UpstreamPayload::Phone { celular, empresa })
            }
            LookupRequest::DniDob { dni, fnac, empresa } => {
                let dni = dni.trim();
                let fnac = fnac.trim();

                if !is_valid_dni(dni) {
                    return Err(ValidationError::InvalidDni);
                }
                if !is_valid_iso_date(fnac) {
                    return Err(ValidationError::InvalidBirthDate);
                }

                Ok(UpstreamPayload::DniDob {
                    dni: dni.to_string(),
                    fnac: fnac.to_string(),
                    empresa,
                })
            }
        }
    }
}

/// Select the lookup mode for `payload` and produce the normalized upstream body.
pub fn select_request(payload: &Value) -> Result<UpstreamPayload, ValidationError> {
    parse_lookup_request(payload)?.into_upstream_payload()
}
