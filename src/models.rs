use crate::sizes::{CALZADO, FAJA, PANTALON, REMERA};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Inbound Models ============

/// A lookup request whose shape has been recognized but not yet validated.
///
/// Built from the raw JSON body by [`crate::validation::parse_lookup_request`].
#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    /// Lookup by mobile phone number.
    Phone {
        /// Phone number as sent by the caller, coerced to a string.
        celular: String,
        /// Company identifier, forwarded untouched.
        empresa: Value,
    },
    /// Lookup by national ID plus birth date.
    DniDob {
        /// National ID, coerced to a string.
        dni: String,
        /// Birth date, expected as `YYYY-MM-DD`.
        fnac: String,
        /// Company identifier, forwarded untouched.
        empresa: Value,
    },
}

// ============ Upstream Models ============

/// Normalized body sent to the employee info service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UpstreamPayload {
    Phone {
        celular: String,
        empresa: Value,
    },
    DniDob {
        dni: String,
        fnac: String,
        empresa: Value,
    },
}

impl UpstreamPayload {
    /// Short label of the lookup mode, used in logs.
    pub fn mode(&self) -> &'static str {
        match self {
            UpstreamPayload::Phone { .. } => "phone",
            UpstreamPayload::DniDob { .. } => "dni+fnac",
        }
    }
}

/// Top-level envelope returned by the employee info service.
///
/// `resultado` is an object on success and an array when no employee matched,
/// so it is kept as raw JSON until the client inspects it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub resultado: Value,
}

/// The object form of `resultado`.
#[derive(Debug, Clone, Deserialize)]
pub struct Resultado {
    /// Upstream status code. Only logged.
    #[serde(default)]
    pub codigo: Option<Value>,
    /// Upstream status message. Only logged, so any JSON type is accepted.
    #[serde(default)]
    pub mensaje: Option<Value>,
    /// The employee record.
    pub datos: EmployeeRecord,
}

/// Field holding the size catalog in `datos`.
pub const TALLES_FIELD: &str = "talles";

/// Session token issued by the upstream. Never returned to callers.
pub const TOKEN_FIELD: &str = "token";

/// Employee data as returned in `resultado.datos`, in upstream key order.
///
/// Kept as a raw map so that null codes, unknown attributes and odd catalog
/// entries survive untouched. The typed accessors below cover the fields the
/// size filter reads.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EmployeeRecord {
    pub attributes: Map<String, Value>,
}

impl EmployeeRecord {
    /// The employee's code for a size category, read from `talle_<category>`.
    ///
    /// Only `calzado`, `pantalon`, `remera` and `faja` carry codes. A `null` code is
    /// returned as `Some(&Value::Null)`; an absent one as `None`.
    pub fn size_code(&self, category: &str) -> Option<&Value> {
        let field = match category {
            CALZADO => "talle_calzado",
            PANTALON => "talle_pantalon",
            REMERA => "talle_remera",
            FAJA => "talle_faja",
            _ => return None,
        };
        self.attributes.get(field)
    }

    /// Catalog groups from `talles`. Anything other than an array yields no groups.
    pub fn size_catalogs(&self) -> &[Value] {
        self.attributes
            .get(TALLES_FIELD)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ============ Response Models ============

/// Employee data returned to the caller, with `talles` reduced to the employee's own sizes.
///
/// Keys keep the upstream order; `talles` stays where it was in the input.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FilteredResult {
    pub attributes: Map<String, Value>,
}

impl FilteredResult {
    /// Category name to the single matching size entry.
    pub fn talles(&self) -> Option<&Map<String, Value>> {
        self.attributes.get(TALLES_FIELD).and_then(Value::as_object)
    }
}
