//! Reduces the upstream size catalog to the sizes assigned to one employee.

use crate::models::{EmployeeRecord, FilteredResult, TALLES_FIELD, TOKEN_FIELD};
use serde_json::{Map, Value};

pub const CALZADO: &str = "calzado";
pub const PANTALON: &str = "pantalon";
pub const REMERA: &str = "remera";
pub const FAJA: &str = "faja";

/// Project the catalog in `record.talles` down to one entry per category.
///
/// Within a category the first entry whose `codigo` equals the employee's code
/// is taken. Categories repeated in later catalog groups overwrite earlier
/// matches. Unknown categories and categories without a match are left out.
///
/// The result is rebuilt key by key in the input order: `talles` is replaced in
/// place and `token` is never carried over.
pub fn filter_sizes(record: EmployeeRecord) -> FilteredResult {
    let mut filtered = Some(match_sizes(&record));
    let mut attributes = Map::with_capacity(record.attributes.len());

    for (key, value) in record.attributes {
        match key.as_str() {
            TOKEN_FIELD => {}
            TALLES_FIELD => {
                if let Some(sizes) = filtered.take() {
                    attributes.insert(key, Value::Object(sizes));
                }
            }
            _ => {
                attributes.insert(key, value);
            }
        }
    }

    if let Some(sizes) = filtered {
        attributes.insert(TALLES_FIELD.to_string(), Value::Object(sizes));
    }

    FilteredResult { attributes }
}

/// Category name to the matching size entry.
///
/// Codes compare as JSON values without coercion (`"42" != 42`, `null == null`).
/// Entries without a `codigo` (including non-object entries) never match, and
/// neither does a category whose `talle_*` field is absent.
fn match_sizes(record: &EmployeeRecord) -> Map<String, Value> {
    let mut filtered = Map::new();

    for group in record.size_catalogs().iter().filter_map(Value::as_object) {
        for (tipo, entries) in group {
            let Some(code) = record.size_code(tipo) else {
                continue;
            };
            let Some(entries) = entries.as_array() else {
                continue;
            };

            if let Some(entry) = entries.iter().find(|entry| entry.get("codigo") == Some(code)) {
                filtered.insert(tipo.clone(), entry.clone());
            }
        }
    }

    filtered
}
