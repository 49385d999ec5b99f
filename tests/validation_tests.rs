/// Unit tests for request validation
/// Tests phone normalization, birth date validation and lookup mode selection
use employee_lookup_api::errors::ValidationError;
use employee_lookup_api::models::{LookupRequest, UpstreamPayload};
use employee_lookup_api::validation::{
    is_valid_iso_date, normalize_phone, parse_lookup_request, select_request,
};
use serde_json::json;

#[cfg(test)]
mod phone_normalization_tests {
    use super::*;

    #[test]
    fn test_international_prefix_removed() {
        assert_eq!(normalize_phone("5491112345678"), "1112345678");
        assert_eq!(normalize_phone("5493514567890"), "3514567890");
    }

    #[test]
    fn test_local_numbers_untouched() {
        assert_eq!(normalize_phone("1112345678"), "1112345678");
        assert_eq!(normalize_phone("54 9 11 1234-5678"), "54 9 11 1234-5678");
        assert_eq!(normalize_phone("0549"), "0549");
        assert_eq!(normalize_phone(""), "");
    }
}

#[cfg(test)]
mod birth_date_tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert!(is_valid_iso_date("1996-12-16"));
        assert!(is_valid_iso_date("2024-02-29"));
        assert!(is_valid_iso_date("2000-02-29"));
        assert!(is_valid_iso_date("1999-12-31"));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(!is_valid_iso_date("2025-02-31"));
        assert!(!is_valid_iso_date("2025-13-01"));
        assert!(!is_valid_iso_date("2025-00-10"));
        assert!(!is_valid_iso_date("2023-02-29"));
        assert!(!is_valid_iso_date("1900-02-29"));
        assert!(!is_valid_iso_date("2025-06-31"));
    }

    #[test]
    fn test_malformed_dates() {
        assert!(!is_valid_iso_date("96-12-16"));
        assert!(!is_valid_iso_date("1996/12/16"));
        assert!(!is_valid_iso_date("1996-12-16 "));
        assert!(!is_valid_iso_date("abcd-ef-gh"));
    }
}

#[cfg(test)]
mod selection_tests {
    use super::*;

    #[test]
    fn test_phone_shape_recognized() {
        let request = parse_lookup_request(&json!({ "celular": "5491112345678", "empresa": 1 }));
        assert_eq!(
            request,
            Ok(LookupRequest::Phone {
                celular: "5491112345678".to_string(),
                empresa: json!(1),
            })
        );
    }

    #[test]
    fn test_phone_wins_over_dni() {
        let payload = select_request(&json!({
            "celular": "5491112345678",
            "dni": "30111222",
            "fnac": "1996-12-16",
            "empresa": 1
        }))
        .unwrap();

        assert_eq!(
            payload,
            UpstreamPayload::Phone {
                celular: "1112345678".to_string(),
                empresa: json!(1),
            }
        );
    }

    #[test]
    fn test_dni_payload_serializes_flat() {
        let payload =
            select_request(&json!({ "dni": "30111222", "fnac": "1996-12-16", "empresa": 5 }))
                .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "dni": "30111222", "fnac": "1996-12-16", "empresa": 5 })
        );
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            select_request(&json!({})),
            Err(ValidationError::MissingParameters)
        );
        assert_eq!(
            select_request(&json!({ "celular": "549", "empresa": 1 })),
            Err(ValidationError::EmptyPhoneAfterNormalization)
        );
        assert_eq!(
            select_request(&json!({ "dni": "3011122a", "fnac": "1996-12-16", "empresa": 1 })),
            Err(ValidationError::InvalidDni)
        );
        assert_eq!(
            select_request(&json!({ "dni": "30111222", "fnac": "16-12-1996", "empresa": 1 })),
            Err(ValidationError::InvalidBirthDate)
        );
    }

    #[test]
    fn test_dni_checked_before_birth_date() {
        assert_eq!(
            select_request(&json!({ "dni": "1", "fnac": "bad", "empresa": 1 })),
            Err(ValidationError::InvalidDni)
        );
    }
}
