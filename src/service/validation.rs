//! Request validation for resource schemas.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Minimum length of every resource name.
pub const MIN_NAME_CHARS: usize = 3;

/// Field-level checks run by the service before any SQL is issued.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// `value` must have at least `min` characters (not bytes).
pub fn min_chars(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.chars().count() < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}

/// Like [`min_chars`] but only when the field is present (partial updates).
pub fn min_chars_opt(field: &str, value: Option<&str>, min: usize) -> Result<(), AppError> {
    match value {
        Some(v) => min_chars(field, v, min),
        None => Ok(()),
    }
}

/// Take the payload embedded under `key` (e.g. `{"inventory": {...}}`) and deserialize it.
pub fn embedded<T: DeserializeOwned>(body: Value, key: &str) -> Result<T, AppError> {
    let Value::Object(mut map) = body else {
        return Err(AppError::Validation("body must be a JSON object".into()));
    };
    let inner = map
        .remove(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::Validation(format!("{} is required", key)))?;
    serde_json::from_value(inner).map_err(|e| AppError::Validation(format!("{}: {}", key, e)))
}

/// Path ids must be UUIDs.
pub fn parse_id(raw: &str) -> Result<uuid::Uuid, AppError> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation(format!("invalid id '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Thing {
        name: String,
    }

    #[test]
    fn min_chars_counts_characters() {
        assert!(min_chars("name", "ab", 3).is_err());
        assert!(min_chars("name", "", 3).is_err());
        assert!(min_chars("name", "abc", 3).is_ok());
        assert!(min_chars("name", "ñán", 3).is_ok());
        assert!(min_chars_opt("name", None, 3).is_ok());
        assert!(min_chars_opt("name", Some("x"), 3).is_err());
    }

    #[test]
    fn embedded_extracts_the_keyed_object() {
        let t: Thing = embedded(json!({"thing": {"name": "bolt"}}), "thing").unwrap();
        assert_eq!(t.name, "bolt");
    }

    #[test]
    fn embedded_errors_are_validation_errors() {
        for body in [
            json!([]),
            json!({}),
            json!({"thing": null}),
            json!({"thing": {"name": 5}}),
            json!({"other": {"name": "bolt"}}),
        ] {
            let err = embedded::<Thing>(body, "thing").unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[test]
    fn ids_must_be_uuids() {
        assert!(parse_id("abc123").is_err());
        assert!(parse_id("").is_err());
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
