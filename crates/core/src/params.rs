//! Helpers for reading typed overrides out of a `serde_json::Value` object.
//!
//! Missing keys and wrong types fall back to the provided default, so a
//! partial override object like `{"density": 10000}` is always usable.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"max_speed": 0.5});
        assert!((param_f64(&params, "max_speed", 0.25) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"density": 10000});
        assert!((param_f64(&params, "density", 0.0) - 10000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing_or_null() {
        assert!((param_f64(&json!({}), "density", 3.0) - 3.0).abs() < f64::EPSILON);
        assert!((param_f64(&json!({"density": null}), "density", 5.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"density": "dense"});
        assert!((param_f64(&params, "density", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        assert!((param_f64(&json!([1, 2]), "density", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_string_extracts_existing_string() {
        let params = json!({"palette": "ocean"});
        assert_eq!(param_string(&params, "palette", "violet"), "ocean");
    }

    #[test]
    fn param_string_returns_default_for_wrong_type() {
        let params = json!({"palette": 42});
        assert_eq!(param_string(&params, "palette", "violet"), "violet");
    }
}
