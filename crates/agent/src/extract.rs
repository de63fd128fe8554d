//! Request field extraction.
//!
//! Requests arrive as untyped JSON mappings; these helpers pull typed
//! fields out with the specific error wording the response contract needs.

use muster_core::error::RequestError;
use serde_json::Value;

/// A string field that must be present.
pub(crate) fn required_str<'a>(
    request: &'a Value,
    field: &'static str,
) -> Result<&'a str, RequestError> {
    match request.get(field) {
        None | Some(Value::Null) => Err(RequestError::MissingField(field)),
        Some(value) => value.as_str().ok_or(RequestError::InvalidField {
            field,
            reason: "expected a string".into(),
        }),
    }
}

/// A string field that may be absent.
pub(crate) fn optional_str<'a>(request: &'a Value, field: &str) -> Option<&'a str> {
    request.get(field).and_then(Value::as_str)
}

/// An integer field that must be present. Signed: quantity updates accept
/// negative deltas.
pub(crate) fn required_i64(request: &Value, field: &'static str) -> Result<i64, RequestError> {
    match request.get(field) {
        None | Some(Value::Null) => Err(RequestError::MissingField(field)),
        Some(value) => value.as_i64().ok_or(RequestError::InvalidField {
            field,
            reason: "expected an integer".into(),
        }),
    }
}

/// A unit count: present and non-negative.
pub(crate) fn required_u32(request: &Value, field: &'static str) -> Result<u32, RequestError> {
    let raw = required_i64(request, field)?;
    u32::try_from(raw).map_err(|_| RequestError::InvalidField {
        field,
        reason: "must be a non-negative integer".into(),
    })
}

/// A boolean flag, `false` when absent.
pub(crate) fn optional_bool(request: &Value, field: &'static str) -> Result<bool, RequestError> {
    match request.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(value) => value.as_bool().ok_or(RequestError::InvalidField {
            field,
            reason: "expected a boolean".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_str_distinguishes_missing_from_wrong_type() {
        let request = json!({"name": "Drone", "quantity": 5});
        assert_eq!(required_str(&request, "name").unwrap(), "Drone");

        let err = required_str(&request, "team_id").unwrap_err();
        assert_eq!(err.to_string(), "team_id is required");

        let err = required_str(&request, "quantity").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for quantity: expected a string");
    }

    #[test]
    fn null_counts_as_missing() {
        let request = json!({"name": null});
        assert_eq!(
            required_str(&request, "name").unwrap_err(),
            RequestError::MissingField("name")
        );
        assert!(optional_str(&request, "name").is_none());
    }

    #[test]
    fn unit_counts_reject_negatives_and_fractions() {
        assert_eq!(required_u32(&json!({"quantity": 2}), "quantity").unwrap(), 2);

        let err = required_u32(&json!({"quantity": -2}), "quantity").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for quantity: must be a non-negative integer"
        );

        let err = required_u32(&json!({"quantity": 2.5}), "quantity").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for quantity: expected an integer");
    }

    #[test]
    fn signed_integers_pass_through() {
        assert_eq!(required_i64(&json!({"quantity": -8}), "quantity").unwrap(), -8);
    }

    #[test]
    fn replace_flag_defaults_to_false() {
        assert!(!optional_bool(&json!({}), "replace").unwrap());
        assert!(optional_bool(&json!({"replace": true}), "replace").unwrap());
        assert!(optional_bool(&json!({"replace": "yes"}), "replace").is_err());
    }

    #[test]
    fn non_object_requests_have_no_fields() {
        let request = json!("just a string");
        assert_eq!(
            required_str(&request, "name").unwrap_err(),
            RequestError::MissingField("name")
        );
    }
}
