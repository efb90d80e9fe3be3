//! Inquiry payload types
//!
//! `InquiryRequest` is the body exactly as the page posts it; `Inquiry` is what
//! comes out of validation.

use std::num::FpCategory;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InquiryError;

/// Reply sent for a successful submission
pub const SUCCESS_MESSAGE: &str =
    "Thank you for your inquiry! We will contact you within 24 hours.";

/// Raw form submission. Fields keep whatever JSON value the client sent;
/// absent keys and `null` both deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub business_name: Option<Value>,
    pub requirements: Option<Value>,
    pub reference: Option<Value>,
}

impl InquiryRequest {
    /// Build a request from a parsed body.
    ///
    /// Objects are read field by field. Any other non-null value has no fields,
    /// so it reads as an empty submission; a bare `null` cannot be read at all.
    pub fn from_payload(payload: Value) -> Result<Self, InquiryError> {
        match payload {
            Value::Object(_) => Ok(serde_json::from_value(payload)?),
            Value::Null => Err(InquiryError::NullBody),
            _ => Ok(Self::default()),
        }
    }
}

/// Text of a field value, or `None` when the value is falsy
/// (`null`, `false`, `0` or `""`). Numbers, booleans and nested
/// values are rendered as JSON text.
pub fn field_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.classify() == FpCategory::Zero) => None,
        other => Some(other.to_string()),
    }
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub requirements: String,
    pub reference: String,
}

/// JSON body of every inquiry endpoint reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InquiryResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let req: InquiryRequest = serde_json::from_str(
            r#"{"name":"Jo","businessName":"Jo's Shop","reference":null,"extra":1}"#,
        )
        .unwrap();
        assert_eq!(req.name, Some(Value::from("Jo")));
        assert_eq!(req.business_name, Some(Value::from("Jo's Shop")));
        assert!(req.email.is_none());
        assert!(req.reference.is_none());
    }

    #[test]
    fn test_from_payload_shapes() {
        let req = InquiryRequest::from_payload(serde_json::json!({"name": 7})).unwrap();
        assert_eq!(req.name, Some(Value::from(7)));

        for payload in [serde_json::json!([]), serde_json::json!("x"), serde_json::json!(5)] {
            let req = InquiryRequest::from_payload(payload).unwrap();
            assert!(req.name.is_none());
        }

        let err = InquiryRequest::from_payload(Value::Null).unwrap_err();
        assert!(matches!(err, InquiryError::NullBody));
    }

    #[test]
    fn test_field_text_truthiness() {
        for falsy in [
            Value::Null,
            Value::Bool(false),
            Value::from(0),
            Value::from(0.0),
            Value::from(""),
        ] {
            assert_eq!(field_text(Some(falsy.clone())), None, "{falsy}");
        }
        assert_eq!(field_text(None), None);

        assert_eq!(field_text(Some(Value::from("Jo"))).as_deref(), Some("Jo"));
        assert_eq!(field_text(Some(Value::from(7))).as_deref(), Some("7"));
        assert_eq!(field_text(Some(Value::Bool(true))).as_deref(), Some("true"));
        assert_eq!(field_text(Some(serde_json::json!([]))).as_deref(), Some("[]"));
        assert_eq!(field_text(Some(Value::from(" "))).as_deref(), Some(" "));
    }

    #[test]
    fn test_response_shape() {
        let ok = serde_json::to_value(InquiryResponse::accepted()).unwrap();
        assert_eq!(
            ok,
            serde_json::json!({"success": true, "message": SUCCESS_MESSAGE})
        );

        let err = serde_json::to_value(InquiryResponse::rejected("name is required")).unwrap();
        assert_eq!(
            err,
            serde_json::json!({"success": false, "error": "name is required"})
        );
    }
}
