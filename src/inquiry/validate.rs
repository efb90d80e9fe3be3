//! Inquiry validation
//!
//! Required fields are checked in a fixed order and the first missing one is
//! reported. Strict mode adds the same email/phone format checks the landing
//! page runs in the browser.

use regex::Regex;
use serde_json::Value;

use super::model::{field_text, Inquiry, InquiryRequest};
use crate::error::InquiryError;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[0-9\s+\-()]+$";
const PHONE_MIN_LEN: usize = 10;

const INVALID_EMAIL: &str = "Please enter a valid email address.";
const INVALID_PHONE: &str = "Please enter a valid phone number.";

struct FormatRules {
    email: Regex,
    phone: Regex,
}

/// Turns an `InquiryRequest` into an `Inquiry` or the first problem found
pub struct InquiryValidator {
    strict: Option<FormatRules>,
}

impl InquiryValidator {
    pub fn new(strict: bool) -> Result<Self, regex::Error> {
        let strict = if strict {
            Some(FormatRules {
                email: Regex::new(EMAIL_PATTERN)?,
                phone: Regex::new(PHONE_PATTERN)?,
            })
        } else {
            None
        };
        Ok(Self { strict })
    }

    pub const fn is_strict(&self) -> bool {
        self.strict.is_some()
    }

    pub fn validate(&self, req: InquiryRequest) -> Result<Inquiry, InquiryError> {
        let name = self.required("name", req.name)?;
        let email = self.required("email", req.email)?;
        let phone = self.required("phone", req.phone)?;
        let business_name = self.required("businessName", req.business_name)?;
        let requirements = self.required("requirements", req.requirements)?;

        if let Some(rules) = &self.strict {
            if !rules.email.is_match(&email) {
                return Err(InquiryError::InvalidField {
                    field: "email",
                    message: INVALID_EMAIL,
                });
            }
            if !rules.phone.is_match(&phone) || phone.chars().count() < PHONE_MIN_LEN {
                return Err(InquiryError::InvalidField {
                    field: "phone",
                    message: INVALID_PHONE,
                });
            }
        }

        Ok(Inquiry {
            name,
            email,
            phone,
            business_name,
            requirements,
            reference: match req.reference {
                Some(Value::String(s)) => s,
                _ => String::new(),
            },
        })
    }

    fn required(&self, field: &'static str, value: Option<Value>) -> Result<String, InquiryError> {
        match field_text(value) {
            Some(v) if !self.is_blank(&v) => Ok(v),
            _ => Err(InquiryError::MissingField(field)),
        }
    }

    fn is_blank(&self, value: &str) -> bool {
        if self.is_strict() {
            value.trim().is_empty()
        } else {
            value.is_empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<Value> {
        Some(Value::from(value))
    }

    fn full_request() -> InquiryRequest {
        InquiryRequest {
            name: text("Jo"),
            email: text("jo@x.com"),
            phone: text("0811234567"),
            business_name: text("Jo's Shop"),
            requirements: text("need a site"),
            reference: None,
        }
    }

    fn missing_field(err: InquiryError) -> &'static str {
        match err {
            InquiryError::MissingField(field) => field,
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_complete_request() {
        let validator = InquiryValidator::new(false).unwrap();
        let inquiry = validator.validate(full_request()).unwrap();
        assert_eq!(inquiry.name, "Jo");
        assert_eq!(inquiry.business_name, "Jo's Shop");
        assert_eq!(inquiry.reference, "");
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let validator = InquiryValidator::new(false).unwrap();
        let cases: [(&str, fn(&mut InquiryRequest)); 5] = [
            ("name", |r| r.name = None),
            ("email", |r| r.email = text("")),
            ("phone", |r| r.phone = None),
            ("businessName", |r| r.business_name = text("")),
            ("requirements", |r| r.requirements = None),
        ];

        for (field, clear) in cases {
            let mut req = full_request();
            clear(&mut req);
            let err = validator.validate(req).unwrap_err();
            assert_eq!(missing_field(err), field);
        }
    }

    #[test]
    fn test_first_missing_field_wins() {
        let validator = InquiryValidator::new(false).unwrap();
        let req = InquiryRequest {
            phone: None,
            requirements: None,
            ..full_request()
        };
        assert_eq!(missing_field(validator.validate(req).unwrap_err()), "phone");

        let err = validator.validate(InquiryRequest::default()).unwrap_err();
        assert_eq!(missing_field(err), "name");
    }

    #[test]
    fn test_lenient_mode_accepts_any_non_empty_strings() {
        let validator = InquiryValidator::new(false).unwrap();
        let req = InquiryRequest {
            email: text("not an email"),
            phone: text("12"),
            name: text(" "),
            ..full_request()
        };
        assert!(validator.validate(req).is_ok());
    }

    #[test]
    fn test_reference_is_kept() {
        let validator = InquiryValidator::new(false).unwrap();
        let req = InquiryRequest {
            reference: text("https://example.com"),
            ..full_request()
        };
        assert_eq!(
            validator.validate(req).unwrap().reference,
            "https://example.com"
        );
    }

    #[test]
    fn test_reference_must_be_text() {
        let validator = InquiryValidator::new(false).unwrap();
        let req = InquiryRequest {
            reference: Some(Value::from(5)),
            ..full_request()
        };
        assert_eq!(validator.validate(req).unwrap().reference, "");
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let validator = InquiryValidator::new(false).unwrap();
        for falsy in [Value::Bool(false), Value::from(0), Value::Null] {
            let req = InquiryRequest {
                email: Some(falsy),
                ..full_request()
            };
            assert_eq!(missing_field(validator.validate(req).unwrap_err()), "email");
        }
    }

    #[test]
    fn test_strict_mode_checks_email() {
        let validator = InquiryValidator::new(true).unwrap();
        for bad in ["jo@x", "jo x@y.com", "@x.com", "jo@@x.com"] {
            let req = InquiryRequest {
                email: text(bad),
                ..full_request()
            };
            let err = validator.validate(req).unwrap_err();
            assert!(
                matches!(err, InquiryError::InvalidField { field: "email", .. }),
                "{bad} should be rejected"
            );
            assert_eq!(err.public_message(), INVALID_EMAIL);
        }
    }

    #[test]
    fn test_strict_mode_checks_phone() {
        let validator = InquiryValidator::new(true).unwrap();
        for bad in ["12345", "081-123-45x7", "+264 81 1", "١٢٣٤٥", "٠٨١١٢٣٤٥٦٧"] {
            let req = InquiryRequest {
                phone: text(bad),
                ..full_request()
            };
            let err = validator.validate(req).unwrap_err();
            assert!(
                matches!(err, InquiryError::InvalidField { field: "phone", .. }),
                "{bad} should be rejected"
            );
        }

        let req = InquiryRequest {
            phone: text("+264 (81) 123-4567"),
            ..full_request()
        };
        assert!(validator.validate(req).is_ok());
    }

    #[test]
    fn test_strict_mode_treats_whitespace_as_missing() {
        let validator = InquiryValidator::new(true).unwrap();
        let req = InquiryRequest {
            requirements: text("   "),
            ..full_request()
        };
        assert_eq!(
            missing_field(validator.validate(req).unwrap_err()),
            "requirements"
        );
    }

    #[test]
    fn test_presence_checked_before_format() {
        let validator = InquiryValidator::new(true).unwrap();
        let req = InquiryRequest {
            email: text("bad"),
            name: None,
            ..full_request()
        };
        assert_eq!(missing_field(validator.validate(req).unwrap_err()), "name");
    }
}
