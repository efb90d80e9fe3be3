//! Contact inquiry processing
//!
//! Parsing and validation of the landing page's inquiry form. Nothing is
//! stored; an accepted inquiry is only logged.

mod model;
mod validate;

pub use model::{Inquiry, InquiryRequest, InquiryResponse, SUCCESS_MESSAGE};
pub use validate::InquiryValidator;

use crate::error::InquiryError;

/// Parse a raw JSON body and validate it
pub fn process(body: &[u8], validator: &InquiryValidator) -> Result<Inquiry, InquiryError> {
    let payload: serde_json::Value = serde_json::from_slice(body)?;
    validator.validate(InquiryRequest::from_payload(payload)?)
}
