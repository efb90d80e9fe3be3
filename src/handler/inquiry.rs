//! Inquiry endpoint
//!
//! `POST /api/submit-inquiry`: read the body, run it through `inquiry::process`
//! and answer with an `InquiryResponse`.

use crate::config::AppState;
use crate::error::InquiryError;
use crate::http;
use crate::inquiry::{self, InquiryResponse};
use crate::logger;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};

pub async fn submit_inquiry<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(state.config.http.max_body_size).unwrap_or(usize::MAX);

    let result = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => inquiry::process(&collected.to_bytes(), &state.validator),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_warning(&format!("Inquiry body exceeds {limit} bytes"));
            return http::build_413_response();
        }
        Err(e) => Err(InquiryError::Body(e.to_string())),
    };

    match result {
        Ok(inquiry) => {
            logger::log_inquiry_received(&inquiry);
            http::build_json_response(StatusCode::OK, &InquiryResponse::accepted())
        }
        Err(err) => {
            logger::log_inquiry_rejected(&err);
            http::build_json_response(
                err.status(),
                &InquiryResponse::rejected(err.public_message()),
            )
        }
    }
}
