//! Transport layer: gateway wire format (JSON body, Basic auth, status mapping).

mod request;
mod response;

pub use request::{
    JSON_CONTENT_TYPE, WireRequest, basic_authorization, encode_send_message_json, endpoint_url,
};
pub use response::{
    ErrorContext, MAX_BODY_CHARS, TRUNCATION_MARKER, WireResponse, classify, interpret_response,
    truncate_body,
};
