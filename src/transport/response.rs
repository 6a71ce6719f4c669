use std::borrow::Cow;

use serde::Deserialize;

use crate::domain::{DomainError, ErrorCode, MessageId};

pub const SUCCESS_STATUS: u16 = 200;
/// Longest response excerpt (in characters) quoted in an error message.
pub const MAX_BODY_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";

/// Expected success body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WireResponse {
    pub id: i64,
}

/// Optional error body some gateways send alongside a failure status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct ErrorInfo {
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

impl ErrorInfo {
    fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|info| info.error_code.is_some() || info.error_message.is_some())
    }

    fn describe(&self) -> String {
        match (self.error_code, self.error_message.as_deref()) {
            (Some(code), Some(text)) => format!(" (error {code}: {text})"),
            (Some(code), None) => format!(" (error {code})"),
            (None, Some(text)) => format!(" ({text})"),
            (None, None) => String::new(),
        }
    }
}

/// Who the error is about: the adapter name and the message id.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    pub adapter: &'a str,
    pub message_id: &'a MessageId,
}

pub fn decode_send_message_json_response(json: &str) -> Result<WireResponse, serde_json::Error> {
    serde_json::from_str(json)
}

/// Turn a gateway reply into either the accepted message id or a classified error.
pub fn interpret_response(
    status: u16,
    body: &str,
    context: &ErrorContext<'_>,
) -> Result<WireResponse, DomainError> {
    let parsed = decode_send_message_json_response(body);

    if status != SUCCESS_STATUS {
        return Err(classify(status, body, context));
    }

    parsed.map_err(|err| {
        DomainError::new(
            ErrorCode::MessageDeliveryError,
            format!(
                "unexpected response that could not be deserialized: {} {}: {err}: {}",
                context.adapter,
                context.message_id,
                truncate_body(body)
            ),
        )
    })
}

/// Map a non-success HTTP status and its body to a [`DomainError`].
pub fn classify(status: u16, body: &str, context: &ErrorContext<'_>) -> DomainError {
    let (code, summary) = match status {
        503 | 429 => (
            ErrorCode::TransportPendingError,
            "transport temporarily unavailable",
        ),
        500 => (
            ErrorCode::MessageTransmitError,
            "gateway failed to process the message",
        ),
        400 | 406 => (
            ErrorCode::IncorrectMessageDataError,
            "gateway rejected the message data",
        ),
        401 | 403 => (
            ErrorCode::TransportAuthorizeError,
            "gateway rejected the transport credentials",
        ),
        _ => (ErrorCode::MessageDeliveryError, "message delivery failed"),
    };

    let details = ErrorInfo::parse(body)
        .map(|info| info.describe())
        .unwrap_or_default();

    DomainError::new(
        code,
        format!(
            "{summary}: {} {} HTTP {status}{details}: {}",
            context.adapter,
            context.message_id,
            truncate_body(body)
        ),
    )
}

/// Cut `body` to [`MAX_BODY_CHARS`] characters, appending [`TRUNCATION_MARKER`] if cut.
pub fn truncate_body(body: &str) -> Cow<'_, str> {
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((idx, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &body[..idx])),
        None => Cow::Borrowed(body),
    }
}
