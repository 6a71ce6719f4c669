use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Classified failure kinds reported back to the broker.
pub enum ErrorCode {
    /// No usable text, missing recipient value, or payload rejected by the gateway.
    IncorrectMessageDataError,
    /// Recipient credential is not a phone number.
    InvalidCredentialTypeError,
    /// Phone utilities could not normalize the recipient value.
    IncorrectPhoneNumberError,
    /// Gateway rejected the adapter credentials.
    TransportAuthorizeError,
    /// Gateway temporarily overloaded or unavailable; the host may retry later.
    TransportPendingError,
    /// Gateway failed while processing a well-formed request.
    MessageTransmitError,
    /// Unexpected gateway response.
    MessageDeliveryError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IncorrectMessageDataError => "IncorrectMessageDataError",
            Self::InvalidCredentialTypeError => "InvalidCredentialTypeError",
            Self::IncorrectPhoneNumberError => "IncorrectPhoneNumberError",
            Self::TransportAuthorizeError => "TransportAuthorizeError",
            Self::TransportPendingError => "TransportPendingError",
            Self::MessageTransmitError => "MessageTransmitError",
            Self::MessageDeliveryError => "MessageDeliveryError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
/// Failure carried inside [`TransmitResult::Failure`].
///
/// `code` is `None` for unclassified failures (transport I/O, client construction);
/// those keep the error source chain in `trace`.
pub struct DomainError {
    pub code: Option<ErrorCode>,
    pub message: String,
    pub trace: Option<String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
            trace: None,
        }
    }

    /// Wrap an error nothing else classified, keeping its text and source chain.
    pub fn unclassified(err: &(dyn StdError + 'static)) -> Self {
        Self {
            code: None,
            message: err.to_string(),
            trace: Some(error_chain(err)),
        }
    }
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut trace = format!("{err:?}");
    let mut source = err.source();
    while let Some(cause) = source {
        trace.push_str("\ncaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
/// Outcome of one transmit call.
pub enum TransmitResult {
    Success,
    Failure(DomainError),
}

impl TransmitResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error(&self) -> Option<&DomainError> {
        match self {
            Self::Success => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Shortcut for `error().and_then(|err| err.code)`.
    pub fn code(&self) -> Option<ErrorCode> {
        self.error().and_then(|err| err.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Adapter health as seen by the host readiness probe.
pub enum HealthStatus {
    Healthy,
    Unhealthy { reason: String },
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct Inner;

    #[test]
    fn result_holds_exactly_one_outcome() {
        let ok = TransmitResult::Success;
        assert!(ok.is_success());
        assert!(ok.error().is_none());

        let failed = TransmitResult::Failure(DomainError::new(
            ErrorCode::TransportPendingError,
            "later",
        ));
        assert!(!failed.is_success());
        assert_eq!(failed.code(), Some(ErrorCode::TransportPendingError));
        assert_eq!(failed.error().map(ToString::to_string).as_deref(), Some("later"));
    }

    #[test]
    fn unclassified_keeps_text_and_source_chain() {
        let err = DomainError::unclassified(&Outer(Inner));
        assert_eq!(err.code, None);
        assert_eq!(err.message, "outer failure");
        let trace = err.trace.unwrap();
        assert!(trace.contains("caused by: connection reset"), "{trace}");
    }

    #[test]
    fn error_code_display_uses_variant_names() {
        assert_eq!(
            ErrorCode::TransportAuthorizeError.to_string(),
            "TransportAuthorizeError"
        );
        assert_eq!(
            ErrorCode::IncorrectPhoneNumberError.to_string(),
            "IncorrectPhoneNumberError"
        );
    }
}
