//! Message-broker transport adapter for SMS-style HTTP gateways.
//!
//! A [`TransportProxy`] turns a broker-neutral [`Message`] into a JSON `POST` with
//! HTTP Basic authentication, and turns whatever the gateway answers into a
//! [`TransmitResult`]. The layout mirrors the flow: a domain layer of plain types,
//! a transport layer for wire-format details, and a proxy layer orchestrating calls.
//!
//! ```rust,no_run
//! use smsgate::{Config, Identity, Message, TransportProxy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsgate::ProxyError> {
//!     let mut config = Config::new("gw.example.com", 443, "user", "secret", "ACME");
//!     config.path = "/send".to_owned();
//!     let proxy = TransportProxy::new(config)?;
//!
//!     let message = Message::new(1_u64, Identity::new("phone", "+79251234567"))
//!         .with_content("hello");
//!     let result = proxy.transmit(&message).await;
//!     if let Some(err) = result.error() {
//!         eprintln!("{:?}: {}", err.code, err.message);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod domain;
pub mod phone;
pub mod proxy;
mod transport;

pub use domain::{
    Config, DomainError, ErrorCode, HealthStatus, Identity, Message, MessageId, MessagePriority,
    TransmitResult, ValidationError,
};
pub use phone::{E164PhoneUtilities, PhoneNumberUtilities};
pub use proxy::http::{
    HttpClientFactory, HttpRequest, HttpResponse, HttpTransport, ReqwestClientFactory,
};
pub use proxy::{MessageTransport, ProxyError, TransportProxy, TransportProxyBuilder};
pub use transport::{
    ErrorContext, MAX_BODY_CHARS, TRUNCATION_MARKER, WireResponse, classify, truncate_body,
};
