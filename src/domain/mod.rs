//! Domain layer: messages, settings, and the result taxonomy (no I/O).

mod config;
mod message;
mod result;
mod validation;

pub use config::Config;
pub use message::{Identity, Message, MessageId, MessagePriority};
pub use result::{DomainError, ErrorCode, HealthStatus, TransmitResult};
pub use validation::ValidationError;
