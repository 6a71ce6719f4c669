use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidHost { host: String },
    PortOutOfRange { actual: u16 },
    InvalidPhoneNumber { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidHost { host } => write!(f, "invalid host name: {host}"),
            Self::PortOutOfRange { actual } => {
                write!(f, "port out of range: {actual} (expected 1..=65535)")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "sender" };
        assert_eq!(err.to_string(), "sender must not be empty");

        let err = ValidationError::InvalidHost {
            host: "bad host".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid host name: bad host");

        let err = ValidationError::PortOutOfRange { actual: 0 };
        assert_eq!(
            err.to_string(),
            "port out of range: 0 (expected 1..=65535)"
        );

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");
    }
}
