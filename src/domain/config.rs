use std::borrow::Cow;
use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Gateway settings for a [`TransportProxy`](crate::TransportProxy).
///
/// The host is expected to load these once (for instance from its own configuration
/// tree) and hand them over; [`Config::validate`] runs when the proxy is built.
pub struct Config {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_use_ssl")]
    pub use_ssl: bool,
    pub username: String,
    pub password: String,
    pub sender: String,
    /// Declared throughput; `0` means "no limit".
    #[serde(default)]
    pub messages_per_second: u32,
    /// Declared retry budget; `None` means "no limit".
    #[serde(default)]
    pub max_transmit_retry_count: Option<u32>,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_path() -> String {
    "/".to_owned()
}

fn default_use_ssl() -> bool {
    true
}

impl Config {
    pub const HOST_FIELD: &'static str = "host";
    pub const USERNAME_FIELD: &'static str = "username";
    pub const PASSWORD_FIELD: &'static str = "password";
    pub const SENDER_FIELD: &'static str = "sender";

    /// Create settings with the defaults used for omitted fields during deserialization.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            path: default_path(),
            use_ssl: default_use_ssl(),
            username: username.into(),
            password: password.into(),
            sender: sender.into(),
            messages_per_second: 0,
            max_transmit_retry_count: None,
            request_timeout_ms: None,
        }
    }

    /// Check the rules a gateway endpoint needs before any request is attempted.
    ///
    /// - `host` is non-empty and a syntactically valid host name or address
    ///   (IPv6 literals with or without brackets),
    /// - `port` is in `1..=65535`,
    /// - `username`, `password` and `sender` are not blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::HOST_FIELD,
            });
        }
        if url::Host::parse(&self.url_host()).is_err() {
            return Err(ValidationError::InvalidHost {
                host: self.host.clone(),
            });
        }
        if self.port == 0 {
            return Err(ValidationError::PortOutOfRange { actual: self.port });
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::USERNAME_FIELD,
            });
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::PASSWORD_FIELD,
            });
        }
        if self.sender.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::SENDER_FIELD,
            });
        }
        Ok(())
    }

    /// Host as it appears in a URL: bare IPv6 literals get their brackets.
    pub fn url_host(&self) -> Cow<'_, str> {
        let host = self.host.trim();
        if host.parse::<Ipv6Addr>().is_ok() {
            Cow::Owned(format!("[{host}]"))
        } else {
            Cow::Borrowed(host)
        }
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_ssl { "https" } else { "http" }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("use_ssl", &self.use_ssl)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .field("messages_per_second", &self.messages_per_second)
            .field("max_transmit_retry_count", &self.max_transmit_retry_count)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config::new("gw.example.com", 443, "u", "p", "ACME")
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(valid().validate(), Ok(()));

        let ip = Config {
            host: "10.0.0.1".to_owned(),
            ..valid()
        };
        assert_eq!(ip.validate(), Ok(()));
    }

    #[test]
    fn host_must_be_present_and_well_formed() {
        let empty = Config {
            host: "  ".to_owned(),
            ..valid()
        };
        assert_eq!(
            empty.validate(),
            Err(ValidationError::Empty {
                field: Config::HOST_FIELD
            })
        );

        let invalid = Config {
            host: "gw example/com".to_owned(),
            ..valid()
        };
        assert!(matches!(
            invalid.validate(),
            Err(ValidationError::InvalidHost { .. })
        ));
    }

    #[test]
    fn port_zero_is_rejected() {
        let cfg = Config {
            port: 0,
            ..valid()
        };
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::PortOutOfRange { actual: 0 })
        );
    }

    #[test]
    fn credentials_and_sender_are_required() {
        let cases = [
            (
                Config {
                    username: String::new(),
                    ..valid()
                },
                Config::USERNAME_FIELD,
            ),
            (
                Config {
                    password: String::new(),
                    ..valid()
                },
                Config::PASSWORD_FIELD,
            ),
            (
                Config {
                    sender: String::new(),
                    ..valid()
                },
                Config::SENDER_FIELD,
            ),
        ];
        for (cfg, field) in cases {
            assert_eq!(cfg.validate(), Err(ValidationError::Empty { field }));
        }
    }

    #[test]
    fn whitespace_only_credentials_and_sender_are_rejected() {
        let cfg = Config::new("gw.example.com", 443, "   ", "p", "ACME");
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::Empty {
                field: Config::USERNAME_FIELD
            })
        );

        let cfg = Config::new("gw.example.com", 443, "u", "\t", "ACME");
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::Empty {
                field: Config::PASSWORD_FIELD
            })
        );

        let cfg = Config::new("gw.example.com", 443, "u", "p", " ");
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::Empty {
                field: Config::SENDER_FIELD
            })
        );

        assert!(
            Config::new("gw.example.com", 443, "   ", "\t", " ")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn ipv6_hosts_are_accepted_with_or_without_brackets() {
        let bare = Config {
            host: "::1".to_owned(),
            ..valid()
        };
        assert_eq!(bare.validate(), Ok(()));
        assert_eq!(bare.url_host(), "[::1]");

        let bracketed = Config {
            host: "[2001:db8::1]".to_owned(),
            ..valid()
        };
        assert_eq!(bracketed.validate(), Ok(()));
        assert_eq!(bracketed.url_host(), "[2001:db8::1]");

        assert_eq!(valid().url_host(), "gw.example.com");
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = r#"
        {
          "host": "gw.example.com",
          "port": 8080,
          "username": "u",
          "password": "p",
          "sender": "ACME",
          "maxTransmitRetryCount": 3
        }
        "#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.path, "/");
        assert!(cfg.use_ssl);
        assert_eq!(cfg.messages_per_second, 0);
        assert_eq!(cfg.max_transmit_retry_count, Some(3));
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = Config {
            password: "hunter2".to_owned(),
            ..valid()
        };
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
