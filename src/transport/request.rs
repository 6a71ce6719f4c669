use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::domain::Config;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Exact body shape the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WireRequest<'a> {
    #[serde(rename = "phone")]
    pub phone_number: &'a str,
    pub content: &'a str,
    pub sender: &'a str,
}

pub fn encode_send_message_json(request: &WireRequest<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string(request)
}

/// `Authorization` header value for HTTP Basic auth (`Basic base64(user:password)`).
pub fn basic_authorization(username: &str, password: &str) -> String {
    let credentials = BASE64.encode(format!("{username}:{password}"));
    format!("Basic {credentials}")
}

/// `{scheme}://{host}:{port}{path}`, with the port always spelled out.
pub fn endpoint_url(config: &Config) -> Result<String, url::ParseError> {
    let path = config.path.trim();
    let separator = if path.starts_with('/') { "" } else { "/" };
    let endpoint = format!(
        "{}://{}:{}{separator}{path}",
        config.scheme(),
        config.url_host(),
        config.port
    );
    url::Url::parse(&endpoint)?;
    Ok(endpoint)
}
