//! HTTP seam: the request/response pair the pipeline exchanges with the gateway and the
//! traits a host implements to supply its own HTTP stack.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::Instrument;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fully prepared outbound gateway call.
pub struct HttpRequest {
    pub url: String,
    /// Complete `Authorization` header value.
    pub authorization: String,
    pub content_type: &'static str,
    pub body: String,
    /// Target host, for routing and circuit-breaking policies in the HTTP layer.
    pub host: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// A client able to POST one prepared request and read the whole response body.
pub trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

/// Source of HTTP clients.
///
/// The pipeline asks for a new client on every transmit call and drops it when the
/// call returns, so implementations may hand out pooled handles.
pub trait HttpClientFactory: Send + Sync {
    fn create_client(&self) -> Result<Box<dyn HttpTransport>, BoxError>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        let span = tracing::debug_span!("gateway_request", host = %request.host);
        Box::pin(
            async move {
                let mut builder = self
                    .client
                    .post(&request.url)
                    .header(reqwest::header::AUTHORIZATION, &request.authorization)
                    .header(reqwest::header::CONTENT_TYPE, request.content_type)
                    .body(request.body.clone());
                if let Some(timeout) = request.timeout {
                    builder = builder.timeout(timeout);
                }

                let response = builder.send().await?;
                let status = response.status().as_u16();
                let body = response.text().await?;
                tracing::debug!(status, "gateway responded");
                Ok(HttpResponse { status, body })
            }
            .instrument(span),
        )
    }
}

#[derive(Debug, Clone, Default)]
/// [`HttpClientFactory`] handing out handles to one shared `reqwest` connection pool.
pub struct ReqwestClientFactory {
    client: reqwest::Client,
}

impl ReqwestClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots, pool limits, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpClientFactory for ReqwestClientFactory {
    fn create_client(&self) -> Result<Box<dyn HttpTransport>, BoxError> {
        Ok(Box::new(ReqwestTransport {
            client: self.client.clone(),
        }))
    }
}
