//! Proxy layer: the transmit pipeline, capability reporting and the health probe.

pub mod http;

use std::sync::Arc;

use tracing::Instrument;

use crate::domain::{
    Config, DomainError, ErrorCode, HealthStatus, Message, TransmitResult, ValidationError,
};
use crate::phone::{E164PhoneUtilities, PhoneNumberUtilities};
use crate::transport::{
    ErrorContext, JSON_CONTENT_TYPE, WireRequest, WireResponse, basic_authorization,
    encode_send_message_json, endpoint_url, interpret_response,
};

use self::http::{BoxError, BoxFuture, HttpClientFactory, HttpRequest, ReqwestClientFactory};

/// Name reported in logs and error messages unless overridden with
/// [`TransportProxyBuilder::name`].
pub const DEFAULT_ADAPTER_NAME: &str = "sms-gateway";

/// Contract between the broker and a transport adapter.
///
/// Implementations are shared across broker workers, so every method takes `&self`.
pub trait MessageTransport: Send + Sync {
    /// Deliver one message. Failures come back inside the result, never as a panic.
    fn transmit<'a>(&'a self, message: &'a Message) -> BoxFuture<'a, TransmitResult>;

    /// Declared throughput; `0` means "no limit".
    fn messages_per_second(&self) -> u32;

    /// Declared retry budget; `None` means "no limit".
    fn try_send_count(&self) -> Option<u32>;

    fn health_check(&self) -> HealthStatus;
}

#[derive(Debug, thiserror::Error)]
/// Errors raised while building a [`TransportProxy`].
pub enum ProxyError {
    /// The settings failed [`Config::validate`].
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    /// Scheme, host, port and path do not form a valid URL.
    #[error("invalid gateway endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The default HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] BoxError),
}

#[derive(Debug, thiserror::Error)]
enum TransmitError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Unexpected(BoxError),
}

/// Builder for [`TransportProxy`].
pub struct TransportProxyBuilder {
    config: Config,
    name: String,
    phone_utilities: Option<Arc<dyn PhoneNumberUtilities>>,
    http_client_factory: Option<Arc<dyn HttpClientFactory>>,
    user_agent: Option<String>,
    parent_span: Option<tracing::Span>,
}

impl TransportProxyBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            name: DEFAULT_ADAPTER_NAME.to_owned(),
            phone_utilities: None,
            http_client_factory: None,
            user_agent: None,
            parent_span: None,
        }
    }

    /// Adapter name used in logs and error messages.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Defaults to [`E164PhoneUtilities::default`].
    pub fn phone_utilities(mut self, utilities: Arc<dyn PhoneNumberUtilities>) -> Self {
        self.phone_utilities = Some(utilities);
        self
    }

    /// Defaults to a [`ReqwestClientFactory`] over a fresh connection pool.
    pub fn http_client_factory(mut self, factory: Arc<dyn HttpClientFactory>) -> Self {
        self.http_client_factory = Some(factory);
        self
    }

    /// Override the `User-Agent` of the default HTTP client.
    ///
    /// Ignored when a custom [`HttpClientFactory`] is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Span the adapter's own span is nested under.
    pub fn parent_span(mut self, span: tracing::Span) -> Self {
        self.parent_span = Some(span);
        self
    }

    /// Validate the settings, precompute the endpoint and credentials, and build the proxy.
    pub fn build(self) -> Result<TransportProxy, ProxyError> {
        self.config.validate()?;
        let endpoint = endpoint_url(&self.config)?;
        let authorization = basic_authorization(&self.config.username, &self.config.password);

        let http = match self.http_client_factory {
            Some(factory) => factory,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| ProxyError::HttpClient(Box::new(err)))?;
                Arc::new(ReqwestClientFactory::with_client(client))
            }
        };

        let phone = self
            .phone_utilities
            .unwrap_or_else(|| Arc::new(E164PhoneUtilities::default()));

        let span = match &self.parent_span {
            Some(parent) => tracing::info_span!(parent: parent, "transport", adapter = %self.name),
            None => tracing::info_span!("transport", adapter = %self.name),
        };

        Ok(TransportProxy {
            name: self.name,
            config: self.config,
            endpoint,
            authorization,
            phone,
            http,
            span,
        })
    }
}

#[derive(Clone)]
/// Transport adapter delivering broker messages through a JSON/Basic-auth SMS gateway.
///
/// Holds only immutable state; clone it or share it behind an `Arc` across workers.
pub struct TransportProxy {
    name: String,
    config: Config,
    endpoint: String,
    authorization: String,
    phone: Arc<dyn PhoneNumberUtilities>,
    http: Arc<dyn HttpClientFactory>,
    span: tracing::Span,
}

impl TransportProxy {
    /// Build a proxy with the default phone utilities and HTTP client.
    pub fn new(config: Config) -> Result<Self, ProxyError> {
        TransportProxyBuilder::new(config).build()
    }

    pub fn builder(config: Config) -> TransportProxyBuilder {
        TransportProxyBuilder::new(config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Precomputed gateway URL every request is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deliver `message` through the gateway.
    ///
    /// Validation failures, gateway rejections and transport errors are all reported
    /// as [`TransmitResult::Failure`]; see [`ErrorCode`] for the classification.
    pub async fn transmit(&self, message: &Message) -> TransmitResult {
        self.run_pipeline(message)
            .instrument(self.span.clone())
            .await
    }

    pub fn messages_per_second(&self) -> u32 {
        self.config.messages_per_second
    }

    pub fn try_send_count(&self) -> Option<u32> {
        self.config.max_transmit_retry_count
    }

    /// Report adapter health. Probe failures are returned as
    /// [`HealthStatus::Unhealthy`], never propagated.
    pub fn health_check(&self) -> HealthStatus {
        let _entered = self.span.enter();
        match self.probe() {
            Ok(()) => HealthStatus::Healthy,
            Err(err) => {
                tracing::warn!(error = %err, "health check failed");
                HealthStatus::Unhealthy {
                    reason: err.to_string(),
                }
            }
        }
    }

    // The gateway exposes no health endpoint; only local state is checked.
    fn probe(&self) -> Result<(), ProxyError> {
        url::Url::parse(&self.endpoint)?;
        Ok(())
    }

    async fn run_pipeline(&self, message: &Message) -> TransmitResult {
        tracing::info!(
            message_id = %message.id,
            priority = ?message.priority,
            "transmitting message"
        );

        match self.try_transmit(message).await {
            Ok(response) => {
                tracing::info!(
                    message_id = %message.id,
                    gateway_id = response.id,
                    "message accepted by gateway"
                );
                TransmitResult::Success
            }
            Err(TransmitError::Domain(err)) => {
                tracing::warn!(
                    message_id = %message.id,
                    code = ?err.code,
                    error = %err,
                    "message transmission failed"
                );
                TransmitResult::Failure(err)
            }
            Err(TransmitError::Unexpected(err)) => {
                let err = DomainError::unclassified(&*err);
                tracing::error!(
                    message_id = %message.id,
                    error = %err,
                    trace = err.trace.as_deref().unwrap_or_default(),
                    "unexpected error while transmitting message"
                );
                TransmitResult::Failure(err)
            }
        }
    }

    async fn try_transmit(&self, message: &Message) -> Result<WireResponse, TransmitError> {
        self.check_identity(message)?;
        let text = self.message_text(message)?;

        let phone_number = self
            .phone
            .normalize(&message.identity.credential_value)
            .map_err(|err| {
                DomainError::new(
                    ErrorCode::IncorrectPhoneNumberError,
                    format!("{err}: {} {}", self.name, message.id),
                )
            })?;

        let body = encode_send_message_json(&WireRequest {
            phone_number: &phone_number,
            content: text,
            sender: &self.config.sender,
        })
        .map_err(|err| TransmitError::Unexpected(Box::new(err)))?;

        let request = HttpRequest {
            url: self.endpoint.clone(),
            authorization: self.authorization.clone(),
            content_type: JSON_CONTENT_TYPE,
            body,
            host: self.config.host.clone(),
            timeout: self.config.request_timeout(),
        };

        let client = self
            .http
            .create_client()
            .map_err(TransmitError::Unexpected)?;
        let response = client
            .post_json(&request)
            .await
            .map_err(TransmitError::Unexpected)?;

        let context = ErrorContext {
            adapter: &self.name,
            message_id: &message.id,
        };
        Ok(interpret_response(
            response.status,
            &response.body,
            &context,
        )?)
    }

    /// The recipient must be a phone-type credential with a non-blank value.
    fn check_identity(&self, message: &Message) -> Result<(), DomainError> {
        let credential_type = &message.identity.credential_type;
        if !self.phone.is_phone_credential_type(credential_type) {
            return Err(DomainError::new(
                ErrorCode::InvalidCredentialTypeError,
                format!(
                    "recipient credential type {credential_type:?} is not supported: {} {}",
                    self.name, message.id
                ),
            ));
        }

        if message.identity.credential_value.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::IncorrectMessageDataError,
                format!(
                    "message has no recipient phone number: {} {}",
                    self.name, message.id
                ),
            ));
        }

        Ok(())
    }

    fn message_text<'m>(&self, message: &'m Message) -> Result<&'m str, DomainError> {
        message.text().ok_or_else(|| {
            DomainError::new(
                ErrorCode::IncorrectMessageDataError,
                format!(
                    "message has neither title nor content: {} {}",
                    self.name, message.id
                ),
            )
        })
    }
}

impl MessageTransport for TransportProxy {
    fn transmit<'a>(&'a self, message: &'a Message) -> BoxFuture<'a, TransmitResult> {
        Box::pin(TransportProxy::transmit(self, message))
    }

    fn messages_per_second(&self) -> u32 {
        TransportProxy::messages_per_second(self)
    }

    fn try_send_count(&self) -> Option<u32> {
        TransportProxy::try_send_count(self)
    }

    fn health_check(&self) -> HealthStatus {
        TransportProxy::health_check(self)
    }
}
