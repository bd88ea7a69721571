use std::time::Duration;

use portfolio_core::{ContactForm, RelayOutcome};
use portfolio_logging::{portfolio_debug, portfolio_info, portfolio_warn};
use url::Url;

use crate::{classify_response, FailureKind, RelayError, RelayPayload, RelayReply};

pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub endpoint: String,
    pub access_key: String,
    pub form_name: String,
    pub subject_prefix: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: String::new(),
            form_name: "Portfolio Contact Form".to_string(),
            subject_prefix: "Portfolio Contact: ".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Relay: Send + Sync {
    /// Sends one message. `Err` means the request never completed normally.
    async fn submit(&self, form: &ContactForm) -> Result<RelayReply, RelayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRelay {
    settings: RelaySettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestRelay {
    pub fn new(settings: RelaySettings) -> Result<Self, RelayError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|err| RelayError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RelayError::new(
                FailureKind::InvalidEndpoint,
                format!("unsupported scheme {}", endpoint.scheme()),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| RelayError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl Relay for ReqwestRelay {
    async fn submit(&self, form: &ContactForm) -> Result<RelayReply, RelayError> {
        let payload = RelayPayload::build(&self.settings, form);
        portfolio_debug!(
            "POST {} fields={} message_len={}",
            self.endpoint,
            payload.fields().len(),
            form.message.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(payload.into_multipart())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(classify_response(status, &body))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        return RelayError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return RelayError::new(FailureKind::Connect, err.to_string());
    }
    RelayError::new(FailureKind::Network, err.to_string())
}

/// Folds a relay result into the outcome the contact state machine expects.
pub fn into_outcome(result: Result<RelayReply, RelayError>) -> RelayOutcome {
    match result {
        Ok(reply) if reply.accepted => {
            portfolio_info!("Relay accepted message (status {})", reply.status);
            RelayOutcome::Accepted
        }
        Ok(reply) => {
            portfolio_warn!(
                "Relay rejected message (status {}): {}",
                reply.status,
                reply.message.as_deref().unwrap_or("no reason given")
            );
            RelayOutcome::Rejected {
                reason: reply.message,
            }
        }
        Err(err) => {
            portfolio_warn!("Relay transport failed, presuming delivery: {}", err);
            RelayOutcome::TransportFailed {
                detail: err.to_string(),
            }
        }
    }
}
