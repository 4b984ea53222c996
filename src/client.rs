use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::errors::{PagerDutyError, Result};
use crate::types::{Trigger, TriggerResponse};

/// Base endpoint of the PagerDuty generic Events API
pub const DEFAULT_BASE_URL: &str = "https://events.pagerduty.com/generic/2010-04-15";

const CREATE_EVENT_PATH: &str = "create_event.json";

const TRIGGER_EVENT_TYPE: &str = "trigger";

/// Wire shape of a trigger event
///
/// `service_key` and `event_type` are always supplied by the client.
#[derive(Serialize)]
struct TriggerPayload<'a> {
    service_key: &'a str,
    event_type: &'static str,
    #[serde(flatten)]
    trigger: &'a Trigger,
}

/// Client for submitting trigger events to PagerDuty
///
/// # Example
///
/// ```rust,no_run
/// use pagerduty_events::{PagerDutyClient, Trigger};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PagerDutyClient::new(
///         "e93facc04764012d7bfb002500d5d1a6",
///         Duration::from_secs(10),
///     )?;
///
///     let trigger = Trigger::new("Something bad has happened")
///         .with_client("Sample Monitoring Service");
///
///     let response = client.trigger(&trigger).await?;
///     println!("incident key: {}", response.incident_key);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PagerDutyClient {
    client: ClientWithMiddleware,
    base_url: Url,
    service_key: String,
}

impl PagerDutyClient {
    /// Create a new PagerDuty client
    ///
    /// # Arguments
    ///
    /// * `service_key` - Integration key of the target PagerDuty service
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(service_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PagerDutyError::BuildHttpClient)?;

        let client = ClientBuilder::new(client).build();

        Ok(Self::with_client(client, service_key))
    }

    /// Create a new client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, logging, etc.)
    pub fn with_client(client: ClientWithMiddleware, service_key: &str) -> Self {
        Self {
            client,
            base_url: default_base_url(),
            service_key: service_key.to_string(),
        }
    }

    /// Override the base endpoint (e.g. for a proxy or a test server)
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Submit a trigger event
    ///
    /// Sends exactly one request; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The event endpoint URL cannot be built
    /// - The event cannot be serialized
    /// - The HTTP request fails or the body cannot be read
    /// - PagerDuty returns a non-success status code
    /// - The response is not a valid acknowledgment
    pub async fn trigger(&self, trigger: &Trigger) -> Result<TriggerResponse> {
        self.send_trigger(trigger, None).await
    }

    /// Submit a trigger event with a deadline for this call only
    ///
    /// The deadline overrides the client-wide timeout.
    pub async fn trigger_with_timeout(
        &self,
        trigger: &Trigger,
        timeout: Duration,
    ) -> Result<TriggerResponse> {
        self.send_trigger(trigger, Some(timeout)).await
    }

    #[instrument(
        name = "PagerDutyClient::trigger",
        skip_all,
        fields(
            description_len = trigger.description.len(),
            has_incident_key = trigger.incident_key.is_some(),
            context_count = trigger.contexts.len(),
        )
    )]
    async fn send_trigger(
        &self,
        trigger: &Trigger,
        timeout: Option<Duration>,
    ) -> Result<TriggerResponse> {
        let url = self.event_url()?;

        let payload = TriggerPayload {
            service_key: &self.service_key,
            event_type: TRIGGER_EVENT_TYPE,
            trigger,
        };
        let body = serde_json::to_vec(&payload).map_err(PagerDutyError::Serialize)?;

        debug!(url = %url, bytes = body.len(), "Sending trigger event to PagerDuty");

        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(PagerDutyError::Request)?;

        let status = response.status();
        let body = response.bytes().await.map_err(PagerDutyError::ReadBody)?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).into_owned();
            warn!(status = %status, "PagerDuty rejected trigger event");
            return Err(PagerDutyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let ack: TriggerResponse =
            serde_json::from_slice(&body).map_err(|source| PagerDutyError::Deserialize {
                source,
                body: String::from_utf8_lossy(&body).into_owned(),
            })?;

        debug!(incident_key = %ack.incident_key, "Trigger event accepted");
        Ok(ack)
    }

    /// Full URL of the event creation endpoint
    ///
    /// The base URL path is preserved; `Url::join` would drop its last segment.
    /// Any query string on the base URL stays after the path.
    fn event_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                PagerDutyError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?
            .pop_if_empty()
            .push(CREATE_EVENT_PATH);
        Ok(url)
    }

    /// Get the base API URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the configured service key
    pub fn service_key(&self) -> &str {
        &self.service_key
    }
}

impl Debug for PagerDutyClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerDutyClient")
            .field("base_url", &self.base_url.as_str())
            .field("service_key", &"<redacted>")
            .finish()
    }
}

fn default_base_url() -> Url {
    // Constant input, always parses.
    Url::parse(DEFAULT_BASE_URL).expect("Valid default base URL")
}
