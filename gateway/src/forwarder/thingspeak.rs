use std::time::Duration;
use async_trait::async_trait;
use common::{Config, GatewayError, Result, TelemetryFields};
use log::{debug, info};
use reqwest::Client;
use super::TelemetryForwarder;

/// Body ThingSpeak returns when it refuses an update.
const REJECTED_BODY: &str = "0";

pub struct ThingSpeakForwarder {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl ThingSpeakForwarder {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.thingspeak_url.clone(),
            config.thingspeak_api_key.clone(),
            config.forward_timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::TransportError(format!("no answer from {} within {:?}", self.endpoint, self.timeout))
        } else {
            GatewayError::TransportError(err.to_string())
        }
    }
}

#[async_trait]
impl TelemetryForwarder for ThingSpeakForwarder {
    async fn forward(&self, fields: &TelemetryFields) -> Result<()> {
        let mut params = vec![("api_key", self.api_key.clone())];
        params.extend(
            fields.valid_fields()
                .into_iter()
                .map(|(name, value)| (name, value.to_string())),
        );

        debug!("Submitting {} field(s) to {}", params.len() - 1, self.endpoint);

        let response = self.client
            .post(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::TransportError(format!(
                "{} answered HTTP {}", self.endpoint, status
            )));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if body.trim() == REJECTED_BODY {
            return Err(GatewayError::ForwardingRejected(
                "telemetry store returned 0 for the update".to_string(),
            ));
        }

        info!("Telemetry store accepted update ({} bytes of response)", body.len());
        Ok(())
    }
}
