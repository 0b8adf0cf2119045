//! Push delivery collaborator.
//!
//! The core never inspects delivery results beyond logging; the gateway
//! behind `HttpPushSender` owns retries and token management.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use super::policy::PushMessage;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("push gateway request failed: {0}")]
    Transport(String),
    #[error("push gateway rejected the message: status {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, address: &str, message: &PushMessage) -> Result<(), PushError>;
}

/// Delivers messages to an HTTP push gateway.
pub struct HttpPushSender {
    client: reqwest::Client,
    gateway_url: String,
}

impl HttpPushSender {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url: gateway_url.into(),
        }
    }
}

#[async_trait]
impl PushSender for HttpPushSender {
    async fn send(&self, address: &str, message: &PushMessage) -> Result<(), PushError> {
        let payload = json!({
            "to": address,
            "notification": {
                "title": message.title,
                "body": message.body,
            },
            "data": message.data,
        });

        let response = self
            .client
            .post(&self.gateway_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PushError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Discards every message. Used in tests and when no gateway is configured.
pub struct NoopPushSender;

#[async_trait]
impl PushSender for NoopPushSender {
    async fn send(&self, _address: &str, _message: &PushMessage) -> Result<(), PushError> {
        Ok(())
    }
}
