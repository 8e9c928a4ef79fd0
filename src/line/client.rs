//! LINE reply API client

use super::ReplySink;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const REPLY_URL: &str = "https://api.line.me/v2/bot/message/reply";

#[derive(Debug, Error)]
pub enum LineError {
    #[error("LINE request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("LINE rejected the reply ({status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to create HTTP client: {0}")]
    Setup(String),
}

/// Reply sink backed by the LINE Messaging API
pub struct LineClient {
    client: Client,
    channel_token: String,
}

impl LineClient {
    pub fn new(channel_token: String, timeout: Duration) -> Result<Self, LineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LineError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            channel_token,
        })
    }
}

#[async_trait]
impl ReplySink for LineClient {
    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<(), LineError> {
        let response = self
            .client
            .post(REPLY_URL)
            .bearer_auth(&self.channel_token)
            .json(&json!({
                "replyToken": reply_token,
                "messages": messages
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "LINE rejected reply");
            return Err(LineError::Rejected { status, body });
        }

        Ok(())
    }
}
