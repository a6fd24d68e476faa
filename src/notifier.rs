//! Slack incoming-webhook notifier.
//!
//! Relays POST bodies to a Slack webhook as a single message. Delivery is
//! one-shot: no retry and no timeout. Every failure is caught, logged, and
//! reported through [`NotificationOutcome`] so the calling handler always
//! completes.

use serde::Serialize;
use serde_json::Value;

use crate::config::{SlackConfig, SLACK_ICON_EMOJI, SLACK_USERNAME, WEBHOOK_USER_AGENT};

/// Error type for webhook delivery
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Slack webhook URL is not configured (set SLACK_WEBHOOK_URL)")]
    MissingWebhookUrl,

    #[error("Request failed with status code {status}")]
    Rejected { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlackPayload {
    pub channel: String,
    pub username: String,
    pub text: String,
    pub icon_emoji: String,
}

impl SlackPayload {
    pub fn new(text: &str, channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            username: SLACK_USERNAME.to_string(),
            text: text.to_string(),
            icon_emoji: SLACK_ICON_EMOJI.to_string(),
        }
    }
}

/// Result of a single delivery attempt, embedded in the POST `/` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotificationOutcome {
    fn delivered(status: u16) -> Self {
        Self {
            success: true,
            status: Some(status),
            error: None,
        }
    }

    fn failed(err: &NotifyError) -> Self {
        let status = match err {
            NotifyError::Rejected { status, .. } => Some(*status),
            _ => None,
        };
        Self {
            success: false,
            status,
            error: Some(err.to_string()),
        }
    }
}

/// Derive the message text and target channel from a POST body.
///
/// A string `message` field is used verbatim, otherwise the whole body is
/// sent as compact JSON. A string `channel` field overrides the default.
pub fn message_and_channel(body: &Value, default_channel: &str) -> (String, String) {
    let text = match body.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => body.to_string(),
    };
    let channel = body
        .get("channel")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or(default_channel)
        .to_string();
    (text, channel)
}

/// Sends messages to one Slack incoming webhook.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
    default_channel: String,
}

impl SlackNotifier {
    pub fn new(config: &SlackConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .user_agent(WEBHOOK_USER_AGENT)
            .build()?;

        if config.webhook_url.is_none() {
            tracing::warn!(
                "SLACK_WEBHOOK_URL is not set; Slack notifications will be reported as failed"
            );
        }

        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
            default_channel: config.default_channel.clone(),
        })
    }

    pub fn default_channel(&self) -> &str {
        &self.default_channel
    }

    /// Post `message` to `channel`. Never fails; see [`NotificationOutcome`].
    pub async fn notify(&self, message: &str, channel: &str) -> NotificationOutcome {
        match self.send(&SlackPayload::new(message, channel)).await {
            Ok(status) => {
                tracing::info!(status, channel, "Slack notification sent");
                NotificationOutcome::delivered(status)
            }
            Err(err) => {
                match &err {
                    NotifyError::Rejected { status, body } => {
                        tracing::error!(status, body = %body, channel, "Slack webhook rejected notification");
                    }
                    _ => {
                        tracing::error!(error = %err, channel, "Failed to send Slack notification");
                    }
                }
                NotificationOutcome::failed(&err)
            }
        }
    }

    async fn send(&self, payload: &SlackPayload) -> Result<u16, NotifyError> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(NotifyError::MissingWebhookUrl)?;

        tracing::debug!(channel = %payload.channel, "Sending Slack notification");

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(status.as_u16())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
