//! Outbound notification for newly created messages.
//!
//! The notifier is fire-and-forget: its outcome never gates or alters the
//! response of the create request that triggered it. Delivery failures are
//! logged and swallowed; a missing webhook URL is a silent no-op, not an
//! error.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::models::message::Message;

/// Timeout for the webhook POST. Bounds how long a create request can spend
/// firing the notification.
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// Notification seam for message creation.
///
/// Implementations must fully absorb their own failures; the method has no
/// error channel on purpose.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Called exactly once after a message has been successfully committed.
    /// Never called on update or delete, nor after a failed validation.
    async fn message_created(&self, message: &Message);
}

/// Slack incoming-webhook notifier.
pub struct SlackNotifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl SlackNotifier {
    /// Build a notifier for the given webhook destination.
    ///
    /// `None` produces a notifier that does nothing. The destination is fixed
    /// at construction; it is not re-read from the environment at call time.
    pub fn new(webhook_url: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()?;

        Ok(Self {
            webhook_url,
            client,
        })
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn message_created(&self, message: &Message) {
        let Some(webhook_url) = &self.webhook_url else {
            // Not configured: expected in development, so log quietly
            tracing::debug!("no Slack webhook configured, skipping notification");
            return;
        };

        let result = self
            .client
            .post(webhook_url)
            .json(&slack_payload(message))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(message_id = %message.id, "Slack notification delivered");
            }
            Ok(response) => {
                tracing::error!(
                    message_id = %message.id,
                    status = %response.status(),
                    "Slack notification rejected"
                );
            }
            Err(e) => {
                tracing::error!(message_id = %message.id, "Slack notification failed: {e}");
            }
        }
    }
}

/// Build the Slack Block Kit payload for a created message.
///
/// A header, a section with subject and formatted creation time
/// (`YYYY-MM-DD HH:MM`), and a section with the full body.
fn slack_payload(message: &Message) -> Value {
    json!({
        "text": "New Message Created",
        "blocks": [
            {
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": "New Message Created"
                }
            },
            {
                "type": "section",
                "fields": [
                    {
                        "type": "mrkdwn",
                        "text": format!("*Subject:*\n{}", message.subject)
                    },
                    {
                        "type": "mrkdwn",
                        "text": format!(
                            "*Created:*\n{}",
                            message.created_at.format("%Y-%m-%d %H:%M")
                        )
                    }
                ]
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Body:*\n{}", message.body)
                }
            }
        ]
    })
}
