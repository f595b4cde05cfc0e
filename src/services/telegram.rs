//! Chat delivery through the Telegram Bot API.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::Client;

use crate::models::telegram::{BotApiResponse, OutgoingMessage, SendMessageRequest};

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to reach bot API: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("bot API rejected message for chat {chat_id}: {description}")]
    Api { chat_id: String, description: String },

    #[error("send to chat {0} failed")]
    SendFailed(String),
}

/// Something that can deliver one text message to one chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: &str, message: &OutgoingMessage) -> Result<(), NotifyError>;
}

pub struct TelegramBot {
    api_url: String,
    token: String,
    client: Client,
}

impl TelegramBot {
    pub fn new(api_url: &str, token: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send(&self, chat_id: &str, message: &OutgoingMessage) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<BotApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(reply) if reply.ok && status.is_success() => {
                tracing::debug!(chat_id = %chat_id, "Message delivered");
                Ok(())
            }
            Some(reply) => Err(NotifyError::Api {
                chat_id: chat_id.to_string(),
                description: match (reply.description, reply.error_code) {
                    (Some(description), _) => description,
                    (None, Some(code)) => format!("error code {code}"),
                    (None, None) => format!("status {status}"),
                },
            }),
            None => Err(NotifyError::Api {
                chat_id: chat_id.to_string(),
                description: format!("status {status}: {body}"),
            }),
        }
    }
}

/// Notifier that records messages instead of sending them.
#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<(String, OutgoingMessage)>>,
    failing: Mutex<HashSet<String>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `chat_id` fail.
    pub fn fail_for(&self, chat_id: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chat_id.to_string());
    }

    /// Successfully delivered messages, in completion order.
    pub fn sent(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn sent_to(&self, chat_id: &str) -> Vec<OutgoingMessage> {
        self.sent()
            .into_iter()
            .filter(|(id, _)| id == chat_id)
            .map(|(_, message)| message)
            .collect()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, chat_id: &str, message: &OutgoingMessage) -> Result<(), NotifyError> {
        let fails = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(chat_id);
        if fails {
            return Err(NotifyError::SendFailed(chat_id.to_string()));
        }

        tracing::info!(chat_id = %chat_id, "[MOCK] Message would be sent");
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((chat_id.to_string(), message.clone()));
        Ok(())
    }
}
