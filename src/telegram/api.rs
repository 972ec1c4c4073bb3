//! Minimal Telegram Bot API client.
//!
//! Every method is a JSON POST to `{base}/bot{token}/{method}` answered with
//! an `{ok, result, description, error_code}` envelope.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::types::{ChatMember, Message, SendMessage, Update, User};
use crate::error_handling::TelegramError;

/// Extra time granted to a long poll beyond its server-side timeout.
const POLL_GRACE_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<u16>,
}

/// Bot API client bound to one bot token.
#[derive(Clone)]
pub struct BotApi {
    client: reqwest::Client,
    endpoint: String,
}

impl std::fmt::Debug for BotApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The endpoint embeds the token
        f.debug_struct("BotApi").finish_non_exhaustive()
    }
}

impl BotApi {
    pub fn new(client: reqwest::Client, api_base_url: &str, token: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/bot{}", api_base_url.trim_end_matches('/'), token),
        }
    }

    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(format!("{}/{}", self.endpoint, method))
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        // Strip URLs from transport errors: they contain the bot token
        let response = request.send().await.map_err(|e| e.without_url())?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| e.without_url())?;

        let envelope: Envelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(TelegramError::Api {
                    code: status.as_u16(),
                    description: status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if !envelope.ok {
            return Err(TelegramError::Api {
                code: envelope.error_code.unwrap_or(status.as_u16()),
                description: envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        Ok(serde_json::from_value(
            envelope.result.unwrap_or(serde_json::Value::Null),
        )?)
    }

    /// Returns the bot's own account; used to verify the token at startup.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &json!({}), None).await
    }

    /// Long-polls for updates starting at `offset`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let body = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message", "chat_member"],
        });
        self.call(
            "getUpdates",
            &body,
            Some(Duration::from_secs(timeout_secs + POLL_GRACE_SECS)),
        )
        .await
    }

    pub async fn send_message(&self, message: &SendMessage) -> Result<Message, TelegramError> {
        self.call("sendMessage", message, None).await
    }

    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<bool, TelegramError> {
        let body = json!({ "chat_id": chat_id, "message_id": message_id });
        self.call("deleteMessage", &body, None).await
    }

    pub async fn get_chat_administrators(
        &self,
        chat_id: i64,
    ) -> Result<Vec<ChatMember>, TelegramError> {
        self.call("getChatAdministrators", &json!({ "chat_id": chat_id }), None)
            .await
    }

    pub async fn ban_chat_member(&self, chat_id: i64, user_id: i64) -> Result<bool, TelegramError> {
        let body = json!({ "chat_id": chat_id, "user_id": user_id });
        self.call("banChatMember", &body, None).await
    }
}
