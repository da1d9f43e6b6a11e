pub mod error;
pub mod types;

pub use error::{Result, TelegramError};
pub use types::{Chat, ChatType, Message, Update, User};

use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use types::ApiResponse;

const BASE_URL: &str = "https://api.telegram.org";

pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        // The long-poll timeout rides inside the request, so the transport
        // timeout must stay comfortably above any getUpdates timeout.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: format!("{BASE_URL}/bot{token}"),
        }
    }

    /// The bot's own account. Called once at startup for mention detection.
    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &json!({})).await
    }

    /// Long-poll for updates. Blocks server-side for up to `timeout_secs`
    /// when no updates are pending.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>> {
        let mut body = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", &body).await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        tracing::debug!(chat_id, "Sending reply");
        self.call("sendMessage", &json!({ "chat_id": chat_id, "text": text }))
            .await
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &serde_json::Value) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = resp.json().await?;
        if !envelope.ok {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: envelope.description.unwrap_or_default(),
            });
        }
        envelope.result.ok_or_else(|| {
            TelegramError::Parse(format!("{method} response carried no result"))
        })
    }
}
