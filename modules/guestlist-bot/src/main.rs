use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use guestlist_common::Config;
use sheets_client::{ServiceAccountKey, SheetsClient};
use telegram_client::{ChatType, TelegramClient};

use guestlist_bot::projector::Projector;
use guestlist_bot::router::{ChatKind, IncomingMessage, Router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("guestlist_bot=info".parse()?))
        .init();

    info!("Guestlist bot starting...");

    // Load config
    let config = Config::from_env();

    let key = ServiceAccountKey::from_file(&config.service_account_key_path)?;
    let sheets = SheetsClient::new(key, config.spreadsheet_id.clone());

    let telegram = TelegramClient::new(&config.telegram_token);
    let me = telegram.get_me().await?;
    let handle = me
        .username
        .map(|username| format!("@{username}"))
        .ok_or_else(|| anyhow::anyhow!("Bot account has no username"))?;
    info!(handle = handle.as_str(), "Authenticated with Telegram");

    let router = Router::new(Projector::new(Arc::new(sheets)), &handle);

    info!("Polling...");
    let mut offset: Option<i64> = None;
    loop {
        let updates = match telegram.get_updates(offset, config.poll_timeout_secs).await {
            Ok(updates) => updates,
            Err(err) => {
                warn!(error = %err, "getUpdates failed; retrying");
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else { continue };
            let Some(text) = message.text else { continue };
            let kind = match message.chat.kind {
                ChatType::Private => ChatKind::Direct,
                ChatType::Group | ChatType::Supergroup => ChatKind::Group,
                ChatType::Channel | ChatType::Other => continue,
            };

            let msg = IncomingMessage {
                chat_id: message.chat.id,
                kind,
                text,
            };
            info!(chat_id = msg.chat_id, kind = ?msg.kind, "Incoming message");

            if let Some(reply) = router.handle(&msg).await {
                if let Err(err) = telegram.send_message(msg.chat_id, &reply).await {
                    warn!(chat_id = msg.chat_id, error = %err, "Failed to send reply");
                }
            }
        }
    }
}
