//! Long-polling runtime.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use super::Bot;
use crate::config::{Config, POLL_ERROR_BACKOFF_SECS};
use crate::initialization::init_client;
use crate::telegram::BotApi;

/// Runs the bot until Ctrl-C.
///
/// Verifies the token with `getMe`, then long-polls `getUpdates` and handles
/// every update on its own task. A failed poll is logged and polling resumes
/// after a short pause.
///
/// # Errors
///
/// Fails only during startup: invalid configuration, missing token, client
/// construction, or a token the API rejects.
pub async fn run_bot(config: Config) -> Result<()> {
    config.validate()?;
    let token = config
        .token
        .clone()
        .context("No bot token: pass --token or set TELEGRAM_TOKEN")?;

    let http = init_client(&config).context("Failed to initialize HTTP client")?;
    let api = BotApi::new(http.clone(), &config.api_base_url, &token);
    let me = api
        .get_me()
        .await
        .context("Failed to verify Telegram bot token")?;
    let username = me.username.clone().unwrap_or_else(|| me.first_name.clone());
    info!("Authenticated as @{} (lookup mode: {})", username, config.lookup_mode);

    let bot = Arc::new(Bot::new(&config, http, api.clone(), &username));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("Bot started polling...");
    let mut offset: i64 = 0;
    loop {
        let polled = tokio::select! {
            polled = api.get_updates(offset, config.poll_timeout_seconds) => polled,
            _ = &mut shutdown => break,
        };

        match polled {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    let bot = Arc::clone(&bot);
                    tokio::spawn(async move { bot.handle_update(update).await });
                }
            }
            Err(e) => {
                warn!(
                    "Polling failed: {}, retrying in {}s",
                    e, POLL_ERROR_BACKOFF_SECS
                );
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_secs(POLL_ERROR_BACKOFF_SECS)) => {}
                    _ = &mut shutdown => break,
                }
            }
        }
    }

    info!("Shutdown signal received, polling stopped");
    Ok(())
}
