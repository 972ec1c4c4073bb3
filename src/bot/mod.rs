//! Chat command layer.
//!
//! Turns Telegram updates into command handler calls, moderation decisions
//! and mention replies. The release pipeline is reached only through
//! [`Bot::rom_reply`].

mod admin;
mod command;
mod handlers;
mod mention;
mod moderation;
mod run;

pub use admin::{AdminDirectory, HiddenAdmins};
pub use command::{is_command, parse_command, Command};
pub use handlers::{ADMIN_ONLY_REPLY, GROUP_ONLY_REPLY};
pub use mention::{mentions_bot, random_response};
pub use moderation::{is_suggestion, moderate, ModerationAction, ACCEPTED_REPLY};
pub use run::run_bot;

use std::path::PathBuf;

use log::{debug, error, warn};

use crate::config::Config;
use crate::error_handling::TelegramError;
use crate::registry::ChannelRegistry;
use crate::release::ReleaseResolver;
use crate::telegram::{BotApi, Message, SendMessage, Update};

/// Everything a handler needs, shared across update tasks.
#[derive(Debug)]
pub struct Bot {
    api: BotApi,
    http: reqwest::Client,
    resolver: ReleaseResolver,
    registry: ChannelRegistry,
    admins: AdminDirectory,
    username: String,
    catalog_url: String,
    device_page_base_url: String,
    version_file: PathBuf,
}

impl Bot {
    /// `username` is the bot's own Telegram username, without the `@`.
    pub fn new(config: &Config, http: reqwest::Client, api: BotApi, username: &str) -> Self {
        Self {
            resolver: ReleaseResolver::from_config(http.clone(), config),
            registry: ChannelRegistry::open(&config.registry_path),
            admins: AdminDirectory::new(api.clone()),
            api,
            http,
            username: username.to_string(),
            catalog_url: config.catalog_url.clone(),
            device_page_base_url: config.device_page_base_url.clone(),
            version_file: config.version_file.clone(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn admins(&self) -> &AdminDirectory {
        &self.admins
    }

    /// Handles one update. Failures are logged, never propagated.
    pub async fn handle_update(&self, update: Update) {
        if let Some(change) = update.chat_member {
            self.admins.hidden().record(change);
        }
        let Some(message) = update.message else {
            return;
        };
        if let Err(e) = self.handle_message(&message).await {
            error!(
                "Error handling message {} in chat {}: {}",
                message.message_id, message.chat.id, e
            );
        }
    }

    async fn handle_message(&self, message: &Message) -> Result<(), TelegramError> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };

        if is_command(text) {
            let Some(command) = parse_command(text, &self.username) else {
                return Ok(());
            };
            debug!("Chat {}: {:?}", message.chat.id, command);
            return match command {
                Command::Start => self.handle_start(message).await,
                Command::Rom(code) => self.handle_rom(message, code.as_deref()).await,
                Command::SysInfo => self.handle_sysinfo(message).await,
                Command::Clean => self.handle_clean(message).await,
                Command::Init => self.handle_init(message).await,
                Command::SetTopic => self.handle_set_topic(message).await,
                Command::Unknown(name) => {
                    debug!("Ignoring unknown command /{}", name);
                    Ok(())
                }
            };
        }

        let record = match self.registry.find(message.chat.id).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Could not read channel registry: {}", e);
                None
            }
        };
        match moderate(message, record.as_ref()) {
            ModerationAction::Accept => {
                self.api
                    .send_message(&SendMessage::reply_to(message, ACCEPTED_REPLY))
                    .await?;
                Ok(())
            }
            ModerationAction::Delete => {
                self.api
                    .delete_message(message.chat.id, message.message_id)
                    .await?;
                debug!(
                    "Deleted non-suggestion message {} in chat {}",
                    message.message_id, message.chat.id
                );
                Ok(())
            }
            ModerationAction::Ignore if mentions_bot(message, &self.username) => {
                self.reply_text(message, random_response()).await
            }
            ModerationAction::Ignore => Ok(()),
        }
    }
}
