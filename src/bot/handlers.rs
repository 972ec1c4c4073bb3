//! Command handlers.
//!
//! Each handler answers one command. Telegram errors are returned to the
//! dispatcher, which logs them; nothing here is fatal to the bot.

use log::{error, info, warn};

use super::Bot;
use crate::catalog::{device_codes, fetch_catalog};
use crate::config::DELETED_ACCOUNT_NAME;
use crate::error_handling::TelegramError;
use crate::format::{
    escape_html, format_device_list, format_fetch_error, format_not_found, format_report,
    welcome_message,
};
use crate::registry::ChannelRecord;
use crate::release::Resolution;
use crate::system_info::{format_system_report, SystemReport};
use crate::telegram::{ChatMemberStatus, Message, SendMessage};

pub const ADMIN_ONLY_REPLY: &str = "You must be an admin to use this command.";
pub const GROUP_ONLY_REPLY: &str = "This command only works in group chats.";

impl Bot {
    /// Builds the `/rom` answer for an optional device code.
    ///
    /// The catalog is fetched on every call. A catalog failure yields the
    /// error text, an unknown code the not-found text, and anything else the
    /// rendered report.
    pub async fn rom_reply(&self, device_code: Option<&str>) -> String {
        let catalog = match fetch_catalog(&self.http, &self.catalog_url).await {
            Ok(catalog) => catalog,
            Err(e) => return format_fetch_error(&e),
        };

        let Some(device_code) = device_code else {
            return format_device_list(&device_codes(&catalog));
        };

        match self.resolver.resolve(&catalog, device_code).await {
            Resolution::Found(report) => {
                info!("Device info sent for device code {}.", device_code);
                format_report(&report, &self.device_page_base_url)
            }
            Resolution::NotFound(code) => format_not_found(&code),
        }
    }

    pub(super) async fn handle_start(&self, message: &Message) -> Result<(), TelegramError> {
        self.reply_html(message, welcome_message()).await?;
        info!("User requested /start command.");
        Ok(())
    }

    pub(super) async fn handle_rom(
        &self,
        message: &Message,
        device_code: Option<&str>,
    ) -> Result<(), TelegramError> {
        let text = self.rom_reply(device_code).await;
        self.api
            .send_message(
                &SendMessage::reply_to(message, text)
                    .html()
                    .without_link_preview(),
            )
            .await?;
        Ok(())
    }

    pub(super) async fn handle_sysinfo(&self, message: &Message) -> Result<(), TelegramError> {
        let Some(user_id) = self.require_admin(message).await? else {
            return Ok(());
        };

        let report = SystemReport::collect(&self.version_file).await;
        let text = format_system_report(&report, &self.username);
        match self
            .api
            .send_message(&SendMessage::new(user_id, text).html())
            .await
        {
            Ok(_) => {
                self.reply_text(
                    message,
                    "System information has been sent to your private messages.",
                )
                .await
            }
            Err(e) => {
                warn!("Could not send system information to {}: {}", user_id, e);
                self.reply_text(
                    message,
                    "I couldn't message you privately. Start a private chat with me first.",
                )
                .await
            }
        }
    }

    pub(super) async fn handle_clean(&self, message: &Message) -> Result<(), TelegramError> {
        if self.require_admin(message).await?.is_none() {
            return Ok(());
        }
        let chat_id = message.chat.id;

        match self.remove_deleted_accounts(chat_id).await {
            Ok(count) => {
                info!("Cleaned {} deleted accounts from chat {}.", count, chat_id);
                self.reply_text(message, &format!("Cleaned up {count} deleted accounts."))
                    .await
            }
            Err(e) => {
                error!("Error cleaning deleted accounts: {}", e);
                self.reply_text(message, &format!("An error occurred: {e}"))
                    .await
            }
        }
    }

    async fn remove_deleted_accounts(&self, chat_id: i64) -> Result<usize, TelegramError> {
        let deleted: Vec<i64> = self
            .api
            .get_chat_administrators(chat_id)
            .await?
            .into_iter()
            .filter(|member| member.user.first_name == DELETED_ACCOUNT_NAME)
            .map(|member| member.user.id)
            .collect();
        for user_id in &deleted {
            self.api.ban_chat_member(chat_id, *user_id).await?;
            info!("Kicked deleted account: {}", user_id);
        }
        Ok(deleted.len())
    }

    pub(super) async fn handle_init(&self, message: &Message) -> Result<(), TelegramError> {
        if message.chat.is_private() {
            return self.reply_text(message, GROUP_ONLY_REPLY).await;
        }
        if self.require_admin(message).await?.is_none() {
            return Ok(());
        }
        let chat = &message.chat;

        let owner_id = match self.api.get_chat_administrators(chat.id).await {
            Ok(admins) => admins
                .iter()
                .find(|a| a.status == ChatMemberStatus::Creator)
                .map(|a| a.user.id),
            Err(e) => {
                warn!("Error fetching owner ID of chat {}: {}", chat.id, e);
                None
            }
        };

        let record = ChannelRecord {
            channel_id: chat.id.to_string(),
            owner_id,
            channel_title: chat.display_title(),
            topic_suggestion: None,
        };
        let text = match self.registry.register(record).await {
            Ok(true) => format!(
                "Chat <b>{}</b> has been initialized.",
                escape_html(&chat.display_title())
            ),
            Ok(false) => "This chat is already initialized.".to_string(),
            Err(e) => {
                error!("Error registering chat {}: {}", chat.id, e);
                format!("An error occurred: {}", escape_html(&e.to_string()))
            }
        };
        self.reply_html(message, &text).await
    }

    pub(super) async fn handle_set_topic(&self, message: &Message) -> Result<(), TelegramError> {
        if message.chat.is_private() {
            return self.reply_text(message, GROUP_ONLY_REPLY).await;
        }
        if self.require_admin(message).await?.is_none() {
            return Ok(());
        }
        let Some(topic_id) = message.message_thread_id else {
            return self
                .reply_text(
                    message,
                    "Send this command inside the topic that should collect suggestions.",
                )
                .await;
        };

        let text = match self.registry.set_topic(message.chat.id, topic_id).await {
            Ok(true) => {
                "This topic now only accepts messages tagged #proposal, #suggestion or #пропозиція."
                    .to_string()
            }
            Ok(false) => "This chat is not initialized. Use /init first.".to_string(),
            Err(e) => {
                error!("Error saving topic of chat {}: {}", message.chat.id, e);
                format!("An error occurred: {e}")
            }
        };
        self.reply_text(message, &text).await
    }

    /// Returns the sender's id if they are privileged here; otherwise tells
    /// them so and returns `None`.
    async fn require_admin(&self, message: &Message) -> Result<Option<i64>, TelegramError> {
        if let Some(user) = &message.from {
            if self.admins.is_privileged(user.id, message.chat.id).await {
                return Ok(Some(user.id));
            }
        }
        self.reply_text(message, ADMIN_ONLY_REPLY).await?;
        Ok(None)
    }

    pub(super) async fn reply_text(&self, message: &Message, text: &str) -> Result<(), TelegramError> {
        self.api
            .send_message(&SendMessage::reply_to(message, text))
            .await?;
        Ok(())
    }

    pub(super) async fn reply_html(&self, message: &Message, text: &str) -> Result<(), TelegramError> {
        self.api
            .send_message(&SendMessage::reply_to(message, text).html())
            .await?;
        Ok(())
    }
}
