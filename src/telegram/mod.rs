//! Telegram Bot API access.

mod api;
mod types;

pub use api::BotApi;
pub use types::{
    Chat, ChatMember, ChatMemberStatus, ChatMemberUpdated, LinkPreviewOptions, Message,
    ReplyParameters, SendMessage, Update, User,
};
