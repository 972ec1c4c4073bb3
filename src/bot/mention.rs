//! Replies to messages that mention the bot.

use rand::seq::IndexedRandom;

use crate::config::MENTION_RESPONSES;
use crate::telegram::Message;

/// True if `message` tags `@bot_username` or replies to one of the bot's messages.
pub fn mentions_bot(message: &Message, bot_username: &str) -> bool {
    let tagged = message.text.as_deref().is_some_and(|text| {
        text.to_lowercase()
            .contains(&format!("@{}", bot_username.to_lowercase()))
    });
    let replied = message
        .reply_to_message
        .as_ref()
        .and_then(|reply| reply.from.as_ref())
        .and_then(|from| from.username.as_deref())
        .is_some_and(|name| name.eq_ignore_ascii_case(bot_username));
    tagged || replied
}

pub fn random_response() -> &'static str {
    MENTION_RESPONSES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("I'm here!")
}
