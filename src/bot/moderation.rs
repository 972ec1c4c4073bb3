//! Suggestion topic moderation.

use crate::config::SUGGESTION_TAGS;
use crate::registry::ChannelRecord;
use crate::telegram::Message;

pub const ACCEPTED_REPLY: &str = "Your message has been accepted as a suggestion. We will review it.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    /// The message is outside the suggestion topic.
    Ignore,
    /// A tagged suggestion: acknowledge it in the topic.
    Accept,
    /// Untagged chatter in the suggestion topic: remove it.
    Delete,
}

pub fn is_suggestion(text: &str) -> bool {
    SUGGESTION_TAGS.iter().any(|tag| text.contains(tag))
}

/// Decides what to do with a plain text message given its chat's record.
pub fn moderate(message: &Message, record: Option<&ChannelRecord>) -> ModerationAction {
    let Some(topic) = record.and_then(|r| r.topic_suggestion) else {
        return ModerationAction::Ignore;
    };
    if message.message_thread_id != Some(topic) {
        return ModerationAction::Ignore;
    }
    match message.text.as_deref() {
        Some(text) if is_suggestion(text) => ModerationAction::Accept,
        _ => ModerationAction::Delete,
    }
}
