//! Administrator checks.
//!
//! A user is privileged in a chat if the chat's administrator list contains
//! them, or if a `chat_member` update has been seen promoting them there.
//! The second source covers anonymous ("hidden") administrators, which the
//! administrator list does not reveal to bots.

use std::collections::HashMap;
use std::sync::Mutex;

use log::{debug, warn};

use crate::telegram::{BotApi, ChatMemberStatus, ChatMemberUpdated};

/// Users promoted in a chat, keyed by `(chat_id, user_id)`.
///
/// Only currently privileged users are kept; a demotion removes the entry.
#[derive(Debug, Default)]
pub struct HiddenAdmins {
    promoted: Mutex<HashMap<(i64, i64), ChatMemberStatus>>,
}

impl HiddenAdmins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a membership change for later privilege checks.
    pub fn record(&self, event: ChatMemberUpdated) {
        let key = (event.chat.id, event.new_chat_member.user.id);
        let status = event.new_chat_member.status;
        debug!("Chat {}: user {} is now {}", key.0, key.1, status);
        let mut promoted = self.promoted.lock().unwrap_or_else(|e| e.into_inner());
        if status.is_privileged() {
            promoted.insert(key, status);
        } else {
            promoted.remove(&key);
        }
    }

    /// True if the latest recorded change for `user_id` in `chat_id` made
    /// them creator or administrator.
    pub fn is_promoted(&self, user_id: i64, chat_id: i64) -> bool {
        let promoted = self.promoted.lock().unwrap_or_else(|e| e.into_inner());
        promoted.contains_key(&(chat_id, user_id))
    }

    /// Number of promotions currently held.
    pub fn len(&self) -> usize {
        self.promoted.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Answers "may this user run admin commands here?".
#[derive(Debug)]
pub struct AdminDirectory {
    api: BotApi,
    hidden: HiddenAdmins,
}

impl AdminDirectory {
    pub fn new(api: BotApi) -> Self {
        Self {
            api,
            hidden: HiddenAdmins::new(),
        }
    }

    pub fn hidden(&self) -> &HiddenAdmins {
        &self.hidden
    }

    /// Checks the administrator list, then recorded promotions.
    ///
    /// An API failure is logged and treated as "not listed".
    pub async fn is_privileged(&self, user_id: i64, chat_id: i64) -> bool {
        match self.api.get_chat_administrators(chat_id).await {
            Ok(admins) if admins.iter().any(|a| a.user.id == user_id) => return true,
            Ok(_) => {}
            Err(e) => warn!("Could not list administrators of chat {}: {}", chat_id, e),
        }
        self.hidden.is_promoted(user_id, chat_id)
    }
}
