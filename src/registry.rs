//! Registry of chats initialized with the bot.
//!
//! Stored as a pretty-printed JSON array that is read and rewritten whole.
//! Every read-modify-write holds the registry lock, so concurrent handlers in
//! this process cannot lose each other's updates.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error_handling::RegistryError;

/// One initialized chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Chat id, stored as a string
    pub channel_id: String,
    pub owner_id: Option<i64>,
    pub channel_title: String,
    /// Forum topic where only suggestions are allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_suggestion: Option<i64>,
}

/// File-backed channel registry.
#[derive(Debug)]
pub struct ChannelRegistry {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ChannelRegistry {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record. A missing file is an empty registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Vec<ChannelRecord>, RegistryError> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Replaces the whole registry with `records`.
    pub async fn save(&self, records: &[ChannelRecord]) -> Result<(), RegistryError> {
        let _guard = self.lock.lock().await;
        self.write_unlocked(records).await
    }

    /// Finds the record of `chat_id`.
    pub async fn find(&self, chat_id: i64) -> Result<Option<ChannelRecord>, RegistryError> {
        let key = chat_id.to_string();
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|record| record.channel_id == key))
    }

    pub async fn is_initialized(&self, chat_id: i64) -> Result<bool, RegistryError> {
        Ok(self.find(chat_id).await?.is_some())
    }

    /// Adds `record` unless its chat is already registered.
    ///
    /// Returns `true` if the record was added.
    pub async fn register(&self, record: ChannelRecord) -> Result<bool, RegistryError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_unlocked().await?;
        if records.iter().any(|r| r.channel_id == record.channel_id) {
            debug!("Chat {} is already registered", record.channel_id);
            return Ok(false);
        }
        info!(
            "Registering chat {} ({})",
            record.channel_id, record.channel_title
        );
        records.push(record);
        self.write_unlocked(&records).await?;
        Ok(true)
    }

    /// Sets the suggestion topic of a registered chat.
    ///
    /// Returns `false` if the chat is not registered.
    pub async fn set_topic(&self, chat_id: i64, topic_id: i64) -> Result<bool, RegistryError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_unlocked().await?;
        let key = chat_id.to_string();
        let Some(record) = records.iter_mut().find(|r| r.channel_id == key) else {
            return Ok(false);
        };
        record.topic_suggestion = Some(topic_id);
        info!("Suggestion topic of chat {} set to {}", chat_id, topic_id);
        self.write_unlocked(&records).await?;
        Ok(true)
    }

    async fn read_unlocked(&self) -> Result<Vec<ChannelRecord>, RegistryError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the file through a sibling temp file and a rename.
    async fn write_unlocked(&self, records: &[ChannelRecord]) -> Result<(), RegistryError> {
        let json = serde_json::to_vec_pretty(records)?;
        let tmp_path = self.temp_path();
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "channels.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
