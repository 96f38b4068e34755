//! Gaia chat transcript persistence.
//!
//! The transcript is a bare JSON array (no wrapper object) so the whole
//! history can be replayed into the model on every turn. Clearing the chat
//! removes the file entirely rather than writing `[]`.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::records::new_record_id;
use crate::store;

const CHAT_FILE: &str = "gaia_chat.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            role,
            content: content.into(),
            created_at: store::now_iso(),
        }
    }
}

pub struct ChatStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ChatStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CHAT_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Full transcript in insertion order; empty when absent or unreadable.
    pub fn load(&self) -> Vec<ChatMessage> {
        store::load_or_default(&self.path)
    }

    /// Replace the whole transcript.
    pub fn save(&self, messages: &[ChatMessage]) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        store::save_json(&self.path, &messages)
    }

    /// Delete the transcript file.
    pub fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        store::remove_file(&self.path)
    }
}
