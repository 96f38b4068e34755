//! OS-backed secure storage for secrets and opt-in flags.
//!
//! Backed by the platform credential store (Keychain on macOS, Credential
//! Manager on Windows, Secret Service on Linux). Everything that is not a
//! plain preference lives here: the AI buddy connection settings and the
//! daily motivation opt-in.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

const SERVICE_NAME: &str = "moodrs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureKey {
    AiBuddyEnabled,
    AiBuddyApiKey,
    AiBuddyBaseUrl,
    AiBuddyModel,
    DailyMotivationEnabled,
}

impl SecureKey {
    fn key_name(&self) -> &'static str {
        match self {
            SecureKey::AiBuddyEnabled => "ai_buddy_enabled",
            SecureKey::AiBuddyApiKey => "ai_buddy_api_key",
            SecureKey::AiBuddyBaseUrl => "ai_buddy_base_url",
            SecureKey::AiBuddyModel => "ai_buddy_model",
            SecureKey::DailyMotivationEnabled => "daily_motivation_enabled",
        }
    }
}

impl fmt::Display for SecureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecureStoreError {
    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("no value stored for {0}")]
    NotFound(SecureKey),
}

// One credential handle per key, created on first use and reused after.
fn entries() -> &'static Mutex<HashMap<&'static str, keyring::Entry>> {
    static ENTRIES: OnceLock<Mutex<HashMap<&'static str, keyring::Entry>>> = OnceLock::new();
    ENTRIES.get_or_init(|| Mutex::new(HashMap::new()))
}

fn with_entry<R>(
    key: SecureKey,
    op: impl FnOnce(&keyring::Entry) -> R,
) -> Result<R, SecureStoreError> {
    let mut map = entries().lock();
    let entry = match map.entry(key.key_name()) {
        MapEntry::Occupied(occupied) => occupied.into_mut(),
        MapEntry::Vacant(vacant) => {
            vacant.insert(keyring::Entry::new(SERVICE_NAME, key.key_name())?)
        }
    };
    Ok(op(entry))
}

pub struct SecureStore;

impl SecureStore {
    pub fn set(key: SecureKey, value: &str) -> Result<(), SecureStoreError> {
        with_entry(key, |entry| entry.set_password(value))??;
        Ok(())
    }

    pub fn get(key: SecureKey) -> Result<String, SecureStoreError> {
        match with_entry(key, |entry| entry.get_password())? {
            Ok(value) => Ok(value),
            Err(keyring::Error::NoEntry) => Err(SecureStoreError::NotFound(key)),
            Err(err) => Err(SecureStoreError::Keyring(err)),
        }
    }

    /// Read with a fallback: missing values return the default quietly,
    /// platform failures return it with a warning. Settings reads never
    /// propagate keychain trouble to the caller.
    pub fn get_or(key: SecureKey, default: &str) -> String {
        match Self::get(key) {
            Ok(value) => value,
            Err(SecureStoreError::NotFound(_)) => default.to_string(),
            Err(err) => {
                tracing::warn!("secure storage read failed for {key}: {err}");
                default.to_string()
            }
        }
    }

    pub fn get_flag(key: SecureKey, default: bool) -> bool {
        Self::get_or(key, if default { "true" } else { "false" }) == "true"
    }

    pub fn set_flag(key: SecureKey, value: bool) -> Result<(), SecureStoreError> {
        Self::set(key, if value { "true" } else { "false" })
    }

    /// Deleting a key that was never stored counts as success.
    pub fn delete(key: SecureKey) -> Result<(), SecureStoreError> {
        match with_entry(key, |entry| entry.delete_credential())? {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(SecureStoreError::Keyring(err)),
        }
    }

    pub fn exists(key: SecureKey) -> bool {
        Self::get(key).is_ok()
    }
}
