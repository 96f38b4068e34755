//! Preference stores: appearance, weather/location, and the AI buddy
//! connection.
//!
//! Plain preferences live as small JSON files in the data dir. The AI buddy
//! settings are secret-grade and live in the OS secure store; reads fall
//! back to defaults so a missing or unavailable keychain never breaks the
//! app.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::secure::{SecureKey, SecureStore, SecureStoreError};
use crate::store;

const APPEARANCE_FILE: &str = "appearance.json";
const WEATHER_LOCATION_FILE: &str = "weather_location.json";

/// Environment fallback for the AI buddy API key, checked when the
/// secure store holds no key.
pub const API_KEY_ENV: &str = "MOODRS_AI_API_KEY";

pub const DEFAULT_AI_BASE_URL: &str = "https://ollama.com";
pub const DEFAULT_AI_MODEL: &str = "gpt-oss:120b";

// ---------------------------------------------------------------------------
// Appearance

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearancePreference {
    #[default]
    System,
    Light,
    Dark,
}

impl AppearancePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppearancePreference::System => "system",
            AppearancePreference::Light => "light",
            AppearancePreference::Dark => "dark",
        }
    }
}

impl std::str::FromStr for AppearancePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(AppearancePreference::System),
            "light" => Ok(AppearancePreference::Light),
            "dark" => Ok(AppearancePreference::Dark),
            other => anyhow::bail!("unknown appearance preference '{other}' (system|light|dark)"),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AppearanceFile {
    #[serde(default)]
    preference: AppearancePreference,
}

pub struct AppearanceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AppearanceStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(APPEARANCE_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn load(&self) -> AppearancePreference {
        let file: AppearanceFile = store::load_or_default(&self.path);
        file.preference
    }

    pub fn save(&self, preference: AppearancePreference) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        store::save_json(&self.path, &AppearanceFile { preference })
    }
}

// ---------------------------------------------------------------------------
// Weather & location

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherLocationSettings {
    #[serde(default = "default_true")]
    pub weather_enabled: bool,
    #[serde(default)]
    pub use_precise_location: bool,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

fn default_true() -> bool {
    true
}

impl Default for WeatherLocationSettings {
    fn default() -> Self {
        Self {
            weather_enabled: true,
            use_precise_location: false,
            location_name: String::new(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl WeatherLocationSettings {
    /// True when the stored coordinates point somewhere real.
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}

/// Partial update: only the provided fields change.
#[derive(Debug, Default, Clone)]
pub struct WeatherLocationUpdate {
    pub weather_enabled: Option<bool>,
    pub use_precise_location: Option<bool>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub struct WeatherLocationStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WeatherLocationStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(WEATHER_LOCATION_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn load(&self) -> WeatherLocationSettings {
        store::load_or_default(&self.path)
    }

    /// Merge a partial update into the stored settings and rewrite the file.
    /// Disabling weather also turns precise location off in the same write.
    pub fn update(&self, patch: WeatherLocationUpdate) -> anyhow::Result<WeatherLocationSettings> {
        let _guard = self.write_lock.lock();
        let mut settings: WeatherLocationSettings = store::load_or_default(&self.path);
        if let Some(enabled) = patch.weather_enabled {
            settings.weather_enabled = enabled;
        }
        if let Some(precise) = patch.use_precise_location {
            settings.use_precise_location = precise;
        }
        if let Some(name) = patch.location_name {
            settings.location_name = name;
        }
        if let Some(lat) = patch.latitude {
            settings.latitude = lat;
        }
        if let Some(lon) = patch.longitude {
            settings.longitude = lon;
        }
        if !settings.weather_enabled {
            settings.use_precise_location = false;
        }
        store::save_json(&self.path, &settings)?;
        Ok(settings)
    }

    pub fn reset(&self) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        store::save_json(&self.path, &WeatherLocationSettings::default())
    }
}

// ---------------------------------------------------------------------------
// AI buddy

#[derive(Debug, Clone, PartialEq)]
pub struct AiBuddySettings {
    pub enabled: bool,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Default for AiBuddySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
        }
    }
}

impl AiBuddySettings {
    /// Read from the secure store, defaulting every field that is missing
    /// or unreadable. An empty stored key falls back to `MOODRS_AI_API_KEY`.
    pub fn load() -> Self {
        let mut api_key = SecureStore::get_or(SecureKey::AiBuddyApiKey, "");
        if api_key.trim().is_empty()
            && let Ok(env_key) = std::env::var(API_KEY_ENV)
            && !env_key.trim().is_empty()
        {
            api_key = env_key;
        }
        Self {
            enabled: SecureStore::get_flag(SecureKey::AiBuddyEnabled, false),
            api_key,
            base_url: SecureStore::get_or(SecureKey::AiBuddyBaseUrl, DEFAULT_AI_BASE_URL),
            model: SecureStore::get_or(SecureKey::AiBuddyModel, DEFAULT_AI_MODEL),
        }
    }

    pub fn save(&self) -> Result<(), SecureStoreError> {
        SecureStore::set_flag(SecureKey::AiBuddyEnabled, self.enabled)?;
        SecureStore::set(SecureKey::AiBuddyApiKey, &self.api_key)?;
        SecureStore::set(SecureKey::AiBuddyBaseUrl, &self.base_url)?;
        SecureStore::set(SecureKey::AiBuddyModel, &self.model)?;
        Ok(())
    }

    /// Reset to the disabled defaults. The entries stay present; loading
    /// them afterwards reads the same values as a fresh install.
    pub fn clear() -> Result<(), SecureStoreError> {
        Self::default().save()
    }

    /// Ready to talk to the model: enabled with a usable key.
    pub fn ready(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secure::testing;

    #[test]
    fn appearance_defaults_to_system_and_roundtrips() {
        let dir = tempfile::tempdir().expect("tmp");
        let appearance = AppearanceStore::new(dir.path());
        assert_eq!(appearance.load(), AppearancePreference::System);

        appearance.save(AppearancePreference::Dark).expect("save");
        assert_eq!(appearance.load(), AppearancePreference::Dark);

        let raw = std::fs::read_to_string(dir.path().join(APPEARANCE_FILE)).expect("read");
        assert!(raw.contains("\"preference\": \"dark\""));

        appearance.save(AppearancePreference::System).expect("save");
        assert_eq!(appearance.load(), AppearancePreference::System);
    }

    #[test]
    fn weather_settings_default_when_absent_or_corrupt() {
        let dir = tempfile::tempdir().expect("tmp");
        let weather = WeatherLocationStore::new(dir.path());
        assert_eq!(weather.load(), WeatherLocationSettings::default());
        assert!(weather.load().weather_enabled);

        std::fs::write(dir.path().join(WEATHER_LOCATION_FILE), "billowing").expect("write");
        assert_eq!(weather.load(), WeatherLocationSettings::default());
    }

    #[test]
    fn weather_update_merges_partial_fields() {
        let dir = tempfile::tempdir().expect("tmp");
        let weather = WeatherLocationStore::new(dir.path());

        weather
            .update(WeatherLocationUpdate {
                location_name: Some("Cape Town".to_string()),
                latitude: Some(-33.92),
                longitude: Some(18.42),
                ..Default::default()
            })
            .expect("update");

        let settings = weather
            .update(WeatherLocationUpdate {
                use_precise_location: Some(true),
                ..Default::default()
            })
            .expect("update");

        assert!(settings.weather_enabled);
        assert!(settings.use_precise_location);
        assert_eq!(settings.location_name, "Cape Town");
        assert!(settings.has_coordinates());
    }

    #[test]
    fn disabling_weather_turns_precise_location_off() {
        let dir = tempfile::tempdir().expect("tmp");
        let weather = WeatherLocationStore::new(dir.path());
        weather
            .update(WeatherLocationUpdate {
                use_precise_location: Some(true),
                ..Default::default()
            })
            .expect("update");

        let settings = weather
            .update(WeatherLocationUpdate {
                weather_enabled: Some(false),
                ..Default::default()
            })
            .expect("update");
        assert!(!settings.weather_enabled);
        assert!(!settings.use_precise_location);

        // The invariant holds on disk, not just in the returned value.
        assert!(!weather.load().use_precise_location);
    }

    #[test]
    fn ai_buddy_defaults_when_nothing_stored() {
        let _lock = testing::KEYRING_LOCK.lock().unwrap();
        testing::install_mock_store();
        testing::reset_all_keys();
        // SAFETY: guarded by KEYRING_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::remove_var(API_KEY_ENV) };

        let settings = AiBuddySettings::load();
        assert_eq!(settings, AiBuddySettings::default());
        assert!(!settings.enabled);
        assert_eq!(settings.base_url, "https://ollama.com");
        assert_eq!(settings.model, "gpt-oss:120b");
        assert!(!settings.ready());
    }

    #[test]
    fn ai_buddy_save_load_clear() {
        let _lock = testing::KEYRING_LOCK.lock().unwrap();
        testing::install_mock_store();
        testing::reset_all_keys();
        // SAFETY: guarded by KEYRING_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::remove_var(API_KEY_ENV) };

        let settings = AiBuddySettings {
            enabled: true,
            api_key: "sk-live-42".to_string(),
            base_url: "https://ollama.example".to_string(),
            model: "llama3.3:70b".to_string(),
        };
        settings.save().expect("save");

        let loaded = AiBuddySettings::load();
        assert_eq!(loaded, settings);
        assert!(loaded.ready());

        AiBuddySettings::clear().expect("clear");
        assert_eq!(AiBuddySettings::load(), AiBuddySettings::default());
    }

    #[test]
    fn blank_stored_key_falls_back_to_env() {
        let _lock = testing::KEYRING_LOCK.lock().unwrap();
        testing::install_mock_store();
        testing::reset_all_keys();

        // SAFETY: guarded by KEYRING_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::set_var(API_KEY_ENV, "env-key") };
        let settings = AiBuddySettings::load();
        assert_eq!(settings.api_key, "env-key");

        // A stored key wins over the environment.
        SecureStore::set(SecureKey::AiBuddyApiKey, "stored-key").expect("set");
        assert_eq!(AiBuddySettings::load().api_key, "stored-key");

        // SAFETY: guarded by KEYRING_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::remove_var(API_KEY_ENV) };
        testing::reset_all_keys();
    }
}
