//! Resolved appearance state.
//!
//! Holds the persisted preference together with the platform dark-mode
//! signal and resolves the effective mode. Constructed once at startup and
//! passed where needed; there is no global theme.

use anyhow::Result;

use crate::settings::{AppearancePreference, AppearanceStore};

/// Terminals have no appearance API, so the platform signal is an
/// environment knob. Unset means light.
pub const SYSTEM_DARK_ENV: &str = "MOODRS_SYSTEM_DARK";

pub struct ThemeContext {
    store: AppearanceStore,
    preference: AppearancePreference,
    system_dark: bool,
}

impl ThemeContext {
    pub fn new(store: AppearanceStore, system_dark: bool) -> Self {
        let preference = store.load();
        Self {
            store,
            preference,
            system_dark,
        }
    }

    pub fn preference(&self) -> AppearancePreference {
        self.preference
    }

    /// `dark` always wins, `light` always loses, `system` follows the
    /// platform signal.
    pub fn is_dark(&self) -> bool {
        match self.preference {
            AppearancePreference::Dark => true,
            AppearancePreference::Light => false,
            AppearancePreference::System => self.system_dark,
        }
    }

    /// Persist a new preference and apply it in place.
    pub fn set_preference(&mut self, preference: AppearancePreference) -> Result<()> {
        self.store.save(preference)?;
        self.preference = preference;
        Ok(())
    }

    /// Counterpart of a platform appearance-change event.
    pub fn set_system_dark(&mut self, dark: bool) {
        self.system_dark = dark;
    }
}

pub fn detect_system_dark() -> bool {
    std::env::var(SYSTEM_DARK_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn preference_resolution_matrix() {
        let dir = tempfile::tempdir().expect("tmp");
        let mut theme = ThemeContext::new(AppearanceStore::new(dir.path()), false);
        assert_eq!(theme.preference(), AppearancePreference::System);
        assert!(!theme.is_dark());

        theme.set_system_dark(true);
        assert!(theme.is_dark());

        theme.set_preference(AppearancePreference::Light).expect("set");
        assert!(!theme.is_dark());

        theme.set_preference(AppearancePreference::Dark).expect("set");
        theme.set_system_dark(false);
        assert!(theme.is_dark());
    }

    #[test]
    fn set_preference_persists_across_contexts() {
        let dir = tempfile::tempdir().expect("tmp");
        let mut theme = ThemeContext::new(AppearanceStore::new(dir.path()), false);
        theme.set_preference(AppearancePreference::Dark).expect("set");

        let fresh = ThemeContext::new(AppearanceStore::new(dir.path()), false);
        assert_eq!(fresh.preference(), AppearancePreference::Dark);
        assert!(fresh.is_dark());
    }

    #[test]
    fn system_signal_reads_from_the_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        // SAFETY: guarded by ENV_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::remove_var(SYSTEM_DARK_ENV) };
        assert!(!detect_system_dark());

        // SAFETY: guarded by ENV_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::set_var(SYSTEM_DARK_ENV, "1") };
        assert!(detect_system_dark());

        // SAFETY: guarded by ENV_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::set_var(SYSTEM_DARK_ENV, "TRUE") };
        assert!(detect_system_dark());

        // SAFETY: guarded by ENV_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::set_var(SYSTEM_DARK_ENV, "no") };
        assert!(!detect_system_dark());

        // SAFETY: guarded by ENV_LOCK to avoid concurrent env mutations in tests.
        unsafe { std::env::remove_var(SYSTEM_DARK_ENV) };
    }
}
