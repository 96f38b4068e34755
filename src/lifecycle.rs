//! Account lifecycle: opening the local stores and destroying everything.

use std::path::Path;

use anyhow::Result;

use crate::chat::ChatStore;
use crate::events::EventsStore;
use crate::motivation::{self, MotivationStore};
use crate::notifications::NotificationStore;
use crate::planner::PlannerStore;
use crate::profile::ProfileStore;
use crate::secure::SecureStoreError;
use crate::settings::{AiBuddySettings, AppearanceStore, WeatherLocationStore};

/// Every store backing one account, opened against one data dir.
pub struct Stores {
    pub profile: ProfileStore,
    pub events: EventsStore,
    pub planner: PlannerStore,
    pub chat: ChatStore,
    pub motivation: MotivationStore,
    pub notifications: NotificationStore,
    pub appearance: AppearanceStore,
    pub weather_location: WeatherLocationStore,
}

impl Stores {
    pub fn open(data_dir: &Path) -> Self {
        Self {
            profile: ProfileStore::new(data_dir),
            events: EventsStore::new(data_dir),
            planner: PlannerStore::new(data_dir),
            chat: ChatStore::new(data_dir),
            motivation: MotivationStore::new(data_dir),
            notifications: NotificationStore::new(data_dir),
            appearance: AppearanceStore::new(data_dir),
            weather_location: WeatherLocationStore::new(data_dir),
        }
    }
}

/// Wipe the account: clear every store, then delete the profile record.
///
/// Fan-out, not a transaction: every store is attempted even when one
/// fails, and there is no rollback. The profile goes last and only when
/// everything else cleared, because its absence is what the rest of the
/// app reads as "first launch"; deleting it above surviving data would
/// resurrect that data for the next onboarding.
pub fn destroy_all(stores: &Stores) -> Result<()> {
    let mut failures: Vec<&'static str> = Vec::new();

    file_step(&mut failures, "events and notes", stores.events.clear());
    file_step(&mut failures, "planner", stores.planner.clear());
    file_step(&mut failures, "chat history", stores.chat.clear());
    file_step(&mut failures, "motivation cache", stores.motivation.delete());
    file_step(
        &mut failures,
        "motivation notification",
        stores.notifications.cancel(motivation::NOTIFICATION_ID),
    );
    file_step(
        &mut failures,
        "weather settings",
        stores.weather_location.reset(),
    );
    secure_step(&mut failures, "AI buddy settings", AiBuddySettings::clear());
    secure_step(
        &mut failures,
        "daily motivation opt-in",
        motivation::set_opt_in(false),
    );

    if !failures.is_empty() {
        anyhow::bail!(
            "could not clear: {}; the profile was left in place",
            failures.join(", ")
        );
    }

    file_step(&mut failures, "profile", stores.profile.delete());
    if !failures.is_empty() {
        anyhow::bail!("could not clear: {}", failures.join(", "));
    }
    Ok(())
}

fn file_step(failures: &mut Vec<&'static str>, name: &'static str, result: Result<()>) {
    if let Err(err) = result {
        tracing::warn!("destroy: {name} failed: {err}");
        failures.push(name);
    }
}

/// A keychain that is unreachable holds nothing this app can read, so
/// platform unavailability downgrades to a warning instead of blocking
/// the rest of the wipe.
fn secure_step(
    failures: &mut Vec<&'static str>,
    name: &'static str,
    result: Result<(), SecureStoreError>,
) {
    match result {
        Ok(()) => {}
        Err(SecureStoreError::Keyring(
            keyring::Error::PlatformFailure(err) | keyring::Error::NoStorageAccess(err),
        )) => {
            tracing::warn!("destroy: {name}: secure store unavailable: {err}");
        }
        Err(err) => {
            tracing::warn!("destroy: {name} failed: {err}");
            failures.push(name);
        }
    }
}
