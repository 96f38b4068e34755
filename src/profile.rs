//! User profile persistence.
//!
//! The profile is the onboarding gate: the app is in "first launch" mode
//! exactly when `user.json` is absent. Loading tolerates the legacy layout
//! that stored an `age` number instead of a date of birth.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::store;

const PROFILE_FILE: &str = "user.json";

/// Lifestyle goal tags offered at onboarding.
pub const LIFESTYLE_GOAL_OPTIONS: &[&str] = &[
    "Fitness",
    "Mindfulness",
    "Nutrition",
    "Sleep",
    "Social",
    "Productivity",
    "Creativity",
    "Learning",
    "Stress relief",
    "Habits",
];

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Non-binary", "Prefer not to say"];

pub const RACE_OPTIONS: &[&str] = &[
    "Black",
    "White",
    "Asian",
    "Indian",
    "Hispanic",
    "Latino",
    "Prefer not to say",
];

pub const DIET_OPTIONS: &[&str] = &[
    "No restriction",
    "Vegetarian",
    "Vegan",
    "Halal",
    "Kosher",
    "Pescatarian",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub surname: String,
    pub preferred_username: String,
    #[serde(default)]
    pub lifestyle_goals: Vec<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    /// Kilograms, approximate is fine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Centimeters, approximate is fine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Stamped on the first save, never overwritten afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl UserProfile {
    /// Drop implausible measurements instead of storing them
    /// (0 < kg < 500, 0 < cm < 300), mirroring the onboarding form.
    pub fn normalized(mut self) -> Self {
        self.weight = self.weight.filter(|w| *w > 0.0 && *w < 500.0);
        self.height = self.height.filter(|h| *h > 0.0 && *h < 300.0);
        self
    }

    /// Required-field checks for the onboarding/edit surface.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("name cannot be empty");
        }
        if self.surname.trim().is_empty() {
            anyhow::bail!("surname cannot be empty");
        }
        if self.preferred_username.trim().is_empty() {
            anyhow::bail!("preferred name cannot be empty");
        }
        if NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d").is_err() {
            anyhow::bail!("date of birth must be YYYY-MM-DD");
        }
        Ok(())
    }
}

pub struct ProfileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ProfileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PROFILE_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// `None` on first launch or when the record cannot be read.
    pub fn load(&self) -> Option<UserProfile> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let mut value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("ignoring unreadable profile {}: {}", self.path.display(), err);
                return None;
            }
        };
        migrate_legacy_age(&mut value, chrono::Local::now().year());
        match serde_json::from_value(value) {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!("ignoring unreadable profile {}: {}", self.path.display(), err);
                None
            }
        }
    }

    /// Persist the whole record, stamping `completedAt` on the first save.
    pub fn save(&self, profile: &UserProfile) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        let mut stored = profile.clone();
        if stored.completed_at.as_deref().unwrap_or("").is_empty() {
            stored.completed_at = Some(store::now_iso());
        }
        store::save_json(&self.path, &stored)
    }

    /// Remove the profile record, returning the app to first-launch mode.
    pub fn delete(&self) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        store::remove_file(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Old profiles stored an `age` number. Synthesize a date of birth as
/// "this year minus age, January 1st". An approximation, not a real
/// birthday; kept one-way for compatibility with existing files.
fn migrate_legacy_age(value: &mut serde_json::Value, current_year: i32) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    if obj.get("dateOfBirth").is_some_and(|v| !v.is_null()) {
        return;
    }
    if let Some(age) = obj.get("age").and_then(|v| v.as_i64())
        && let Some(dob) = NaiveDate::from_ymd_opt(current_year - age as i32, 1, 1)
    {
        obj.insert(
            "dateOfBirth".to_string(),
            serde_json::Value::String(dob.format("%Y-%m-%d").to_string()),
        );
    }
}
