//! Pending local notifications.
//!
//! A passive schedule: entries are written here and a platform notifier
//! consumes the ones whose trigger time has passed. Scheduling with an id
//! that already has a pending entry replaces it, so a feature can
//! reschedule freely without stacking duplicates.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Duration, Local, Timelike};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::store;

const NOTIFICATIONS_FILE: &str = "notifications.json";

const MAX_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNotification {
    pub id: String,
    pub title: String,
    pub body: String,
    /// RFC 3339 with local offset.
    pub trigger_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotificationFile {
    #[serde(default)]
    entries: Vec<ScheduledNotification>,
}

pub struct NotificationStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl NotificationStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(NOTIFICATIONS_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Queue a notification, replacing any pending entry with the same id.
    /// The body is clipped to 200 characters; the trigger lands at 09:00
    /// today when `now` is at or before 09:00, otherwise a minute from now.
    pub fn schedule(
        &self,
        id: &str,
        title: &str,
        body: &str,
        now: DateTime<Local>,
    ) -> Result<ScheduledNotification> {
        let _guard = self.write_lock.lock();
        let mut file: NotificationFile = store::load_or_default(&self.path);
        file.entries.retain(|entry| entry.id != id);
        let entry = ScheduledNotification {
            id: id.to_string(),
            title: title.to_string(),
            body: clip_body(body),
            trigger_at: trigger_time(now).to_rfc3339(),
        };
        file.entries.push(entry.clone());
        store::save_json(&self.path, &file)?;
        Ok(entry)
    }

    /// Drop the pending entry with this id. No-op when absent.
    pub fn cancel(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut file: NotificationFile = store::load_or_default(&self.path);
        let before = file.entries.len();
        file.entries.retain(|entry| entry.id != id);
        if file.entries.len() != before {
            store::save_json(&self.path, &file)?;
        }
        Ok(())
    }

    pub fn pending(&self) -> Vec<ScheduledNotification> {
        let file: NotificationFile = store::load_or_default(&self.path);
        file.entries
    }

    /// Entries whose trigger time has passed, in schedule order.
    pub fn due(&self, now: DateTime<Local>) -> Vec<ScheduledNotification> {
        self.pending()
            .into_iter()
            .filter(|entry| {
                DateTime::parse_from_rfc3339(&entry.trigger_at)
                    .map(|trigger| trigger <= now)
                    .unwrap_or(false)
            })
            .collect()
    }
}

fn clip_body(body: &str) -> String {
    if body.chars().count() > MAX_BODY_CHARS {
        let mut clipped: String = body.chars().take(MAX_BODY_CHARS - 3).collect();
        clipped.push('…');
        clipped
    } else {
        body.to_string()
    }
}

fn trigger_time(now: DateTime<Local>) -> DateTime<Local> {
    if now.hour() < 9 || (now.hour() == 9 && now.minute() == 0) {
        now.with_hour(9)
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
    } else {
        now + Duration::seconds(60)
    }
}
