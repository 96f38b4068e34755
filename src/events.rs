//! Calendar events and notes.

use std::path::Path;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::{self, DatedRecord, RecordStore};

const EVENTS_FILE: &str = "events_notes.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Event,
    Note,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Event => "event",
            EntryKind::Note => "note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOrNote {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Calendar-day key, `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    /// Free-form time-of-day label, e.g. "09:00".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl DatedRecord for EventOrNote {
    fn id(&self) -> &str {
        &self.id
    }
    fn date_key(&self) -> &str {
        &self.date
    }
}

pub struct EventsStore {
    records: RecordStore<EventOrNote>,
}

impl EventsStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            records: RecordStore::new(data_dir.join(EVENTS_FILE)),
        }
    }

    /// Store a new entry with a fresh id and return it as persisted.
    pub fn add(
        &self,
        kind: EntryKind,
        date: &str,
        title: &str,
        time: Option<String>,
        content: Option<String>,
    ) -> anyhow::Result<EventOrNote> {
        self.records.insert(EventOrNote {
            id: records::new_record_id(),
            kind,
            date: date.to_string(),
            title: title.to_string(),
            time,
            content,
        })
    }

    pub fn all(&self) -> Vec<EventOrNote> {
        self.records.all()
    }

    pub fn for_date(&self, date_key: &str) -> Vec<EventOrNote> {
        self.records.for_date(date_key)
    }

    /// Date keys that have at least one event or note (calendar dots).
    pub fn dates_with_items(&self) -> std::collections::BTreeSet<String> {
        self.records.dates_with_items()
    }

    pub fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.records.delete(id)
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.records.clear()
    }

    /// Events (not notes) for `today` and the day after, today's first.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<EventOrNote> {
        let today_key = records::date_key(today);
        let tomorrow_key = records::date_key(today + Days::new(1));
        let mut upcoming = self.for_date(&today_key);
        upcoming.extend(self.for_date(&tomorrow_key));
        upcoming.retain(|e| e.kind == EntryKind::Event);
        upcoming
    }
}

/// Banner line for the dashboard, `None` when nothing is coming up.
pub fn upcoming_summary(events: &[EventOrNote], today_key: &str) -> Option<String> {
    if events.is_empty() {
        return None;
    }
    let today = events.iter().filter(|e| e.date == today_key).count();
    let tomorrow = events.len() - today;
    let label = if today > 0 && tomorrow > 0 {
        format!("You have {today} event(s) today and {tomorrow} tomorrow")
    } else if today > 0 {
        format!("You have {today} event(s) today")
    } else {
        format!("You have {tomorrow} event(s) tomorrow")
    };
    Some(label)
}
