//! Meal / workout / mind-body planner items.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::records::{self, DatedRecord, RecordStore};

const PLANNER_FILE: &str = "planner.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerKind {
    Meal,
    Workout,
    Mindbody,
}

impl PlannerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlannerKind::Meal => "meal",
            PlannerKind::Workout => "workout",
            PlannerKind::Mindbody => "mindbody",
        }
    }
}

impl std::str::FromStr for PlannerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "meal" => Ok(PlannerKind::Meal),
            "workout" => Ok(PlannerKind::Workout),
            "mindbody" => Ok(PlannerKind::Mindbody),
            other => anyhow::bail!("unknown planner kind '{other}' (meal|workout|mindbody)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PlannerKind,
    /// Calendar-day key, `YYYY-MM-DD`.
    pub date: String,
    pub content: String,
}

impl DatedRecord for PlannerItem {
    fn id(&self) -> &str {
        &self.id
    }
    fn date_key(&self) -> &str {
        &self.date
    }
}

pub struct PlannerStore {
    records: RecordStore<PlannerItem>,
}

impl PlannerStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            records: RecordStore::new(data_dir.join(PLANNER_FILE)),
        }
    }

    /// Store a new item with a fresh id and return it as persisted.
    pub fn add(&self, kind: PlannerKind, date: &str, content: &str) -> anyhow::Result<PlannerItem> {
        self.records.insert(PlannerItem {
            id: records::new_record_id(),
            kind,
            date: date.to_string(),
            content: content.to_string(),
        })
    }

    pub fn all(&self) -> Vec<PlannerItem> {
        self.records.all()
    }

    pub fn for_date(&self, date_key: &str) -> Vec<PlannerItem> {
        self.records.for_date(date_key)
    }

    pub fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.records.delete(id)
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.records.clear()
    }
}
