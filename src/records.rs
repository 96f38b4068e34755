//! Generic whole-collection record store.
//!
//! Events/notes and planner items share this engine: one JSON file holding
//! `{"items": [...]}`, rewritten in full on every mutation. A per-store
//! mutex keeps the read-modify-write cycle sequential; readers outside the
//! lock always see a complete file thanks to the atomic writes in `store`.

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::path::PathBuf;

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::store;

/// A record that lives in a date-keyed collection.
pub trait DatedRecord: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> &str;
    fn date_key(&self) -> &str;
}

/// Fresh collision-safe record id.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Calendar-day key (`YYYY-MM-DD`) used to group and filter records.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date key in local time.
pub fn today_key() -> String {
    date_key(chrono::Local::now().date_naive())
}

#[derive(Debug, Serialize, Deserialize)]
struct Collection<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

pub struct RecordStore<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T: DatedRecord> RecordStore<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Full collection in insertion order; empty when the file is missing
    /// or unreadable.
    pub fn all(&self) -> Vec<T> {
        store::load_or_default::<Collection<T>>(&self.path).items
    }

    /// Records whose date key matches exactly, in insertion order.
    pub fn for_date(&self, date_key: &str) -> Vec<T> {
        self.all()
            .into_iter()
            .filter(|r| r.date_key() == date_key)
            .collect()
    }

    /// Distinct date keys that have at least one record. Computed fresh from
    /// the collection on every call, so it can never go stale.
    pub fn dates_with_items(&self) -> BTreeSet<String> {
        self.all()
            .into_iter()
            .map(|r| r.date_key().to_string())
            .collect()
    }

    /// Append a record and persist the whole collection.
    pub fn insert(&self, record: T) -> anyhow::Result<T> {
        let _guard = self.write_lock.lock();
        let mut data = store::load_or_default::<Collection<T>>(&self.path);
        data.items.push(record.clone());
        store::save_json(&self.path, &data)?;
        Ok(record)
    }

    /// Remove the record with `id`. Removing an unknown id is a no-op.
    pub fn delete(&self, id: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        let mut data = store::load_or_default::<Collection<T>>(&self.path);
        let before = data.items.len();
        data.items.retain(|r| r.id() != id);
        if data.items.len() != before {
            store::save_json(&self.path, &data)?;
        }
        Ok(())
    }

    /// Drop every record, leaving an empty collection on disk.
    pub fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock();
        store::save_json(&self.path, &Collection::<T>::default())
    }
}
