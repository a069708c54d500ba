//! A single stage's store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, StockflowError};
use crate::schemas::{NaturalKey, StageRecord};

/// Outcome of [`Store::insert_if_absent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record with the same natural key already exists; nothing was written
    Duplicate { existing_id: String },
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Insertion-ordered mapping from id to record for one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store<T> {
    records: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Store { records: Vec::new() }
    }
}

impl<T: StageRecord> Store<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in insertion order
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Like [`Store::get`] but reporting `NotFound` for this stage
    pub fn require(&self, id: &str) -> Result<&T> {
        self.get(id).ok_or_else(|| not_found::<T>(id))
    }

    pub fn find_by_key(&self, key: &NaturalKey) -> Option<&T> {
        self.records.iter().find(|r| &r.natural_key() == key)
    }

    /// Append unconditionally
    pub fn insert(&mut self, record: T) {
        self.records.push(record);
    }

    /// Append unless a record with the same natural key is present.
    ///
    /// The lookup and the write happen under one `&mut` borrow, so no other
    /// caller can slip a record in between.
    pub fn insert_if_absent(&mut self, record: T) -> InsertOutcome {
        let key = record.natural_key();
        if let Some(existing) = self.find_by_key(&key) {
            return InsertOutcome::Duplicate {
                existing_id: existing.id().to_string(),
            };
        }
        self.records.push(record);
        InsertOutcome::Inserted
    }

    /// Replace the record with the same id, keeping its position
    pub fn replace(&mut self, record: T) -> Result<()> {
        let index = self.position(record.id())?;
        self.records[index] = record;
        Ok(())
    }

    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Merge `patch` into the record's JSON form, leaving unspecified fields
    /// untouched, and always stamp `updatedAt` with `now`.
    pub fn upsert_by_field(&mut self, id: &str, patch: &Map<String, Value>, now: DateTime<Utc>) -> Result<T> {
        let index = self.position(id)?;

        let mut value = serde_json::to_value(&self.records[index])
            .map_err(|e| StockflowError::InvalidJson(e.to_string()))?;
        if let Value::Object(fields) = &mut value {
            for (key, field) in patch {
                fields.insert(key.clone(), field.clone());
            }
        }

        let mut merged: T = serde_json::from_value(value).map_err(|e| {
            StockflowError::SchemaValidation(format!("{} record {}: {}", T::STAGE, id, e))
        })?;
        merged.meta_mut().touch_at(now);

        self.records[index] = merged.clone();
        Ok(merged)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>(id))
    }
}

fn not_found<T: StageRecord>(id: &str) -> StockflowError {
    StockflowError::NotFound {
        stage: T::STAGE,
        id: id.to_string(),
    }
}
