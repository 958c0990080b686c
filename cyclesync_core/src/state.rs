//! Application state container.
//!
//! Owns the four entity lists, hydrated once from the key-value store and
//! written back in full on every mutation. Mutations go through designated
//! operations so persistence and in-memory state stay synchronized: the
//! store write happens first, and a failed write rolls the in-memory list
//! back so it never reflects an unsaved change.

use crate::catalog::Catalog;
use crate::cycle::compute_cycle;
use crate::scheduler::schedule_method;
use crate::store::{KvStore, KEY_CYCLES, KEY_FAVORITE_FOODS, KEY_FP_LOGS, KEY_SEX_LOGS};
use crate::{
    ContraceptiveLog, CycleRecord, Error, FoodCategory, FoodPreference, MethodKind, Protection,
    Result, RiskAssessment, SexLog,
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Process-wide application state over a key-value store
pub struct AppState<S: KvStore> {
    store: S,
    pub cycles: Vec<CycleRecord>,
    pub fp_logs: Vec<ContraceptiveLog>,
    pub sex_logs: Vec<SexLog>,
    pub favorite_foods: Vec<FoodPreference>,
}

/// Deserialize a stored list, treating corrupted or unreadable values as
/// absent rather than failing startup.
fn load_list<T: DeserializeOwned>(store: &impl KvStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Unable to read key '{}': {}. Using empty list.", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("Failed to parse key '{}': {}. Using empty list.", key, e);
            Vec::new()
        }
    }
}

impl<S: KvStore> AppState<S> {
    /// Hydrate all entity lists from the store
    pub fn hydrate(store: S) -> Self {
        let cycles = load_list(&store, KEY_CYCLES);
        let fp_logs = load_list(&store, KEY_FP_LOGS);
        let sex_logs = load_list(&store, KEY_SEX_LOGS);
        let favorite_foods = load_list(&store, KEY_FAVORITE_FOODS);

        tracing::debug!(
            "Hydrated state: {} cycles, {} method logs, {} activity logs, {} foods",
            cycles.len(),
            fp_logs.len(),
            sex_logs.len(),
            favorite_foods.len()
        );

        Self {
            store,
            cycles,
            fp_logs,
            sex_logs,
            favorite_foods,
        }
    }

    /// Serialize a full list and write it under its key
    fn persist<T: Serialize>(store: &mut S, key: &str, list: &[T]) -> Result<()> {
        let value = serde_json::to_string(list)?;
        store
            .set(key, &value)
            .map_err(|e| Error::Persistence(format!("write '{}' failed: {}", key, e)))
    }

    fn next_cycle_id(&self) -> u64 {
        self.cycles.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    /// Compute and append a cycle record
    pub fn log_cycle(&mut self, start: NaiveDate, end: NaiveDate) -> Result<&CycleRecord> {
        let record = compute_cycle(self.next_cycle_id(), start, end)?;

        self.cycles.push(record);
        if let Err(e) = Self::persist(&mut self.store, KEY_CYCLES, &self.cycles) {
            self.cycles.pop();
            return Err(e);
        }

        Ok(self.cycles.last().expect("just pushed"))
    }

    /// Schedule and append a contraceptive method log
    pub fn log_method(
        &mut self,
        catalog: &Catalog,
        method: MethodKind,
        start: NaiveDate,
        today: NaiveDate,
    ) -> Result<&ContraceptiveLog> {
        let profile = catalog.method(method).ok_or_else(|| {
            Error::CatalogValidation(format!("No catalog profile for '{}'", method.id()))
        })?;
        let log = schedule_method(profile, start, today)?;

        self.fp_logs.push(log);
        if let Err(e) = Self::persist(&mut self.store, KEY_FP_LOGS, &self.fp_logs) {
            self.fp_logs.pop();
            return Err(e);
        }

        Ok(self.fp_logs.last().expect("just pushed"))
    }

    /// Evaluate risk for an activity, then persist the entry
    ///
    /// The entry is saved regardless of whether an alert fires; only a
    /// validation or persistence failure aborts the log.
    pub fn log_activity(
        &mut self,
        date: NaiveDate,
        protection: Protection,
        trying_pregnancy: bool,
        today: NaiveDate,
    ) -> Result<(SexLog, RiskAssessment)> {
        let entry = SexLog {
            id: Uuid::new_v4(),
            date,
            protection,
            trying_pregnancy,
        };

        let assessment =
            crate::advisor::evaluate_risk(&entry, &self.cycles, &self.fp_logs, today)?;

        self.sex_logs.push(entry.clone());
        if let Err(e) = Self::persist(&mut self.store, KEY_SEX_LOGS, &self.sex_logs) {
            self.sex_logs.pop();
            return Err(e);
        }

        Ok((entry, assessment))
    }

    /// Remove an activity entry by id; returns false if no entry matched
    pub fn delete_sex_log(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.sex_logs.iter().position(|log| log.id == id) else {
            return Ok(false);
        };

        let removed = self.sex_logs.remove(index);
        if let Err(e) = Self::persist(&mut self.store, KEY_SEX_LOGS, &self.sex_logs) {
            self.sex_logs.insert(index, removed);
            return Err(e);
        }

        Ok(true)
    }

    /// Append a favorite food entry
    pub fn add_food(&mut self, name: &str, category: FoodCategory) -> Result<&FoodPreference> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Other("Food name must not be empty".into()));
        }

        let entry = FoodPreference {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
        };

        self.favorite_foods.push(entry);
        if let Err(e) = Self::persist(&mut self.store, KEY_FAVORITE_FOODS, &self.favorite_foods) {
            self.favorite_foods.pop();
            return Err(e);
        }

        Ok(self.favorite_foods.last().expect("just pushed"))
    }

    /// Remove a favorite food by id; returns false if no entry matched
    pub fn delete_food(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.favorite_foods.iter().position(|f| f.id == id) else {
            return Ok(false);
        };

        let removed = self.favorite_foods.remove(index);
        if let Err(e) = Self::persist(&mut self.store, KEY_FAVORITE_FOODS, &self.favorite_foods) {
            self.favorite_foods.insert(index, removed);
            return Err(e);
        }

        Ok(true)
    }
}
