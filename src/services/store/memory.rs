use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{AnimalStore, StoreError};
use crate::models::animal::{Animal, AnimalChanges};

/// In-process record store for tests and local experiments.
///
/// Can be switched into a failing mode to simulate an outage of the real
/// backend, and counts every write it performs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Animal>>,
    failing: AtomicBool,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Animal>) -> Self {
        let store = Self::new();
        for animal in records {
            store.insert(animal);
        }
        store
    }

    pub fn insert(&self, animal: Animal) {
        self.records().insert(animal.id.clone(), animal);
    }

    /// Read a record without going through the trait (no failure injection).
    pub fn get(&self, id: &str) -> Option<Animal> {
        self.records().get(id).cloned()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of write operations (updates and deletes) performed.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, Animal>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AnimalStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Animal>, StoreError> {
        self.ensure_available()?;
        Ok(self.get(id))
    }

    async fn touch_last_scanned(&self, id: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.ensure_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(animal) = self.records().get_mut(id) {
            animal.last_scanned = Some(at);
        }
        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        changes: &AnimalChanges,
    ) -> Result<Option<Animal>, StoreError> {
        self.ensure_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records();
        let Some(animal) = records.get_mut(id) else {
            return Ok(None);
        };

        animal.nama = changes.nama.clone();
        animal.jenis = changes.jenis.clone();
        animal.usia = changes.usia;
        if let Some(status) = &changes.status_kesehatan {
            animal.status_kesehatan = status.clone();
        }
        Ok(Some(animal.clone()))
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        self.ensure_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.records().remove(id).map_or(0, |_| 1))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.ensure_available()
    }
}
