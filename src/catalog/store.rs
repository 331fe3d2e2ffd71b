use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::ListingRecord;
use crate::storage::KeyValueStore;

use super::defaults::default_catalog;

/// Storage key holding the JSON array of listing records.
pub const STORAGE_KEY: &str = "projects";

/// Single source of truth for the ordered listing collection. Every mutation
/// goes through [`CatalogEditor`](super::CatalogEditor), which commits the
/// in-memory change first and then writes a full snapshot back to storage.
pub struct CatalogStore<S: KeyValueStore> {
    storage: S,
    records: Vec<ListingRecord>,
    durability_warning: Option<String>,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Load the persisted snapshot, or seed and persist the default catalog
    /// when storage holds nothing yet. A snapshot that fails to parse is an
    /// error rather than a reason to overwrite it.
    pub fn load(storage: S) -> Result<Self> {
        let snapshot = storage.get(STORAGE_KEY)?;
        let mut store = Self {
            storage,
            records: Vec::new(),
            durability_warning: None,
        };

        match snapshot {
            Some(json) => {
                store.records = serde_json::from_str(&json)?;
                info!(count = store.records.len(), "loaded catalog snapshot");
            }
            None => {
                store.records = default_catalog();
                info!(
                    count = store.records.len(),
                    "no catalog snapshot found; seeding defaults"
                );
                store.commit();
            }
        }

        Ok(store)
    }

    /// Write the full catalog to storage, replacing any previous snapshot.
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.storage.set(STORAGE_KEY, &json)?;
        debug!(
            count = self.records.len(),
            bytes = json.len(),
            "persisted catalog snapshot"
        );
        Ok(())
    }

    /// Replace the catalog with the default set and persist it.
    pub fn reset(&mut self) {
        self.records = default_catalog();
        info!(count = self.records.len(), "catalog reset to defaults");
        self.commit();
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ListingRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Set after a snapshot write failed. The in-memory catalog is still
    /// correct; only durability is degraded until the next successful write.
    pub fn durability_warning(&self) -> Option<&str> {
        self.durability_warning.as_deref()
    }

    pub fn take_durability_warning(&mut self) -> Option<String> {
        self.durability_warning.take()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<ListingRecord> {
        &mut self.records
    }

    /// Persist after a committed in-memory change, downgrading a failure to a
    /// durability warning.
    pub(crate) fn commit(&mut self) {
        match self.persist() {
            Ok(()) => self.durability_warning = None,
            Err(err) => {
                warn!(error = %err, "failed to persist catalog snapshot");
                self.durability_warning = Some(format!("Changes not saved: {err}"));
            }
        }
    }
}
