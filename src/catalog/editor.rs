use chrono::Utc;
use tracing::info;

use crate::error::{CatalogError, RequiredField, Result};
use crate::models::{Category, ListingRecord, Tech};
use crate::storage::KeyValueStore;

use super::store::CatalogStore;

/// Values collected by the listing form. `features` is still the raw
/// comma-separated text; it is split when the record is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingInput {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub tech: Option<Tech>,
    pub project: Option<Category>,
    pub price: String,
    pub features: String,
    pub buy_link: String,
}

impl ListingInput {
    /// Prefill an edit form from a stored record.
    pub fn from_record(record: &ListingRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            image: record.image.clone(),
            link: record.link.clone(),
            tech: record.tech.clone(),
            project: record.project.clone(),
            price: record.price.clone(),
            features: record.features.join(", "),
            buy_link: record.buy_link.clone(),
        }
    }

    /// Presence checks for title, link and image. Only empty values count as
    /// missing; trimming is left to whoever collects the input.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<RequiredField> = [
            (RequiredField::Title, &self.title),
            (RequiredField::Link, &self.link),
            (RequiredField::Image, &self.image),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation { missing })
        }
    }

    fn into_record(self, id: String) -> ListingRecord {
        ListingRecord {
            id,
            features: parse_features(&self.features),
            title: self.title,
            description: self.description,
            image: self.image,
            link: self.link,
            tech: self.tech,
            project: self.project,
            price: self.price,
            buy_link: self.buy_link,
        }
    }
}

/// Split comma-separated feature text into trimmed, non-empty entries.
pub fn parse_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validated mutation surface over a [`CatalogStore`]. Each operation commits
/// to memory, then persists the whole catalog before returning.
pub struct CatalogEditor<'a, S: KeyValueStore> {
    store: &'a mut CatalogStore<S>,
}

impl<'a, S: KeyValueStore> CatalogEditor<'a, S> {
    pub fn new(store: &'a mut CatalogStore<S>) -> Self {
        Self { store }
    }

    /// Append a new record with a freshly generated id.
    pub fn create(&mut self, input: ListingInput) -> Result<ListingRecord> {
        input.validate()?;

        let id = self.next_id();
        let record = input.into_record(id);
        self.store.records_mut().push(record.clone());
        self.store.commit();

        info!(id = %record.id, title = %record.title, "created listing");
        Ok(record)
    }

    /// Replace every field of the record with `id` except the id itself. The
    /// record keeps its position in the catalog.
    pub fn update(&mut self, id: &str, input: ListingInput) -> Result<ListingRecord> {
        input.validate()?;

        let index = self
            .store
            .position(id)
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })?;

        let record = input.into_record(id.to_string());
        self.store.records_mut()[index] = record.clone();
        self.store.commit();

        info!(id, title = %record.title, "updated listing");
        Ok(record)
    }

    /// Remove the record with `id`. Returns whether anything was removed;
    /// deleting an absent id is a no-op and skips the snapshot write.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.store.position(id) else {
            return false;
        };

        self.store.records_mut().remove(index);
        self.store.commit();

        info!(id, "deleted listing");
        true
    }

    /// Millisecond timestamp, bumped until it no longer collides with an
    /// existing id.
    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.store.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}
