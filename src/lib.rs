//! Core library surface for the course catalog: a locally persisted list of
//! course/project cards, an editor that validates and applies changes, the
//! faceted grid view, and the terminal front-end that drives them.
pub mod catalog;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;

/// The catalog store, its mutation surface, and the pure view derivations.
pub use catalog::{
    default_catalog, display_title, filter, parse_features, CatalogEditor, CatalogStore, Facets,
    ListingInput,
};

pub use error::{CatalogError, RequiredField};

/// Domain types shared by every layer.
pub use models::{Category, FacetCode, ListingRecord, Tech};

/// Storage backends for the catalog snapshot.
pub use storage::{KeyValueStore, MemoryStorage, SqliteStorage};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
