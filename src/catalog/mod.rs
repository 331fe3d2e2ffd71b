//! The listing catalog: the store that owns and persists the ordered record
//! list, the editor that mutates it, and the pure view derivations the grid
//! renders from.

mod defaults;
mod editor;
mod store;
mod view;

pub use defaults::default_catalog;
pub use editor::{parse_features, CatalogEditor, ListingInput};
pub use store::{CatalogStore, STORAGE_KEY};
pub use view::{display_title, excerpt, filter, Facets, CARD_EXCERPT_CHARS};
