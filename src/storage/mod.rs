//! Key-value persistence behind the catalog. The catalog only ever reads and
//! writes whole snapshots under a single key, so the surface is deliberately
//! the same `get`/`set` pair a browser's local storage offers.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::error::Result;

/// Local, single-user key-value store.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, or `None` when nothing was written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
