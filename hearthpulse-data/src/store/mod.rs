// Key-value storage backends.
//
// The application persists whole collections as JSON strings under fixed
// keys, so the storage contract is a plain string key-value store.
mod errors;
mod in_memory;
mod sqlite;

pub use errors::StoreError;
pub use in_memory::InMemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Contract for a string key-value store with whole-value read/replace
/// semantics. No partial update, no transactions, no migration versioning.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
