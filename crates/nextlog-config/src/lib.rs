//! Configuration for nextlog.
//!
//! Holds the user-entered credentials (DNS service API key, profiles,
//! timezone, AI settings) behind an observable [`ConfigStore`], persisted as
//! a single JSON blob through a pluggable [`KeyValueStore`] backend. Both the
//! API client and the CLI depend on this crate; it depends on neither.

pub mod error;
pub mod model;
pub mod storage;
pub mod store;

pub use error::{ConfigError, StorageError};
pub use model::{ApiConfig, ConfigPatch, DEFAULT_AI_MODEL, Profile};
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StorageKind, open_backend};
pub use store::{CONFIG_KEY, ConfigStore};
