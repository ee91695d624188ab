use thiserror::Error;

// ── Storage backends ────────────────────────────────────────────────

/// Failure of a persistence backend.
///
/// The [`ConfigStore`](crate::ConfigStore) never surfaces these: it logs and
/// carries on with the in-memory configuration. Backends return them so
/// callers using a backend directly can tell what went wrong.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("secure storage error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("storage lock poisoned")]
    Poisoned,
}

// ── Configuration documents ─────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
