// ── Observable configuration store ──
//
// Single source of truth for credentials and profile selection. Every edit
// replaces the published `Arc<ApiConfig>`, so snapshots already handed to
// in-flight requests never change underneath them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::{ApiConfig, ConfigPatch, Profile};
use crate::storage::KeyValueStore;

/// Storage key of the persisted configuration blob.
pub const CONFIG_KEY: &str = "api-config";

/// Process-wide configuration, persisted through a [`KeyValueStore`].
///
/// Persistence is best effort: storage failures are logged and otherwise
/// ignored, and the in-memory value stays authoritative for the session.
pub struct ConfigStore {
    backend: Box<dyn KeyValueStore>,
    current: watch::Sender<Arc<ApiConfig>>,
    /// Held across publish and storage write so blobs land in publish order.
    /// Readers never take it.
    writes: Mutex<()>,
}

impl ConfigStore {
    /// Create a store holding the defaults, without reading storage.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let (current, _) = watch::channel(Arc::new(ApiConfig::default()));
        Self {
            backend,
            current,
            writes: Mutex::new(()),
        }
    }

    /// Create a store and hydrate it from storage.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let store = Self::new(backend);
        store.load();
        store
    }

    /// Replace the in-memory configuration with the persisted one, layered
    /// over defaults. A missing or unreadable blob leaves the store as is.
    pub fn load(&self) {
        let blob = match self.backend.get(CONFIG_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("no persisted config");
                return;
            }
            Err(e) => {
                warn!(error = %e, "failed to read persisted config");
                return;
            }
        };

        match ApiConfig::from_json(&blob) {
            Ok(config) => {
                debug!("persisted config loaded");
                self.current.send_replace(Arc::new(config));
            }
            Err(e) => warn!(error = %e, "ignoring malformed persisted config"),
        }
    }

    /// The configuration as of now.
    pub fn snapshot(&self) -> Arc<ApiConfig> {
        self.current.borrow().clone()
    }

    /// Receive every configuration published from here on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ApiConfig>> {
        self.current.subscribe()
    }

    /// Merge `patch`, persist the result and publish it.
    ///
    /// Merges are applied under the channel's lock, so rapid concurrent
    /// updates run one after another and none is lost. Storage is written
    /// after publishing, so `snapshot` never waits on file or keyring I/O.
    pub fn update(&self, patch: &ConfigPatch) -> Arc<ApiConfig> {
        self.apply(patch, true)
    }

    /// Merge `patch` for this session only, without persisting it.
    pub fn overlay(&self, patch: &ConfigPatch) -> Arc<ApiConfig> {
        self.apply(patch, false)
    }

    /// Replace the profile list with `profiles` and select the first one.
    pub fn import_profiles(&self, profiles: Vec<Profile>) -> Arc<ApiConfig> {
        let current_profile_id = profiles.first().map(|p| p.id.clone());
        self.update(&ConfigPatch {
            profiles: Some(profiles),
            current_profile_id,
            ..ConfigPatch::default()
        })
    }

    /// Restore defaults and delete the persisted blob.
    pub fn reset(&self) {
        let _writes = self.lock_writes();
        self.current.send_replace(Arc::new(ApiConfig::default()));
        if let Err(e) = self.backend.delete(CONFIG_KEY) {
            warn!(error = %e, "failed to delete persisted config");
        }
    }

    fn apply(&self, patch: &ConfigPatch, persist: bool) -> Arc<ApiConfig> {
        let _writes = persist.then(|| self.lock_writes());
        let mut published = None;
        self.current.send_modify(|current| {
            let next = Arc::new(current.merged(patch));
            *current = Arc::clone(&next);
            published = Some(next);
        });
        let next = published.unwrap_or_else(|| self.snapshot());
        if persist {
            self.persist(&next);
        }
        next
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, config: &ApiConfig) {
        let result = config
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|blob| self.backend.set(CONFIG_KEY, &blob).map_err(|e| e.to_string()));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist config");
        }
    }
}
