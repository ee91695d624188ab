//! CLI configuration: opens the persisted store and layers flag overrides.

use std::sync::Arc;
use std::time::Duration;

use nextlog_api::{NextDnsClient, SummaryClient, TransportConfig};
use nextlog_config::{ConfigPatch, ConfigStore, FileStore, StorageKind, open_backend};
use url::Url;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Open the store for the selected backend, hydrated from storage.
pub fn open_store(global: &GlobalOpts) -> Result<Arc<ConfigStore>, CliError> {
    let backend = open_backend(global.storage)?;
    Ok(Arc::new(ConfigStore::open(backend)))
}

/// Session-only values taken from flags and environment variables.
///
/// `--profile` selects the profile for the whole run, so that write
/// operations target it too.
pub fn flag_overrides(global: &GlobalOpts) -> ConfigPatch {
    ConfigPatch {
        api_key: global.api_key.clone().filter(|k| !k.is_empty()),
        current_profile_id: global.profile.clone().filter(|p| !p.is_empty()),
        time_zone: global.timezone.clone().filter(|tz| !tz.is_empty()),
        ..ConfigPatch::default()
    }
}

/// Open the store with flag overrides applied on top, never persisted.
///
/// Commands that write configuration must use [`open_store`] instead, or the
/// overrides would be saved along with their own change.
pub fn open_session(global: &GlobalOpts) -> Result<Arc<ConfigStore>, CliError> {
    let store = open_store(global)?;
    let overrides = flag_overrides(global);
    if !overrides.is_empty() {
        store.overlay(&overrides);
    }
    Ok(store)
}

pub fn transport(global: &GlobalOpts) -> TransportConfig {
    TransportConfig::default().with_timeout(Duration::from_secs(global.timeout))
}

pub fn api_client(store: Arc<ConfigStore>, global: &GlobalOpts) -> Result<NextDnsClient, CliError> {
    let transport = transport(global);
    let Some(ref raw) = global.api_url else {
        return Ok(NextDnsClient::new(store, &transport)?);
    };
    let base = Url::parse(raw).map_err(|e| CliError::Validation {
        field: "api-url".into(),
        reason: e.to_string(),
    })?;
    Ok(NextDnsClient::with_client(transport.build_client()?, base, store))
}

pub fn summary_client(store: Arc<ConfigStore>, global: &GlobalOpts) -> Result<SummaryClient, CliError> {
    Ok(SummaryClient::new(store, &transport(global))?)
}

/// Human-readable location of the persisted configuration.
pub fn storage_location(kind: StorageKind) -> Result<String, CliError> {
    Ok(match kind {
        StorageKind::File => {
            let store = FileStore::default_location()?;
            store.path_for(nextlog_config::CONFIG_KEY)?.display().to_string()
        }
        StorageKind::Keyring => format!(
            "system keyring (service 'nextlog', entry '{}')",
            nextlog_config::CONFIG_KEY
        ),
        StorageKind::Memory => "memory (not persisted)".to_owned(),
    })
}
