// Configuration document and partial updates.
//
// The persisted JSON keeps the key names of the NextDNS companion app so a
// blob written there hydrates here unchanged.

use std::collections::HashSet;
use std::fmt;

use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Model used for summaries when none has been configured.
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash-latest";

// ── Profile ─────────────────────────────────────────────────────────

/// A configuration scope on the DNS filtering service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// The name if one is set, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

// ── ApiConfig ───────────────────────────────────────────────────────

/// Full client configuration.
///
/// Instances are immutable once published by the store; edits go through
/// [`ConfigPatch`] and produce a new value.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(rename = "nextdnsApiKey")]
    pub api_key: String,

    /// Single profile id from before multi-profile support.
    #[serde(rename = "nextdnsProfileId")]
    pub legacy_profile_id: String,

    pub profiles: Vec<Profile>,

    #[serde(rename = "currentProfileId")]
    pub current_profile_id: String,

    /// IANA zone name sent with log queries. Not validated.
    #[serde(rename = "timeZone")]
    pub time_zone: String,

    #[serde(rename = "geminiApiKey")]
    pub ai_api_key: String,

    #[serde(rename = "geminiModel")]
    pub ai_model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            legacy_profile_id: String::new(),
            profiles: Vec::new(),
            current_profile_id: String::new(),
            time_zone: String::new(),
            ai_api_key: String::new(),
            ai_model: DEFAULT_AI_MODEL.into(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("legacy_profile_id", &self.legacy_profile_id)
            .field("profiles", &self.profiles)
            .field("current_profile_id", &self.current_profile_id)
            .field("time_zone", &self.time_zone)
            .field("ai_api_key", &redact(&self.ai_api_key))
            .field("ai_model", &self.ai_model)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "[REDACTED]" }
}

impl ApiConfig {
    /// Parse a persisted blob, layering it over the defaults.
    ///
    /// Keys absent from the blob keep their default values, so blobs written
    /// by older versions hydrate without losing newly added fields.
    pub fn from_json(blob: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Json::string(blob))
            .extract()?;
        Ok(config.normalized())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Shallow-merge `patch` into a copy of `self`.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        if let Some(ref v) = patch.api_key {
            next.api_key.clone_from(v);
        }
        if let Some(ref v) = patch.legacy_profile_id {
            next.legacy_profile_id.clone_from(v);
        }
        if let Some(ref v) = patch.profiles {
            next.profiles.clone_from(v);
        }
        if let Some(ref v) = patch.current_profile_id {
            next.current_profile_id.clone_from(v);
        }
        if let Some(ref v) = patch.time_zone {
            next.time_zone.clone_from(v);
        }
        if let Some(ref v) = patch.ai_api_key {
            next.ai_api_key.clone_from(v);
        }
        if let Some(ref v) = patch.ai_model {
            next.ai_model.clone_from(v);
        }
        next.normalized()
    }

    /// Drop duplicate profile ids (first wins) and select the first profile
    /// when no current profile is set.
    pub fn normalized(mut self) -> Self {
        let mut seen = HashSet::new();
        self.profiles.retain(|p| seen.insert(p.id.clone()));

        if self.current_profile_id.is_empty() {
            if let Some(first) = self.profiles.first() {
                self.current_profile_id.clone_from(&first.id);
            }
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Resolve the profile a request should target.
    ///
    /// Order: explicit override, current profile, legacy profile id. Empty
    /// strings count as unset at every step.
    pub fn resolve_profile<'a>(&'a self, override_id: Option<&'a str>) -> Option<&'a str> {
        [
            override_id.unwrap_or_default(),
            self.current_profile_id.as_str(),
            self.legacy_profile_id.as_str(),
        ]
        .into_iter()
        .find(|id| !id.is_empty())
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Timezone to send with a request: explicit value, else the stored one.
    pub fn effective_time_zone<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit
            .or(Some(self.time_zone.as_str()))
            .filter(|tz| !tz.is_empty())
    }
}

// ── ConfigPatch ─────────────────────────────────────────────────────

/// Partial update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub api_key: Option<String>,
    pub legacy_profile_id: Option<String>,
    pub profiles: Option<Vec<Profile>>,
    pub current_profile_id: Option<String>,
    pub time_zone: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_model: Option<String>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn with_profiles() -> ApiConfig {
        ApiConfig {
            api_key: "key".into(),
            profiles: vec![Profile::named("abc123", "Home"), Profile::new("def456")],
            current_profile_id: "def456".into(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn empty_current_profile_falls_back_to_first() {
        let cfg = with_profiles();
        let patch = ConfigPatch {
            current_profile_id: Some(String::new()),
            ..ConfigPatch::default()
        };
        assert_eq!(cfg.merged(&patch).current_profile_id, "abc123");
    }

    #[test]
    fn merge_only_touches_given_fields() {
        let cfg = with_profiles();
        let patch = ConfigPatch {
            time_zone: Some("Europe/Paris".into()),
            ..ConfigPatch::default()
        };
        let next = cfg.merged(&patch);
        assert_eq!(next.time_zone, "Europe/Paris");
        assert_eq!(next.api_key, "key");
        assert_eq!(next.current_profile_id, "def456");
        assert_eq!(next.profiles.len(), 2);
    }

    #[test]
    fn duplicate_profile_ids_are_dropped() {
        let patch = ConfigPatch {
            profiles: Some(vec![
                Profile::named("a", "first"),
                Profile::named("a", "second"),
                Profile::new("b"),
            ]),
            ..ConfigPatch::default()
        };
        let next = ApiConfig::default().merged(&patch);
        assert_eq!(next.profiles, vec![Profile::named("a", "first"), Profile::new("b")]);
        assert_eq!(next.current_profile_id, "a");
    }

    #[test]
    fn old_blob_keeps_new_defaults() {
        let cfg = ApiConfig::from_json(r#"{"nextdnsApiKey":"k","nextdnsProfileId":"p1"}"#)
            .unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.legacy_profile_id, "p1");
        assert_eq!(cfg.ai_model, DEFAULT_AI_MODEL);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn blob_round_trips_through_json() {
        let cfg = with_profiles();
        let restored = ApiConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(restored, cfg);
    }

    #[test]
    fn malformed_blob_is_an_error() {
        assert!(ApiConfig::from_json("{not json").is_err());
        assert!(ApiConfig::from_json(r#"{"profiles":"nope"}"#).is_err());
    }

    #[test]
    fn profile_resolution_order() {
        let mut cfg = ApiConfig {
            legacy_profile_id: "legacy".into(),
            ..ApiConfig::default()
        };
        assert_eq!(cfg.resolve_profile(None), Some("legacy"));

        cfg.current_profile_id = "current".into();
        assert_eq!(cfg.resolve_profile(None), Some("current"));
        assert_eq!(cfg.resolve_profile(Some("explicit")), Some("explicit"));
        assert_eq!(cfg.resolve_profile(Some("")), Some("current"));

        assert_eq!(ApiConfig::default().resolve_profile(None), None);
    }

    #[test]
    fn stored_time_zone_used_when_not_explicit() {
        let mut cfg = ApiConfig::default();
        assert_eq!(cfg.effective_time_zone(None), None);
        cfg.time_zone = "UTC".into();
        assert_eq!(cfg.effective_time_zone(None), Some("UTC"));
        assert_eq!(cfg.effective_time_zone(Some("Asia/Tokyo")), Some("Asia/Tokyo"));
    }

    #[test]
    fn debug_output_hides_keys() {
        let cfg = ApiConfig {
            api_key: "super-secret".into(),
            ai_api_key: "also-secret".into(),
            ..ApiConfig::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("also-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
