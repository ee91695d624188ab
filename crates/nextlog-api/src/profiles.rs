// Profile endpoints

use tracing::debug;

use crate::client::NextDnsClient;
use crate::error::Error;
use crate::models::{ListShape, ObjectShape, ProfileRecord};
use nextlog_config::Profile;

/// Segment patched when the caller passes an empty one.
const DEFAULT_SETTINGS_SEGMENT: &str = "settings";

impl NextDnsClient {
    /// List every profile the API key can see.
    ///
    /// `GET /profiles`. Needs only the API key, not a selected profile.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, Error> {
        let auth = self.auth()?;
        let url = self.url(&["profiles"])?;
        let shape: Option<ListShape<Profile>> = self.get(&auth, url, &[]).await?;
        Ok(shape.map(ListShape::into_vec).unwrap_or_default())
    }

    /// Fetch one profile's metadata.
    ///
    /// `GET /profiles/{id}`. A body without an `id` describes the requested
    /// profile.
    pub async fn get_profile(&self, profile_override: Option<&str>) -> Result<Option<Profile>, Error> {
        let (auth, profile) = self.scope(profile_override)?;
        let url = self.profile_url(&profile, &[])?;
        let shape: Option<ObjectShape<ProfileRecord>> = self.get(&auth, url, &[]).await?;
        Ok(shape.map(|s| s.into_inner().into_profile(&profile)))
    }

    /// Send a partial update to a profile sub-resource.
    ///
    /// `PATCH /profiles/{id}/{segment}` where `segment` may span several path
    /// levels (`settings/performance`).
    pub async fn patch_settings(&self, segment: &str, body: &serde_json::Value) -> Result<(), Error> {
        let (auth, profile) = self.scope(None)?;
        let segment = settings_segment(segment);
        let rest: Vec<&str> = segment.split('/').filter(|s| !s.is_empty()).collect();
        let url = self.profile_url(&profile, &rest)?;
        debug!(profile = %profile, segment, "patching profile");
        self.patch(&auth, url, body).await
    }
}

/// Strip surrounding slashes; an empty result means the settings root.
pub fn settings_segment(raw: &str) -> &str {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        DEFAULT_SETTINGS_SEGMENT
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::settings_segment;

    #[test]
    fn segment_is_trimmed() {
        assert_eq!(settings_segment("/settings/performance/"), "settings/performance");
        assert_eq!(settings_segment("privacy"), "privacy");
        assert_eq!(settings_segment(""), "settings");
        assert_eq!(settings_segment("///"), "settings");
    }
}
