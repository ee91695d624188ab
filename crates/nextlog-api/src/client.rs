// NextDNS API HTTP client
//
// Wraps `reqwest::Client` with credential resolution, URL construction and
// the shared response contract. Endpoint groups (logs, profiles, lists,
// rewrites) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use std::sync::Arc;

use nextlog_config::{ApiConfig, ConfigStore};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.nextdns.io";

/// Credentials resolved from one configuration snapshot.
///
/// The snapshot is kept alongside so every value used by a request comes
/// from the same point in time.
pub(crate) struct Auth {
    pub(crate) config: Arc<ApiConfig>,
    key: SecretString,
}

/// Async client for the NextDNS REST API.
///
/// Reads credentials, profile and timezone from the shared [`ConfigStore`]
/// on every call and never writes to it.
pub struct NextDnsClient {
    http: reqwest::Client,
    base_url: Url,
    config: Arc<ConfigStore>,
}

impl NextDnsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client against the production API.
    pub fn new(config: Arc<ConfigStore>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, Url::parse(DEFAULT_BASE_URL)?, config))
    }

    /// Wrap an existing `reqwest::Client` and base URL.
    pub fn with_client(http: reqwest::Client, base_url: Url, config: Arc<ConfigStore>) -> Self {
        Self {
            http,
            base_url,
            config,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configuration store this client reads from.
    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    // ── Credential resolution ────────────────────────────────────────

    /// Snapshot the config and require an API key.
    pub(crate) fn auth(&self) -> Result<Auth, Error> {
        let config = self.config.snapshot();
        if !config.has_api_key() {
            return Err(Error::configuration(
                "NextDNS API key is not configured; run `nextlog config set --ask-key`",
            ));
        }
        let key = SecretString::from(config.api_key.clone());
        Ok(Auth { config, key })
    }

    /// Like [`auth`](Self::auth), and also resolve the target profile.
    pub(crate) fn scope(&self, profile_override: Option<&str>) -> Result<(Auth, String), Error> {
        let auth = self.auth()?;
        let profile = auth
            .config
            .resolve_profile(profile_override)
            .map(str::to_owned)
            .ok_or_else(|| {
                Error::configuration(
                    "no NextDNS profile selected; import profiles or set a profile id",
                )
            })?;
        Ok((auth, profile))
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append `segments` to the base URL, escaping each one.
    pub(crate) fn url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{base}/profiles/{profile}/{rest...}`
    pub(crate) fn profile_url(&self, profile: &str, rest: &[&str]) -> Result<Url, Error> {
        let mut segments = vec!["profiles", profile];
        segments.extend_from_slice(rest);
        self.url(&segments)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request carrying the bearer token. Writes also declare a
    /// JSON body.
    fn request(&self, method: Method, url: Url, auth: &Auth) -> Result<reqwest::RequestBuilder, Error> {
        debug!("{method} {url}");
        let mut token = HeaderValue::from_str(&format!("Bearer {}", auth.key.expose_secret()))
            .map_err(|e| Error::InvalidHeader(e.to_string()))?;
        token.set_sensitive(true);

        let is_write = method != Method::GET;
        let mut builder = self.http.request(method, url).header(AUTHORIZATION, token);
        if is_write {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        Ok(builder)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        auth: &Auth,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<Option<T>, Error> {
        let resp = self.request(Method::GET, url, auth)?.query(params).send().await?;
        read_json(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        auth: &Auth,
        url: Url,
        body: &B,
    ) -> Result<Option<T>, Error> {
        let resp = self.request(Method::POST, url, auth)?.json(body).send().await?;
        read_json(resp).await
    }

    pub(crate) async fn put<B: Serialize + Sync>(&self, auth: &Auth, url: Url, body: &B) -> Result<(), Error> {
        let resp = self.request(Method::PUT, url, auth)?.json(body).send().await?;
        expect_success(resp).await
    }

    pub(crate) async fn patch<B: Serialize + Sync>(&self, auth: &Auth, url: Url, body: &B) -> Result<(), Error> {
        let resp = self.request(Method::PATCH, url, auth)?.json(body).send().await?;
        expect_success(resp).await
    }

    pub(crate) async fn delete(&self, auth: &Auth, url: Url) -> Result<(), Error> {
        let resp = self.request(Method::DELETE, url, auth)?.send().await?;
        expect_success(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Check the status and parse the body.
///
/// `Ok(None)` for 204 or an empty body; the body is never parsed then.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Option<T>, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(remote_error(status, resp).await);
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&body).map(Some).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Check the status and discard the body.
pub(crate) async fn expect_success(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(remote_error(status, resp).await)
    }
}

async fn remote_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let body = resp.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), "request failed");
    Error::Remote {
        status: status.as_u16(),
        body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nextlog_config::{ConfigPatch, MemoryStore};

    use super::*;

    fn client(base: &str) -> NextDnsClient {
        let store = Arc::new(ConfigStore::new(Box::new(MemoryStore::new())));
        NextDnsClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap(), store)
    }

    #[test]
    fn profile_url_escapes_segments() {
        let client = client("https://api.nextdns.io");
        let url = client.profile_url("ab/c d", &["logs", "stream"]).unwrap();
        assert_eq!(url.as_str(), "https://api.nextdns.io/profiles/ab%2Fc%20d/logs/stream");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let client = client("http://127.0.0.1:8080/proxy/");
        let url = client.url(&["profiles"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/profiles");
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let client = client("https://api.nextdns.io");
        assert!(client.auth().is_err_and(|e| e.is_configuration()));
    }

    #[test]
    fn scope_uses_snapshot_profile() {
        let client = client("https://api.nextdns.io");
        client.config().update(&ConfigPatch {
            api_key: Some("k".into()),
            legacy_profile_id: Some("legacy".into()),
            ..ConfigPatch::default()
        });
        let (_, profile) = client.scope(None).unwrap();
        assert_eq!(profile, "legacy");
        let (_, profile) = client.scope(Some("other")).unwrap();
        assert_eq!(profile, "other");
    }
}
