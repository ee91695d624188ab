// Request and response types for the NextDNS API.
//
// Response shapes vary between endpoints (bare arrays vs. `{data: ...}`
// wrappers); the private shape types at the bottom absorb that at the
// boundary so callers only ever see plain values.

use std::fmt;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use nextlog_config::Profile;

// ── Logs ────────────────────────────────────────────────────────────

/// What the resolver did with a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogAction {
    Allowed,
    Blocked,
    Rewrite,
    /// Any value this client does not know about, kept as sent.
    Other(String),
}

impl LogAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Allowed => "allowed",
            Self::Blocked => "blocked",
            Self::Rewrite => "rewrite",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for LogAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "allowed" => Self::Allowed,
            "blocked" => Self::Blocked,
            "rewrite" => Self::Rewrite,
            _ => Self::Other(raw),
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// One DNS query log line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogEntry {
    #[serde(default)]
    pub id: String,
    /// ISO-8601 timestamp, kept as sent by the service.
    pub time: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<LogAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

/// A page of logs from `GET /profiles/{id}/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogPage {
    /// Opaque id to poll the live stream from this point on.
    #[serde(rename = "id", default)]
    pub stream_id: String,
    #[serde(default)]
    pub data: Vec<LogEntry>,
    /// Continuation cursor for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Entries returned by one stream poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamBatch {
    #[serde(default)]
    pub data: Vec<LogEntry>,
}

/// Temporary link to the full log export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DownloadLink {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters for [`fetch_logs`](crate::NextDnsClient::fetch_logs).
///
/// Only fields that are set (and non-empty) end up in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub sort: Option<SortOrder>,
    pub cursor: Option<String>,
    /// Overrides the stored timezone.
    pub time_zone: Option<String>,
    /// Overrides the current profile.
    pub profile: Option<String>,
}

impl LogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Query parameters, with `time_zone` as the already-resolved zone.
    pub(crate) fn params(&self, time_zone: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_text(&mut params, "from", self.from.as_deref());
        push_text(&mut params, "to", self.to.as_deref());
        push_text(&mut params, "q", self.search.as_deref());
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_owned()));
        }
        push_text(&mut params, "cursor", self.cursor.as_deref());
        push_text(&mut params, "timezone", time_zone);
        params
    }
}

/// Filters for [`stream_logs`](crate::NextDnsClient::stream_logs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamQuery {
    pub search: Option<String>,
    pub time_zone: Option<String>,
    pub profile: Option<String>,
}

impl StreamQuery {
    pub(crate) fn params(&self, stream_id: &str, time_zone: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![("id", stream_id.to_owned())];
        push_text(&mut params, "q", self.search.as_deref());
        push_text(&mut params, "timezone", time_zone);
        params
    }
}

fn push_text(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key, value.to_owned()));
    }
}

// ── Lists & rewrites ────────────────────────────────────────────────

/// The two domain sets a profile carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainListKind {
    Allow,
    Deny,
}

impl DomainListKind {
    /// Resource name under `/profiles/{id}/`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Allow => "allowlist",
            Self::Deny => "denylist",
        }
    }
}

impl fmt::Display for DomainListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Domain answered with a fixed value instead of normal resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RewriteRule {
    pub id: String,
    pub domain: String,
    pub answer: String,
}

#[derive(Serialize)]
pub(crate) struct NewRewrite<'a> {
    pub domain: &'a str,
    pub answer: &'a str,
}

#[derive(Serialize)]
pub(crate) struct DomainsBody<'a> {
    pub domains: &'a [String],
}

// ── Response shapes ─────────────────────────────────────────────────

/// A collection that may arrive bare, wrapped in `data`, or as something
/// else entirely (which reads as empty).
///
/// Once the body is an array, or carries a `data` array, every element must
/// decode. A single bad element fails the whole read rather than turning the
/// list into `[]`, which a read-modify-write caller would then store.
pub(crate) struct ListShape<T>(Vec<T>);

impl<T> ListShape<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListShape<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => Value::Array(items),
            Value::Object(mut fields) => match fields.remove("data") {
                Some(data @ Value::Array(_)) => data,
                _ => return Ok(Self(Vec::new())),
            },
            _ => return Ok(Self(Vec::new())),
        };
        serde_json::from_value(items).map(Self).map_err(de::Error::custom)
    }
}

/// A single object, bare or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ObjectShape<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ObjectShape<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Profile metadata as returned by `GET /profiles/{id}`, which may leave
/// out the id already present in the path.
#[derive(Deserialize)]
pub(crate) struct ProfileRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl ProfileRecord {
    pub(crate) fn into_profile(self, requested: &str) -> Profile {
        Profile {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| requested.to_owned()),
            name: self.name,
        }
    }
}

/// Domain list element: a plain string or a record naming the domain.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum DomainItem {
    Name(String),
    Record {
        #[serde(alias = "domain")]
        id: String,
    },
}

impl DomainItem {
    pub(crate) fn into_domain(self) -> String {
        match self {
            Self::Name(domain) | Self::Record { id: domain } => domain,
        }
    }
}
