// nextlog-api: async client for the NextDNS REST API and the Gemini summary endpoint.

pub mod client;
pub mod error;
pub mod lists;
pub mod logs;
pub mod models;
pub mod profiles;
pub mod rewrites;
pub mod summary;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, NextDnsClient};
pub use error::Error;
pub use models::{
    DomainListKind, DownloadLink, LogAction, LogEntry, LogPage, LogQuery, RewriteRule,
    SortOrder, StreamBatch, StreamQuery,
};
pub use summary::{DEFAULT_SUMMARY_BASE_URL, SummaryClient};
pub use transport::TransportConfig;

pub use nextlog_config::Profile;
