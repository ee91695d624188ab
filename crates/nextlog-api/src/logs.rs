// Log endpoints
//
// Page fetch, live-stream poll, export link and purge. All are scoped to
// the resolved profile.

use tracing::debug;

use crate::client::NextDnsClient;
use crate::error::Error;
use crate::models::{DownloadLink, LogPage, LogQuery, StreamBatch, StreamQuery};

impl NextDnsClient {
    /// Fetch one page of logs.
    ///
    /// `GET /profiles/{id}/logs`. The timezone falls back to the stored one
    /// when the query does not set it.
    pub async fn fetch_logs(&self, query: &LogQuery) -> Result<LogPage, Error> {
        let (auth, profile) = self.scope(query.profile.as_deref())?;
        let params = query.params(auth.config.effective_time_zone(query.time_zone.as_deref()));
        let url = self.profile_url(&profile, &["logs"])?;
        let page: Option<LogPage> = self.get(&auth, url, &params).await?;
        let page = page.unwrap_or_default();
        debug!(profile = %profile, entries = page.data.len(), "fetched logs");
        Ok(page)
    }

    /// Poll the live stream once.
    ///
    /// `GET /profiles/{id}/logs/stream?id={stream_id}`. Entries already seen
    /// in earlier polls are not filtered out; merging is up to the caller.
    pub async fn stream_logs(&self, stream_id: &str, query: &StreamQuery) -> Result<StreamBatch, Error> {
        let (auth, profile) = self.scope(query.profile.as_deref())?;
        let params = query.params(
            stream_id,
            auth.config.effective_time_zone(query.time_zone.as_deref()),
        );
        let url = self.profile_url(&profile, &["logs", "stream"])?;
        let batch: Option<StreamBatch> = self.get(&auth, url, &params).await?;
        Ok(batch.unwrap_or_default())
    }

    /// Request a temporary URL to the full log export.
    ///
    /// `GET /profiles/{id}/logs/download?redirect=0|1`
    pub async fn get_download_url(&self, redirect: bool) -> Result<Option<DownloadLink>, Error> {
        let (auth, profile) = self.scope(None)?;
        let mut params = vec![("redirect", if redirect { "1" } else { "0" }.to_owned())];
        if let Some(tz) = auth.config.effective_time_zone(None) {
            params.push(("timezone", tz.to_owned()));
        }
        let url = self.profile_url(&profile, &["logs", "download"])?;
        self.get(&auth, url, &params).await
    }

    /// Irreversibly delete every log of the resolved profile.
    ///
    /// `DELETE /profiles/{id}/logs`
    pub async fn delete_logs(&self) -> Result<(), Error> {
        let (auth, profile) = self.scope(None)?;
        let url = self.profile_url(&profile, &["logs"])?;
        debug!(profile = %profile, "deleting logs");
        self.delete(&auth, url).await
    }
}
