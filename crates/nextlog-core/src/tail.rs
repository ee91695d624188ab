// ── Live log tail ──
//
// `start` opens a stream with a one-entry page fetch, `follow` polls it on a
// fixed cadence until cancelled, and `LogFeed` merges the polled batches
// into a bounded newest-first view.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use futures_core::Stream;
use nextlog_api::{Error, LogEntry, LogPage, LogQuery, NextDnsClient, SortOrder, StreamQuery};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Pause between two stream polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Entries kept by a [`LogFeed`] unless told otherwise.
pub const DEFAULT_FEED_CAPACITY: usize = 200;

/// One outcome of a stream poll.
#[derive(Debug)]
pub enum TailEvent {
    /// Entries returned by a successful poll, never empty.
    Batch(Vec<LogEntry>),
    /// A failed poll. Polling carries on at the next tick.
    Error(Error),
}

/// Fetch the newest entry to obtain a stream id.
///
/// The returned page carries the stream id and at most one seed entry.
pub async fn start(client: &NextDnsClient, query: &StreamQuery) -> Result<LogPage, Error> {
    let page_query = LogQuery {
        search: query.search.clone(),
        time_zone: query.time_zone.clone(),
        profile: query.profile.clone(),
        ..LogQuery::new().limit(1).sort(SortOrder::Desc)
    };
    let page = client.fetch_logs(&page_query).await?;
    debug!(stream_id = %page.stream_id, "log stream opened");
    Ok(page)
}

/// Poll `stream_id` until `cancel` fires.
///
/// Each poll is awaited before the `interval` pause starts, so polls never
/// overlap. Cancelling aborts a poll still in flight: its request future is
/// dropped and nothing from it is yielded. A poll that completes in the same
/// instant is discarded as well.
pub fn follow<'a>(
    client: &'a NextDnsClient,
    stream_id: String,
    query: StreamQuery,
    interval: Duration,
    cancel: CancellationToken,
) -> impl Stream<Item = TailEvent> + Send + 'a {
    async_stream::stream! {
        loop {
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                result = client.stream_logs(&stream_id, &query) => result,
            };
            if cancel.is_cancelled() {
                break;
            }

            match result {
                Ok(batch) if batch.data.is_empty() => {}
                Ok(batch) => {
                    yield TailEvent::Batch(batch.data);
                }
                Err(e) => {
                    warn!(error = %e, "log stream poll failed");
                    yield TailEvent::Error(e);
                }
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }
        debug!(stream_id = %stream_id, "log tail stopped");
    }
}

// ── Feed buffer ─────────────────────────────────────────────────────

/// Newest-first buffer of tailed entries.
///
/// Polls may return entries already seen; those are dropped by id. Entries
/// without an id are always kept.
#[derive(Debug, Clone)]
pub struct LogFeed {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for LogFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFeed {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FEED_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend `batch` (itself newest-first), skipping known ids, and drop
    /// the oldest entries beyond capacity. Returns the fresh entries.
    pub fn push_batch(&mut self, batch: Vec<LogEntry>) -> Vec<LogEntry> {
        let mut seen: HashSet<String> = self
            .entries
            .iter()
            .filter(|e| !e.id.is_empty())
            .map(|e| e.id.clone())
            .collect();
        let fresh: Vec<LogEntry> = batch
            .into_iter()
            .filter(|e| e.id.is_empty() || seen.insert(e.id.clone()))
            .collect();

        for entry in fresh.iter().rev() {
            self.entries.push_front(entry.clone());
        }
        self.entries.truncate(self.capacity);
        fresh
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
