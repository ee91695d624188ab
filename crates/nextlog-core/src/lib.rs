//! Client-side behavior built on top of `nextlog-api`.
//!
//! - [`tail`]: live log polling with cooperative cancellation, plus the
//!   bounded [`LogFeed`] buffer that merges polled batches.
//! - [`lists`]: add/remove a single domain on a whole-set allowlist or
//!   denylist.
//! - [`stats`]: per-domain, per-client and per-action tallies of a page.
//! - [`summary`]: the prompt sent to the summary model.

pub mod lists;
pub mod stats;
pub mod summary;
pub mod tail;

pub use lists::{add_domain, remove_domain, with_domain, without_domain};
pub use stats::{Counter, LogStats, Tally};
pub use summary::{SUMMARY_LINE_LIMIT, summary_prompt};
pub use tail::{DEFAULT_FEED_CAPACITY, DEFAULT_POLL_INTERVAL, LogFeed, TailEvent, follow, start};
