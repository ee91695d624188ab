// Tallies over a page of log entries.

use std::collections::HashMap;

use nextlog_api::LogEntry;

/// One row of a ranking: a label and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub label: String,
    pub count: usize,
}

impl Tally {
    /// Share of `max` as a bar fill in `0.0..=1.0`; zero when `max` is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction_of(&self, max: usize) -> f64 {
        if max == 0 {
            return 0.0;
        }
        (self.count as f64 / max as f64).min(1.0)
    }
}

/// Occurrence counter keyed by label.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    counts: HashMap<String, usize>,
}

impl Counter {
    pub fn add(&mut self, label: &str) {
        *self.counts.entry(label.to_owned()).or_default() += 1;
    }

    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent labels, by count descending then label
    /// ascending.
    pub fn top(&self, n: usize) -> Vec<Tally> {
        let mut rows: Vec<Tally> = self
            .counts
            .iter()
            .map(|(label, count)| Tally {
                label: label.clone(),
                count: *count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        rows.truncate(n);
        rows
    }
}

/// Per-domain, per-client and per-action counts of a set of entries.
///
/// Entries without a client or action still count towards `total` and
/// `domains`.
#[derive(Debug, Clone, Default)]
pub struct LogStats {
    pub total: usize,
    pub domains: Counter,
    pub clients: Counter,
    pub actions: Counter,
}

impl LogStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            stats.record(entry);
        }
        stats
    }

    pub fn record(&mut self, entry: &LogEntry) {
        self.total += 1;
        self.domains.add(&entry.domain);
        if let Some(client) = entry.client.as_deref().filter(|c| !c.is_empty()) {
            self.clients.add(client);
        }
        if let Some(action) = &entry.action {
            self.actions.add(action.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use nextlog_api::LogAction;
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(domain: &str, client: Option<&str>, action: Option<LogAction>) -> LogEntry {
        LogEntry {
            id: String::new(),
            time: "2024-01-01T00:00:00Z".to_owned(),
            domain: domain.to_owned(),
            client: client.map(str::to_owned),
            protocol: None,
            action,
            resolved: None,
        }
    }

    #[test]
    fn top_orders_by_count_then_label() {
        let mut counter = Counter::default();
        for label in ["b", "a", "c", "c", "b", "d"] {
            counter.add(label);
        }
        let labels: Vec<(String, usize)> = counter.top(3).into_iter().map(|t| (t.label, t.count)).collect();
        assert_eq!(
            labels,
            vec![("b".to_owned(), 2), ("c".to_owned(), 2), ("a".to_owned(), 1)]
        );
        assert_eq!(counter.top(10).len(), 4);
        assert!(counter.top(0).is_empty());
    }

    #[test]
    fn stats_count_each_dimension() {
        let entries = vec![
            entry("ads.net", Some("laptop"), Some(LogAction::Blocked)),
            entry("ads.net", Some("phone"), Some(LogAction::Blocked)),
            entry("example.com", None, Some(LogAction::Allowed)),
            entry("example.com", Some(""), None),
        ];
        let stats = LogStats::from_entries(&entries);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.domains.count("ads.net"), 2);
        assert_eq!(stats.clients.len(), 2);
        assert_eq!(stats.actions.count("blocked"), 2);
        assert_eq!(stats.actions.count("allowed"), 1);
    }

    #[test]
    fn fraction_is_clamped() {
        let tally = Tally {
            label: "x".into(),
            count: 5,
        };
        assert!((tally.fraction_of(10) - 0.5).abs() < f64::EPSILON);
        assert!((tally.fraction_of(2) - 1.0).abs() < f64::EPSILON);
        assert!(tally.fraction_of(0).abs() < f64::EPSILON);
    }
}
