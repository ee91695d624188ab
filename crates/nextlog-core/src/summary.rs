// Prompt sent to the summary model for a page of logs.

use nextlog_api::{LogAction, LogEntry};

/// Log lines included in a prompt; later entries are left out.
pub const SUMMARY_LINE_LIMIT: usize = 50;

const HEADING: &str = "Summarize the following NextDNS logs. Identify blocked domains, \
                       frequent clients, and any security concerns:";

/// Heading followed by one `time | action | domain | client` line per entry.
pub fn summary_prompt(entries: &[LogEntry]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .take(SUMMARY_LINE_LIMIT)
        .map(|e| {
            let action = e.action.as_ref().map(LogAction::as_str).unwrap_or_default();
            let client = e.client.as_deref().unwrap_or_default();
            format!("{} | {action} | {} | {client}", e.time, e.domain)
        })
        .collect();
    format!("{HEADING}\n\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(n: usize) -> LogEntry {
        LogEntry {
            id: n.to_string(),
            time: format!("t{n}"),
            domain: format!("d{n}.com"),
            client: (n % 2 == 0).then(|| "laptop".to_owned()),
            protocol: None,
            action: (n % 2 == 0).then_some(LogAction::Blocked),
            resolved: None,
        }
    }

    #[test]
    fn formats_each_line() {
        let prompt = summary_prompt(&[entry(0), entry(1)]);
        assert_eq!(
            prompt,
            "Summarize the following NextDNS logs. Identify blocked domains, frequent clients, \
             and any security concerns:\n\nt0 | blocked | d0.com | laptop\nt1 |  | d1.com | "
        );
    }

    #[test]
    fn unknown_actions_are_sent_as_received() {
        let mut e = entry(1);
        e.action = Some(LogAction::Other("default".into()));
        assert!(summary_prompt(&[e]).ends_with("t1 | default | d1.com | "));
    }

    #[test]
    fn keeps_only_the_first_fifty_entries() {
        let entries: Vec<LogEntry> = (0..80).map(entry).collect();
        let prompt = summary_prompt(&entries);
        assert_eq!(prompt.lines().skip(2).count(), SUMMARY_LINE_LIMIT);
        assert!(prompt.contains("| d49.com |"));
        assert!(!prompt.contains("| d50.com |"));
    }
}
