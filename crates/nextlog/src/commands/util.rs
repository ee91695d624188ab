//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use nextlog_api::{LogQuery, NextDnsClient};

use crate::cli::LogFilterArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the operation is refused rather than
/// silently declined.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse a JSON document given inline.
pub fn parse_json(raw: &str, field: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    parse_json(&contents, "from-file")
}

/// Page query for the shared log filter flags.
pub fn log_query(filter: LogFilterArgs) -> LogQuery {
    let mut query = LogQuery::new().range(filter.from, filter.to).limit(filter.limit);
    query.search = filter.search;
    query
}

/// Profile the client will target, for messages.
pub fn current_profile(client: &NextDnsClient) -> String {
    client
        .config()
        .snapshot()
        .resolve_profile(None)
        .unwrap_or("(none)")
        .to_owned()
}
