//! Log page, export link and purge handlers.

use nextlog_api::{LogEntry, NextDnsClient, SortOrder};
use tabled::Tabled;

use crate::cli::{DownloadArgs, GlobalOpts, LogsArgs, SortArg};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
}

impl From<&LogEntry> for LogRow {
    fn from(e: &LogEntry) -> Self {
        Self {
            time: output::local_time(&e.time),
            action: output::paint_action(e.action.as_ref(), false),
            domain: e.domain.clone(),
            client: e.client.clone().unwrap_or_default(),
            protocol: e.protocol.clone().unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_logs(client: &NextDnsClient, args: LogsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let sort = match args.sort {
        SortArg::Asc => SortOrder::Asc,
        SortArg::Desc => SortOrder::Desc,
    };
    let mut query = util::log_query(args.filter).sort(sort);
    query.cursor = args.cursor;

    let page = client.fetch_logs(&query).await?;
    let out = output::render_list(global.output, &page.data, |e| LogRow::from(e), |e| e.domain.clone())?;
    output::print_output(&out, global.quiet);

    if let Some(cursor) = page.cursor.filter(|c| !c.is_empty()) {
        output::status(&format!("More entries available: --cursor {cursor}"), global.quiet);
    }
    Ok(())
}

pub async fn handle_download(
    client: &NextDnsClient,
    args: &DownloadArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let link = client
        .get_download_url(args.redirect)
        .await?
        .ok_or_else(|| CliError::InvalidResponse {
            message: "the service returned no download link".into(),
        })?;
    let out = output::render_single(global.output, &link, |l| l.url.clone(), |l| l.url.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle_purge(client: &NextDnsClient, global: &GlobalOpts) -> Result<(), CliError> {
    let profile = util::current_profile(client);
    if !util::confirm(
        &format!("Delete all logs of profile '{profile}'? This cannot be undone."),
        "purge",
        global.yes,
    )? {
        return Ok(());
    }
    client.delete_logs().await?;
    output::status(&format!("Logs of profile '{profile}' deleted"), global.quiet);
    Ok(())
}
