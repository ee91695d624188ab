//! AI log summary handler.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use nextlog_api::NextDnsClient;
use nextlog_config::ConfigStore;
use serde::Serialize;

use crate::cli::{GlobalOpts, SummarizeArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct Summary {
    entries: usize,
    summary: String,
}

fn spinner(quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Summarizing logs...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

pub async fn handle(
    client: &NextDnsClient,
    store: Arc<ConfigStore>,
    args: SummarizeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let summarizer = config::summary_client(store, global)?;
    let page = client.fetch_logs(&util::log_query(args.filter)).await?;
    if page.data.is_empty() {
        output::status("No logs to summarize", global.quiet);
        return Ok(());
    }

    let prompt = nextlog_core::summary_prompt(&page.data);
    let progress = spinner(global.quiet);
    let result = summarizer.summarize(&prompt).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let summary = Summary {
        entries: page.data.len().min(nextlog_core::SUMMARY_LINE_LIMIT),
        summary: result?,
    };
    let out = output::render_single(global.output, &summary, |s| s.summary.clone(), |s| s.summary.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
