//! Query statistics handler.

use nextlog_api::NextDnsClient;
use nextlog_core::{Counter, LogStats};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, StatsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

const BAR_WIDTH: usize = 20;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct StatRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "")]
    #[serde(skip)]
    bar: String,
}

fn rows(category: &'static str, counter: &Counter, top: usize) -> Vec<StatRow> {
    let tallies = counter.top(top);
    let max = tallies.first().map_or(0, |t| t.count);
    tallies
        .into_iter()
        .map(|t| StatRow {
            category,
            bar: output::bar(t.fraction_of(max), BAR_WIDTH),
            label: t.label,
            count: t.count,
        })
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &NextDnsClient, args: StatsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let page = client.fetch_logs(&util::log_query(args.filter)).await?;
    let stats = LogStats::from_entries(&page.data);

    let mut all = rows("action", &stats.actions, args.top);
    all.extend(rows("domain", &stats.domains, args.top));
    all.extend(rows("client", &stats.clients, args.top));

    let out = output::render_list(
        global.output,
        &all,
        StatRow::clone,
        |r| format!("{}\t{}\t{}", r.category, r.label, r.count),
    )?;
    output::print_output(&out, global.quiet);
    output::status(&format!("{} queries analyzed", stats.total), global.quiet);
    Ok(())
}
