//! Live log tail handler.

use std::io::{self, Write};
use std::time::Duration;

use futures_util::{StreamExt, pin_mut};
use nextlog_api::{LogEntry, NextDnsClient, StreamQuery};
use nextlog_core::{LogFeed, TailEvent};
use tokio_util::sync::CancellationToken;

use crate::cli::{GlobalOpts, OutputFormat, TailArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(client: &NextDnsClient, args: TailArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let query = StreamQuery {
        search: args.search,
        ..StreamQuery::default()
    };
    let page = nextlog_core::start(client, &query).await?;

    let color = output::should_color(global.color);
    let mut printer = Printer {
        format: global.output,
        color,
        quiet: global.quiet,
        remaining: args.count,
    };
    let mut feed = LogFeed::new();

    printer.print(&feed.push_batch(page.data))?;
    if printer.done() {
        return Ok(());
    }
    output::status("Following logs, press Ctrl-C to stop", global.quiet);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let events = nextlog_core::follow(
        client,
        page.stream_id,
        query,
        Duration::from_millis(args.interval),
        cancel.clone(),
    );
    pin_mut!(events);

    while let Some(event) = events.next().await {
        match event {
            TailEvent::Batch(batch) => {
                printer.print(&feed.push_batch(batch))?;
                if printer.done() {
                    cancel.cancel();
                }
            }
            TailEvent::Error(e) if e.is_configuration() || e.is_unauthorized() => {
                cancel.cancel();
                return Err(e.into());
            }
            TailEvent::Error(e) => {
                output::status(&format!("poll failed, retrying: {e}"), global.quiet);
            }
        }
    }
    Ok(())
}

// ── Line printer ────────────────────────────────────────────────────

struct Printer {
    format: OutputFormat,
    color: bool,
    quiet: bool,
    remaining: Option<usize>,
}

impl Printer {
    /// Print `fresh` (newest first) oldest first, so the newest line ends
    /// up at the bottom.
    fn print(&mut self, fresh: &[LogEntry]) -> Result<(), CliError> {
        let take = self.remaining.map_or(fresh.len(), |r| r.min(fresh.len()));
        let mut stdout = io::stdout().lock();
        for entry in fresh.iter().take(take).rev() {
            if !self.quiet {
                writeln!(stdout, "{}", self.line(entry)?)?;
            }
        }
        stdout.flush()?;
        if let Some(ref mut r) = self.remaining {
            *r -= take;
        }
        Ok(())
    }

    fn done(&self) -> bool {
        self.remaining == Some(0)
    }

    fn line(&self, e: &LogEntry) -> Result<String, CliError> {
        Ok(match self.format {
            OutputFormat::Json | OutputFormat::JsonCompact => output::render_json(e, true)?,
            OutputFormat::Yaml => format!("---\n{}", output::render_yaml(e)?.trim_end()),
            OutputFormat::Plain => e.domain.clone(),
            OutputFormat::Table => format!(
                "{}  {:<8}  {}  {}",
                output::local_time(&e.time),
                output::paint_action(e.action.as_ref(), self.color),
                e.domain,
                e.client.as_deref().unwrap_or_default(),
            ),
        })
    }
}
