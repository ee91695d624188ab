//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod config_cmd;
pub mod lists;
pub mod logs;
pub mod profiles;
pub mod rewrites;
pub mod settings;
pub mod stats;
pub mod summarize;
pub mod tail;
pub mod util;

use std::sync::Arc;

use nextlog_api::DomainListKind;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
///
/// Configuration-writing commands open the store without flag overrides;
/// everything else runs against a session store with them applied.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Profiles(args) => profiles::handle(args, global).await,
        cmd => {
            let store = config::open_session(global)?;
            let client = config::api_client(Arc::clone(&store), global)?;
            match cmd {
                Command::Logs(args) => logs::handle_logs(&client, args, global).await,
                Command::Tail(args) => tail::handle(&client, args, global).await,
                Command::Download(args) => logs::handle_download(&client, &args, global).await,
                Command::Purge => logs::handle_purge(&client, global).await,
                Command::Stats(args) => stats::handle(&client, args, global).await,
                Command::Summarize(args) => summarize::handle(&client, store, args, global).await,
                Command::Allowlist(args) => lists::handle(&client, DomainListKind::Allow, args, global).await,
                Command::Denylist(args) => lists::handle(&client, DomainListKind::Deny, args, global).await,
                Command::Rewrites(args) => rewrites::handle(&client, args, global).await,
                Command::Settings(args) => settings::handle(&client, args, global).await,
                // Handled above or before dispatch
                Command::Config(_) | Command::Profiles(_) | Command::Completions(_) => unreachable!(),
            }
        }
    }
}
