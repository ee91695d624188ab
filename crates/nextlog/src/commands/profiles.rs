//! Profile command handlers.

use std::sync::Arc;

use nextlog_api::Profile;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, ProfilesArgs, ProfilesCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct ProfileRow {
    #[tabled(rename = "")]
    #[serde(skip)]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn detail(p: &Profile, current: Option<&str>) -> String {
    let selected = if current == Some(p.id.as_str()) { " (selected)" } else { "" };
    format!("ID:   {}{selected}\nName: {}", p.id, p.name.as_deref().unwrap_or("-"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ProfilesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    // Reads run with flag overrides; selection changes go to the plain
    // store so overrides never get persisted.
    let session = config::open_session(global)?;
    let client = config::api_client(Arc::clone(&session), global)?;
    let current = session.snapshot().resolve_profile(None).map(str::to_owned);

    match args.command {
        ProfilesCommand::List => {
            let profiles = client.list_profiles().await?;
            let out = output::render_list(
                global.output,
                &profiles,
                |p| ProfileRow {
                    marker: if current.as_deref() == Some(p.id.as_str()) { "*" } else { "" },
                    id: p.id.clone(),
                    name: p.name.clone().unwrap_or_default(),
                },
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProfilesCommand::Show { id } => {
            let target = id.as_deref().or(current.as_deref()).unwrap_or_default().to_owned();
            let profile = client
                .get_profile(id.as_deref())
                .await
                .map_err(|e| CliError::lookup(e, "profile", &target, "profiles list"))?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "profile".into(),
                    identifier: target.clone(),
                    list_command: "profiles list".into(),
                })?;
            let out = output::render_single(
                global.output,
                &profile,
                |p| detail(p, current.as_deref()),
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProfilesCommand::Import => {
            let profiles = client.list_profiles().await?;
            if profiles.is_empty() {
                output::status("The API key has no profiles", global.quiet);
                return Ok(());
            }
            let count = profiles.len();
            let store = config::open_store(global)?;
            let saved = store.import_profiles(profiles);
            output::status(
                &format!(
                    "Imported {count} profile(s); selected '{}'",
                    saved.current_profile_id
                ),
                global.quiet,
            );
            Ok(())
        }

        ProfilesCommand::Use { id } => {
            let store = config::open_store(global)?;
            let known = store.snapshot();
            if !known.profiles.is_empty() && known.profile(&id).is_none() {
                return Err(CliError::NotFound {
                    resource_type: "profile".into(),
                    identifier: id,
                    list_command: "profiles list".into(),
                });
            }
            store.update(&nextlog_config::ConfigPatch {
                current_profile_id: Some(id.clone()),
                ..nextlog_config::ConfigPatch::default()
            });
            output::status(&format!("Using profile '{id}'"), global.quiet);
            Ok(())
        }
    }
}
