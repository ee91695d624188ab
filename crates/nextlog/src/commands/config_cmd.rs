//! Config subcommand handlers.

use std::fmt::Write as _;

use nextlog_config::{ApiConfig, ConfigPatch, Profile, StorageKind};
use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, ConfigSetArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Redacted view ───────────────────────────────────────────────────

#[derive(Serialize)]
struct ConfigView {
    storage: String,
    api_key: String,
    current_profile: String,
    profiles: Vec<Profile>,
    time_zone: String,
    gemini_key: String,
    gemini_model: String,
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "****".to_owned()
    }
}

impl ConfigView {
    fn new(cfg: &ApiConfig, storage: StorageKind) -> Self {
        Self {
            storage: storage.to_string(),
            api_key: mask(&cfg.api_key),
            current_profile: cfg.resolve_profile(None).unwrap_or_default().to_owned(),
            profiles: cfg.profiles.clone(),
            time_zone: cfg.time_zone.clone(),
            gemini_key: mask(&cfg.ai_api_key),
            gemini_model: cfg.ai_model.clone(),
        }
    }
}

/// Format config for display, masking sensitive fields.
fn format_config_redacted(view: &ConfigView) -> String {
    let mut out = String::new();
    let or_unset = |v: &str| if v.is_empty() { "(not set)".to_owned() } else { v.to_owned() };

    let _ = writeln!(out, "storage         = {}", view.storage);
    let _ = writeln!(out, "api_key         = {}", or_unset(&view.api_key));
    let _ = writeln!(out, "current_profile = {}", or_unset(&view.current_profile));
    let _ = writeln!(out, "time_zone       = {}", or_unset(&view.time_zone));
    let _ = writeln!(out, "gemini_key      = {}", or_unset(&view.gemini_key));
    let _ = writeln!(out, "gemini_model    = {}", or_unset(&view.gemini_model));
    if !view.profiles.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles]");
        for p in &view.profiles {
            let _ = writeln!(out, "{} = {}", p.id, p.display_name());
        }
    }
    out.trim_end().to_owned()
}

fn patch_from(args: ConfigSetArgs) -> Result<ConfigPatch, CliError> {
    let api_key = if args.ask_key {
        let key = rpassword::prompt_password("NextDNS API key: ")?;
        Some(key.trim().to_owned())
    } else {
        args.nextdns_key
    };
    if api_key.as_deref().is_some_and(str::is_empty) {
        return Err(CliError::Validation {
            field: "api key".into(),
            reason: "must not be empty".into(),
        });
    }

    Ok(ConfigPatch {
        api_key,
        current_profile_id: args.profile_id,
        time_zone: args.time_zone,
        ai_api_key: args.gemini_key,
        ai_model: args.gemini_model,
        ..ConfigPatch::default()
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let store = config::open_store(global)?;
            let view = ConfigView::new(&store.snapshot(), global.storage);
            let out = output::render_single(global.output, &view, format_config_redacted, |v| {
                v.current_profile.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set(set) => {
            let patch = patch_from(set)?;
            if patch.is_empty() {
                return Err(CliError::Validation {
                    field: "config set".into(),
                    reason: "nothing to change".into(),
                });
            }
            let store = config::open_store(global)?;
            store.update(&patch);
            if global.storage == StorageKind::Memory {
                output::status("Saved for this run only (memory storage)", global.quiet);
            } else {
                output::status(&format!("Configuration saved to {}", config::storage_location(global.storage)?), global.quiet);
            }
            Ok(())
        }

        ConfigCommand::Reset => {
            if !util::confirm("Forget every stored credential and preference?", "config reset", global.yes)? {
                return Ok(());
            }
            let store = config::open_store(global)?;
            store.reset();
            output::status("Configuration reset", global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::storage_location(global.storage)?, global.quiet);
            Ok(())
        }
    }
}
