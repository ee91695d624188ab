//! Profile settings handler.

use nextlog_api::NextDnsClient;
use nextlog_api::profiles::settings_segment;

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(client: &NextDnsClient, args: SettingsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SettingsCommand::Patch {
            segment,
            data,
            from_file,
        } => {
            let body = match (data, from_file) {
                (Some(raw), _) => util::parse_json(&raw, "data")?,
                (None, Some(path)) => util::read_json_file(&path)?,
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "data".into(),
                        reason: "pass a JSON body with --data or --from-file".into(),
                    });
                }
            };
            if !body.is_object() {
                return Err(CliError::Validation {
                    field: "data".into(),
                    reason: "the body must be a JSON object".into(),
                });
            }

            client.patch_settings(&segment, &body).await?;
            output::status(&format!("Updated {}", settings_segment(&segment)), global.quiet);
            Ok(())
        }
    }
}
