//! Allowlist / denylist handlers.

use nextlog_api::{DomainListKind, NextDnsClient};
use nextlog_core::with_domain;
use tabled::Tabled;

use crate::cli::{DomainListArgs, DomainListCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "Domain")]
    domain: String,
}

pub async fn handle(
    client: &NextDnsClient,
    kind: DomainListKind,
    args: DomainListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DomainListCommand::List => {
            let domains = client.get_domain_list(kind, None).await?;
            let out = output::render_list(
                global.output,
                &domains,
                |d| DomainRow { domain: d.clone() },
                Clone::clone,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DomainListCommand::Add { domain } => {
            if domain.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "domain".into(),
                    reason: "must not be empty".into(),
                });
            }
            let next = nextlog_core::add_domain(client, kind, &domain).await?;
            output::status(
                &format!("Added '{}' to the {kind} ({} domains)", domain.trim(), next.len()),
                global.quiet,
            );
            Ok(())
        }

        DomainListCommand::Remove { domain } => {
            let next = nextlog_core::remove_domain(client, kind, &domain).await?;
            output::status(
                &format!("Removed '{}' from the {kind} ({} domains)", domain.trim(), next.len()),
                global.quiet,
            );
            Ok(())
        }

        DomainListCommand::Set { domains } => {
            let next = domains.iter().fold(Vec::new(), |acc, d| with_domain(&acc, d));
            if next.is_empty()
                && !util::confirm(
                    &format!("Remove every domain from the {kind} of profile '{}'?", util::current_profile(client)),
                    &format!("{kind} set"),
                    global.yes,
                )?
            {
                return Ok(());
            }
            client.set_domain_list(kind, &next).await?;
            output::status(&format!("The {kind} now has {} domains", next.len()), global.quiet);
            Ok(())
        }
    }
}
