//! Rewrite rule handlers.

use nextlog_api::{NextDnsClient, RewriteRule};
use tabled::Tabled;

use crate::cli::{GlobalOpts, RewritesArgs, RewritesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct RewriteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Answer")]
    answer: String,
}

impl From<&RewriteRule> for RewriteRow {
    fn from(r: &RewriteRule) -> Self {
        Self {
            id: r.id.clone(),
            domain: r.domain.clone(),
            answer: r.answer.clone(),
        }
    }
}

pub async fn handle(client: &NextDnsClient, args: RewritesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RewritesCommand::List => {
            let rules = client.get_rewrites(None).await?;
            let out = output::render_list(global.output, &rules, |r| RewriteRow::from(r), |r| r.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RewritesCommand::Add { domain, answer } => {
            match client.add_rewrite(&domain, &answer).await? {
                Some(rule) => {
                    let out = output::render_single(
                        global.output,
                        &rule,
                        |r| format!("Created rewrite {}: {} -> {}", r.id, r.domain, r.answer),
                        |r| r.id.clone(),
                    )?;
                    output::print_output(&out, global.quiet);
                }
                None => output::status(&format!("Rewrite {domain} -> {answer} created"), global.quiet),
            }
            Ok(())
        }

        RewritesCommand::Remove { id } => {
            if !util::confirm(&format!("Delete rewrite '{id}'?"), "rewrites remove", global.yes)? {
                return Ok(());
            }
            client
                .remove_rewrite(&id)
                .await
                .map_err(|e| CliError::lookup(e, "rewrite", &id, "rewrites list"))?;
            output::status(&format!("Rewrite '{id}' deleted"), global.quiet);
            Ok(())
        }
    }
}
