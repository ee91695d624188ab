//! Clap derive structures for the `nextlog` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nextlog_config::StorageKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nextlog -- browse and manage NextDNS query logs from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "nextlog",
    version,
    about = "Browse NextDNS query logs and manage profile lists",
    long_about = "Browse, tail, summarize and purge NextDNS query logs, and edit\n\
        allowlists, denylists, rewrites and settings of your profiles.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile id to target (overrides the selected profile)
    #[arg(long, short = 'p', env = "NEXTDNS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// NextDNS API key (overrides the stored key for this run)
    #[arg(long, env = "NEXTDNS_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Where configuration is persisted
    #[arg(
        long,
        env = "NEXTLOG_STORAGE",
        default_value = "file",
        value_parser = parse_storage,
        global = true
    )]
    pub storage: StorageKind,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NEXTLOG_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// IANA timezone for log timestamps (overrides the stored one)
    #[arg(long, env = "NEXTLOG_TIMEZONE", global = true)]
    pub timezone: Option<String>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Alternate NextDNS API root
    #[arg(long, env = "NEXTLOG_API_URL", global = true, hide = true)]
    pub api_url: Option<String>,
}

fn parse_storage(raw: &str) -> Result<StorageKind, String> {
    raw.parse()
        .map_err(|_| format!("expected 'file', 'keyring' or 'memory', got '{raw}'"))
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a page of query logs
    #[command(alias = "l")]
    Logs(LogsArgs),

    /// Follow new query logs as they arrive
    #[command(alias = "t")]
    Tail(TailArgs),

    /// Print a temporary link to the full log export
    Download(DownloadArgs),

    /// Delete every log of the profile
    Purge,

    /// Count queries by domain, client and action
    Stats(StatsArgs),

    /// Ask the AI model to summarize recent logs
    Summarize(SummarizeArgs),

    /// List and select profiles
    #[command(alias = "prof")]
    Profiles(ProfilesArgs),

    /// Manage the allowlist
    #[command(alias = "allow")]
    Allowlist(DomainListArgs),

    /// Manage the denylist
    #[command(alias = "deny")]
    Denylist(DomainListArgs),

    /// Manage DNS rewrites
    Rewrites(RewritesArgs),

    /// Change profile settings
    Settings(SettingsArgs),

    /// Manage stored credentials and preferences
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Filters shared by commands that read a page of logs.
#[derive(Debug, Args)]
pub struct LogFilterArgs {
    /// Free-text search on domains
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Start of the time range (ISO-8601, unix seconds, or relative like -6h)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the time range
    #[arg(long)]
    pub to: Option<String>,

    /// Max entries to fetch
    #[arg(long, short = 'l', default_value = "100")]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct LogsArgs {
    #[command(flatten)]
    pub filter: LogFilterArgs,

    /// Sort order
    #[arg(long, default_value = "desc")]
    pub sort: SortArg,

    /// Continuation cursor from a previous page
    #[arg(long)]
    pub cursor: Option<String>,
}

#[derive(Debug, Args)]
pub struct TailArgs {
    /// Free-text search on domains
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Milliseconds between polls
    #[arg(long, default_value = "1500")]
    pub interval: u64,

    /// Exit after this many entries have been printed
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Ask the service for a redirecting link
    #[arg(long)]
    pub redirect: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub filter: LogFilterArgs,

    /// Rows per category
    #[arg(long, default_value = "10")]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub filter: LogFilterArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROFILES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    pub command: ProfilesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfilesCommand {
    /// List profiles available to the API key
    #[command(alias = "ls")]
    List,

    /// Show one profile
    Show {
        /// Profile id (defaults to the selected profile)
        id: Option<String>,
    },

    /// Store the remote profile list and select the first one
    Import,

    /// Select the profile used by default
    Use {
        /// Profile id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LISTS & REWRITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DomainListArgs {
    #[command(subcommand)]
    pub command: DomainListCommand,
}

#[derive(Debug, Subcommand)]
pub enum DomainListCommand {
    /// List domains
    #[command(alias = "ls")]
    List,

    /// Add a domain
    Add {
        /// Domain name
        domain: String,
    },

    /// Remove a domain
    #[command(alias = "rm")]
    Remove {
        /// Domain name
        domain: String,
    },

    /// Replace the whole list
    Set {
        /// Domains making up the new list (none clears it)
        domains: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct RewritesArgs {
    #[command(subcommand)]
    pub command: RewritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RewritesCommand {
    /// List rewrite rules
    #[command(alias = "ls")]
    List,

    /// Answer a domain with a fixed value
    Add {
        /// Domain name
        domain: String,
        /// IP address or CNAME target
        answer: String,
    },

    /// Delete a rewrite rule
    #[command(alias = "rm")]
    Remove {
        /// Rule id (see `rewrites list`)
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETTINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Send a partial update to a settings resource
    Patch {
        /// Resource path under the profile (default: settings)
        #[arg(default_value = "settings")]
        segment: String,

        /// JSON body
        #[arg(long, short = 'd', conflicts_with = "from_file", required_unless_present = "from_file")]
        data: Option<String>,

        /// Read the JSON body from a file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the stored configuration (secrets masked)
    Show,

    /// Change stored values
    #[command(arg_required_else_help = true)]
    Set(ConfigSetArgs),

    /// Forget every stored value
    Reset,

    /// Print where configuration is stored
    Path,
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    /// NextDNS API key
    #[arg(long, conflicts_with = "ask_key")]
    pub nextdns_key: Option<String>,

    /// Prompt for the NextDNS API key without echoing it
    #[arg(long)]
    pub ask_key: bool,

    /// Selected profile id
    #[arg(long)]
    pub profile_id: Option<String>,

    /// Default IANA timezone (empty string clears it)
    #[arg(long)]
    pub time_zone: Option<String>,

    /// Gemini API key used by `summarize`
    #[arg(long)]
    pub gemini_key: Option<String>,

    /// Gemini model name
    #[arg(long)]
    pub gemini_model: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
