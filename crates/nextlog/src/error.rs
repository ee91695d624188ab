//! CLI error types with miette diagnostics.
//!
//! Maps `nextlog_api::Error` and storage failures into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use nextlog_api::Error as ApiError;
use nextlog_config::StorageError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach {url}")]
    #[diagnostic(
        code(nextlog::connection_failed),
        help("Check your network connection, or raise the limit with --timeout.")
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    // ── Configuration & authentication ───────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nextlog::not_configured),
        help(
            "Store an API key with: nextlog config set --ask-key\n\
             Then pick a profile with: nextlog profiles import\n\
             Or set NEXTDNS_API_KEY and NEXTDNS_PROFILE."
        )
    )]
    NotConfigured { message: String },

    #[error("The API key was rejected")]
    #[diagnostic(
        code(nextlog::auth_failed),
        help("Create a new key at https://my.nextdns.io/account and store it with: nextlog config set --ask-key")
    )]
    AuthFailed,

    #[error("Permission denied: {message}")]
    #[diagnostic(
        code(nextlog::permission_denied),
        help("The API key does not grant access to this profile or operation.")
    )]
    PermissionDenied { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(nextlog::not_found),
        help("Run: nextlog {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(nextlog::api_error))]
    Api { status: u16, message: String },

    #[error("Unexpected response from the service: {message}")]
    #[diagnostic(code(nextlog::invalid_response), help("Re-run with -vv to see the raw request."))]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nextlog::validation))]
    Validation { field: String, reason: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(nextlog::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Storage / IO / Serialization ─────────────────────────────────
    #[error("Configuration storage failed: {0}")]
    #[diagnostic(
        code(nextlog::storage),
        help("Try another backend with --storage file|keyring|memory.")
    )]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(nextlog::json), help("Check the JSON contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotConfigured { .. } | Self::AuthFailed => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Resource-aware mapping: a 404 names what was being looked up.
    pub fn lookup(err: ApiError, resource_type: &str, identifier: &str, list_command: &str) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            }
        } else {
            err.into()
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Configuration { message } => Self::NotConfigured { message },

            ApiError::Remote { status: 401, .. } => Self::AuthFailed,

            ApiError::Remote { status: 403, body } => Self::PermissionDenied {
                message: non_empty(body, "forbidden"),
            },

            ApiError::Remote { status: 404, body } => Self::NotFound {
                resource_type: "profile".into(),
                identifier: non_empty(body, "requested resource"),
                list_command: "profiles list".into(),
            },

            ApiError::Remote { status, body } => Self::Api {
                status,
                message: non_empty(body, "no response body"),
            },

            ApiError::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                let url = e.url().map(ToString::to_string).unwrap_or_default();
                Self::ConnectionFailed { url, source: err }
            }

            ApiError::Deserialization { message, .. } => Self::InvalidResponse { message },

            other => Self::InvalidResponse {
                message: other.to_string(),
            },
        }
    }
}

fn non_empty(body: String, fallback: &str) -> String {
    if body.trim().is_empty() {
        fallback.to_owned()
    } else {
        body
    }
}
