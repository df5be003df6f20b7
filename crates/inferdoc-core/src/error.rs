//! Error types for inferdoc-core
//!
//! Only setup problems are errors. Once checks start running, every failure
//! is captured as a `fail`/`warn` [`CheckResult`](crate::CheckResult).

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration, raised before any network call
    #[error("invalid configuration: {field}: {message}")]
    Config {
        /// Config field name
        field: String,
        /// Detailed message
        message: String,
    },

    /// HTTP wrapper error surfaced outside a check
    #[error("http error: {0}")]
    Http(#[from] inferdoc_http::Error),

    /// Report serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this is a configuration error
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Human-readable rendering of errors for the CLI
pub trait UserFriendlyError {
    /// A user-facing message
    fn user_message(&self) -> String;

    /// How to fix the problem, if known
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Config { field, message } => {
                format!("Configuration error in '{}': {}", field, message)
            }
            Error::Http(e) => format!("Request to the provider failed: {}", e),
            Error::Serialization(e) => format!("Could not serialize the report: {}", e),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Config { field, .. } if field == "api_key" => Some(
                "Set TOGETHER_AI_API_KEY (or TOGETHERAI_API_KEY), pass --api-key, or add it to .env."
                    .to_string(),
            ),
            Error::Config { field, .. } => Some(format!(
                "Check the '{}' setting in inferdoc.toml or the TOGETHER_AI_* environment.",
                field
            )),
            Error::Http(e) if e.is_transient() => {
                Some("Check your internet connection and firewall settings.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error for display in the CLI
pub fn format_error_for_cli(error: &Error) -> String {
    let mut output = error.user_message();
    if let Some(suggestion) = error.suggestion() {
        output.push_str("\n\n");
        output.push_str(&suggestion);
    }
    output.push('\n');
    output
}
