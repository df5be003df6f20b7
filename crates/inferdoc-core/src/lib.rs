//! Inferdoc Core - diagnostic engine
//!
//! This crate contains everything between configuration and output:
//! - Config: validated runtime settings with safe defaults
//! - Checks: independent probes against the provider API
//! - Runner: sequential execution with per-check timeouts
//! - Reference: static error-code, issue-pattern and guide tables
//! - Report: summary plus text, HTML and JSON rendering

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checks;
pub mod config;
pub mod error;
pub mod matcher;
pub mod reference;
pub mod report;
pub mod result;
pub mod runner;

pub use config::{DiagnosticConfig, LogLevel, PerformanceProfile, DEFAULT_MODELS};
pub use error::{format_error_for_cli, Error, Result, UserFriendlyError};
pub use matcher::{diagnose_issue, IssueMatch};
pub use report::{render_html, render_text, DiagnosticReport, Summary};
pub use result::{CheckResult, CheckStatus, Metric};
pub use runner::Diagnostician;
