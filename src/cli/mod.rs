//! CLI module for inferdoc
//!
//! Provides commands:
//! - `diagnose`: run every check and print the report
//! - `lookup`: causes and solutions for an HTTP status code
//! - `issue`: match a free-text complaint against the issue playbook
//! - `guide`: print the reference guides
//! - `serve`: start the browser proxy
//!
//! Without a subcommand an interactive menu offers the same actions.

use crate::server::config::{AppConfig, ConfigOverrides};
use clap::{Parser, Subcommand, ValueEnum};

pub mod diagnose;
pub mod guide;
pub mod issue;
pub mod lookup;
pub mod menu;

/// Inference API troubleshooting tool
#[derive(Parser, Debug)]
#[command(name = "inferdoc")]
#[command(about = "Diagnose connectivity, auth, model, latency and rate-limit problems with a hosted inference API")]
#[command(version)]
pub struct Cli {
    /// Provider API key (overrides TOGETHER_AI_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Provider base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Retries for transient network failures
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Log level (TRACE, DEBUG, INFO, WARNING, ERROR)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Models to check, comma-separated
    #[arg(long, global = true, value_delimiter = ',')]
    pub models: Option<Vec<String>>,

    /// Number of timed inference calls
    #[arg(long, global = true)]
    pub perf_tests: Option<u32>,

    /// Maximum concurrent inference calls
    #[arg(long, global = true)]
    pub concurrent: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Reference guide sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GuideSection {
    #[default]
    All,
    Tiers,
    Models,
    Thresholds,
    Monitoring,
    Practices,
    Questions,
    Resources,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full diagnostic suite
    Diagnose {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the rendered report to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Also save the JSON report as inferdoc_diagnostic_<timestamp>.json
        #[arg(long)]
        save: bool,
        /// Send malformed requests to check error handling
        #[arg(long)]
        probe_errors: bool,
    },
    /// Explain an HTTP status code
    Lookup {
        /// HTTP status code, e.g. 429
        code: u16,
    },
    /// Match a problem description against known issues
    Issue {
        /// Free-text description, e.g. "getting 503 during peak hours"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print reference guides
    Guide {
        /// Section to print
        #[arg(value_enum, default_value_t = GuideSection::All)]
        section: GuideSection,
    },
    /// Start the browser proxy
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Command-line values that take precedence over every other layer
    pub fn overrides(&self) -> ConfigOverrides {
        let (probe_errors, port) = match &self.command {
            Some(Commands::Diagnose { probe_errors, .. }) => (probe_errors.then_some(true), None),
            Some(Commands::Serve { port }) => (None, *port),
            _ => (None, None),
        };
        ConfigOverrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            max_retries: self.max_retries,
            log_level: self.log_level.clone(),
            models: self.models.clone(),
            perf_tests: self.perf_tests,
            concurrent: self.concurrent,
            probe_errors,
            port,
        }
    }
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Diagnose {
            format,
            output,
            save,
            ..
        }) => diagnose::run(config.diagnostic, format, output.as_deref(), save).await,
        Some(Commands::Lookup { code }) => {
            lookup::run(code);
            Ok(())
        }
        Some(Commands::Issue { text }) => {
            issue::run(&text.join(" "));
            Ok(())
        }
        Some(Commands::Guide { section }) => {
            guide::run(section);
            Ok(())
        }
        Some(Commands::Serve { .. }) => crate::server::run(config).await,
        None => menu::run(config).await,
    }
}
