//! Interactive menu shown when no subcommand is given

use super::{diagnose, guide, issue, lookup, GuideSection, OutputFormat};
use crate::server::config::AppConfig;
use anyhow::Result;
use inquire::{Password, Select, Text};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Diagnose,
    Lookup,
    Issue,
    Guide,
    Serve,
    Exit,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::Diagnose,
        Action::Issue,
        Action::Lookup,
        Action::Guide,
        Action::Serve,
        Action::Exit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Diagnose => "Run full diagnostic",
            Action::Lookup => "Explain an HTTP status code",
            Action::Issue => "Diagnose a customer issue",
            Action::Guide => "Show reference guides",
            Action::Serve => "Start the browser proxy",
            Action::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Comma-separated model list; empty input keeps the configured models
fn parse_models(input: &str) -> Option<Vec<String>> {
    let models: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();
    (!models.is_empty()).then_some(models)
}

async fn run_diagnostic(config: &mut AppConfig) -> Result<()> {
    if config.diagnostic.api_key.trim().is_empty() {
        let key = Password::new("Enter your API key:")
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .without_confirmation()
            .with_validator(inquire::required!())
            .prompt()?;
        config.diagnostic.api_key = key;
    }

    let models = Text::new("Models to test (comma-separated, Enter for defaults):").prompt()?;
    let mut run_config = config.diagnostic.clone();
    if let Some(models) = parse_models(&models) {
        run_config.models_to_test = models;
    }

    let report = diagnose::execute(run_config).await?;
    println!("{}", diagnose::render(&report, OutputFormat::Text)?);
    let name = diagnose::save_json(&report)?;
    println!("💾 Detailed results saved to: {}", name);
    Ok(())
}

/// Loop over the menu until the user exits
pub async fn run(mut config: AppConfig) -> Result<()> {
    println!("🩺 inferdoc - inference API troubleshooting\n");
    loop {
        let action = Select::new("What would you like to do?", Action::ALL.to_vec()).prompt()?;
        match action {
            Action::Diagnose => run_diagnostic(&mut config).await?,
            Action::Lookup => {
                let code = Text::new("HTTP status code:").prompt()?;
                match code.trim().parse::<u16>() {
                    Ok(code) => lookup::run(code),
                    Err(_) => println!("⚠️  '{}' is not a status code", code.trim()),
                }
            }
            Action::Issue => {
                let text = Text::new("Describe the customer issue:").prompt()?;
                if !text.trim().is_empty() {
                    issue::run(&text);
                }
            }
            Action::Guide => guide::run(GuideSection::All),
            Action::Serve => return crate::server::run(config).await,
            Action::Exit => return Ok(()),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_models() {
        assert_eq!(
            parse_models(" a-7b, ,b-13b "),
            Some(vec!["a-7b".to_string(), "b-13b".to_string()])
        );
        assert_eq!(parse_models("   "), None);
    }
}
