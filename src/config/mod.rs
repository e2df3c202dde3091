pub mod cli;

use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "leaders-etl")]
#[command(about = "Fetch country leaders and enrich them with encyclopedia intro paragraphs")]
pub struct CliConfig {
    #[arg(long, default_value = "https://country-leaders.onrender.com")]
    pub root_url: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Output format; prompted for interactively when omitted.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Minimum character count for a qualifying intro paragraph.
    #[arg(long, default_value = "200")]
    pub min_intro_length: usize,

    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn root_url(&self) -> &str {
        &self.root_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Json)
    }

    fn min_intro_length(&self) -> usize {
        self.min_intro_length
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("root_url", &self.root_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("min_intro_length", self.min_intro_length, 1)?;
        validate_positive_number("timeout_secs", self.timeout_secs as usize, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            root_url: "https://country-leaders.onrender.com".to_string(),
            output_path: "./output".to_string(),
            format: None,
            min_intro_length: 200,
            timeout_secs: 10,
            verbose: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_bad_root_url_is_rejected() {
        let mut config = base_config();
        config.root_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_min_intro_length_is_rejected() {
        let mut config = base_config();
        config.min_intro_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_defaults_to_json() {
        assert_eq!(base_config().format(), OutputFormat::Json);
    }
}
