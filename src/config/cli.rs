use super::{
    DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_TARGET_URL, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::domain::model::{MissingFieldPolicy, SelectorConfig};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "books-etl")]
#[command(about = "Scrape book titles, prices and ratings from one page into a CSV file")]
pub struct CliConfig {
    /// Page to scrape
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    pub url: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Whole-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// What to do with item blocks missing a title, price or rating
    #[arg(long, value_enum, default_value_t = MissingFieldPolicy::Skip)]
    pub on_missing_field: MissingFieldPolicy,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn target_url(&self) -> &str {
        &self.url
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_filename(&self) -> &str {
        &self.output_file
    }

    fn request_timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.timeout_secs))
    }

    fn missing_field_policy(&self) -> MissingFieldPolicy {
        self.on_missing_field
    }

    fn selectors(&self) -> SelectorConfig {
        SelectorConfig::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("url", &self.url)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_path("output_file", &self.output_file)?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, MAX_TIMEOUT_SECS)
    }
}
