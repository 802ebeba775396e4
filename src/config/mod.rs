#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_TARGET_URL: &str = "http://books.toscrape.com/";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "books.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 3600;
