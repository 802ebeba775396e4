pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::ScrapePipeline};
pub use domain::model::{Book, MissingFieldPolicy, RunSummary, SelectorConfig};
pub use utils::error::{EtlError, Result};
