use crate::config::{
    DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_TARGET_URL, DEFAULT_TIMEOUT_SECS,
    MAX_TIMEOUT_SECS,
};
use crate::core::ConfigProvider;
use crate::domain::model::{MissingFieldPolicy, SelectorConfig};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// File-based configuration.
///
/// ```toml
/// [source]
/// url = "http://books.toscrape.com/"
/// timeout_seconds = 30
///
/// [extract]
/// on_missing_field = "skip"
///
/// [extract.selectors]
/// item = "article.product_pod"
///
/// [load]
/// output_path = "${OUTPUT_DIR}"
/// filename = "books.csv"
/// ```
///
/// Every table is optional; omitted values fall back to the CLI defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub load: LoadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// `0` disables the timeout.
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TARGET_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub on_missing_field: MissingFieldPolicy,
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub filename: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_DIR.to_string(),
            filename: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
            })
            .into_owned()
    }

    /// Fails on a `${VAR}` that substitution could not resolve.
    fn ensure_resolved(field: &str, value: &str) -> Result<()> {
        match env_var_pattern().captures(value) {
            Some(caps) => Err(EtlError::MissingConfigError {
                field: field.to_string(),
                variable: caps[1].to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn target_url(&self) -> &str {
        &self.source.url
    }

    fn output_dir(&self) -> &str {
        &self.load.output_path
    }

    fn output_filename(&self) -> &str {
        &self.load.filename
    }

    fn request_timeout(&self) -> Option<Duration> {
        match self.source.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    fn missing_field_policy(&self) -> MissingFieldPolicy {
        self.extract.on_missing_field
    }

    fn selectors(&self) -> SelectorConfig {
        self.extract.selectors.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        Self::ensure_resolved("source.url", &self.source.url)?;
        Self::ensure_resolved("load.output_path", &self.load.output_path)?;
        Self::ensure_resolved("load.filename", &self.load.filename)?;

        validation::validate_url("source.url", &self.source.url)?;
        validation::validate_range(
            "source.timeout_seconds",
            self.source.timeout_seconds,
            0,
            MAX_TIMEOUT_SECS,
        )?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_path("load.filename", &self.load.filename)?;
        validation::validate_selectors(&self.extract.selectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.target_url(), "http://books.toscrape.com/");
        assert_eq!(config.output_dir(), ".");
        assert_eq!(config.output_filename(), "books.csv");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.missing_field_policy(), MissingFieldPolicy::Skip);
        assert_eq!(config.selectors(), SelectorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
url = "https://example.com/shelf/"
timeout_seconds = 0

[extract]
on_missing_field = "abort"

[extract.selectors]
item = "div.book"
currency_symbol = "$"

[load]
output_path = "./out"
filename = "shelf.csv"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.target_url(), "https://example.com/shelf/");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.missing_field_policy(), MissingFieldPolicy::Abort);
        assert_eq!(config.selectors().item, "div.book");
        assert_eq!(config.selectors().currency_symbol, '$');
        assert_eq!(config.selectors().price, "p.price_color");
        assert_eq!(config.output_filename(), "shelf.csv");
        assert!(config.logging.verbose);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOOKS_ETL_TEST_OUTPUT_DIR", "/tmp/books-etl");

        let toml_content = r#"
[load]
output_path = "${BOOKS_ETL_TEST_OUTPUT_DIR}"
filename = "${BOOKS_ETL_TEST_UNSET_VAR}.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_dir(), "/tmp/books-etl");
        assert_eq!(config.output_filename(), "${BOOKS_ETL_TEST_UNSET_VAR}.csv");
        match config.validate() {
            Err(EtlError::MissingConfigError { field, variable }) => {
                assert_eq!(field, "load.filename");
                assert_eq!(variable, "BOOKS_ETL_TEST_UNSET_VAR");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        std::env::remove_var("BOOKS_ETL_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_unset_output_dir_variable_fails_validation() {
        let config = TomlConfig::from_toml_str(
            "[load]\noutput_path = \"${BOOKS_ETL_TEST_NEVER_SET_DIR}/out\"\n",
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { ref field, .. }) if field == "load.output_path"
        ));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = TomlConfig::from_toml_str("[extract]\non_missing_field = \"ignore\"\n");
        assert!(matches!(result, Err(EtlError::ConfigError { .. })));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[source]\nurl = \"invalid-url\"\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            TomlConfig::from_toml_str("[extract.selectors]\nrating = \"p..star\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[load]\nfilename = \"from-file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_filename(), "from-file.csv");
    }
}
