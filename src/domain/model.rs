use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One catalog entry scraped from an item block.
///
/// Field names double as the CSV header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Price (GBP)")]
    pub price: f64,
    #[serde(rename = "Rating (out of 5)")]
    pub rating: u8,
}

/// Raw markup returned by a successful fetch.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

/// Why an item block did not produce a [`Book`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockError {
    #[error("missing title link")]
    MissingTitle,

    #[error("missing price element")]
    MissingPrice,

    #[error("missing rating element")]
    MissingRating,

    #[error("unparseable price '{0}'")]
    InvalidPrice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    /// Zero-based position of the block in document order.
    pub index: usize,
    pub reason: BlockError,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub books: Vec<Book>,
    pub skipped: Vec<SkippedBlock>,
}

/// What the extractor does with a block that is missing a required field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MissingFieldPolicy {
    /// Log a warning, count the block as skipped and keep going.
    #[default]
    Skip,
    /// Fail the whole extraction on the first bad block.
    Abort,
}

/// CSS selectors describing the item markup of the target page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub item: String,
    pub title: String,
    pub title_attr: String,
    pub price: String,
    pub rating: String,
    pub currency_symbol: char,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: "article.product_pod".to_string(),
            title: "h3 a".to_string(),
            title_attr: "title".to_string(),
            price: "p.price_color".to_string(),
            rating: "p.star-rating".to_string(),
            currency_symbol: '£',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub extracted: usize,
    pub skipped: usize,
    /// Location of the written file; `None` when nothing was written.
    pub output: Option<String>,
}
