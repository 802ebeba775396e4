//! HTML item-block extraction.
//!
//! `scraper` documents are `!Send`, so everything here is synchronous and the
//! parsed [`Html`] never outlives a single [`HtmlExtractor::extract`] call.

use crate::domain::model::{
    BlockError, Book, Extraction, MissingFieldPolicy, SelectorConfig, SkippedBlock,
};
use crate::utils::error::{EtlError, Result};
use scraper::{ElementRef, Html, Selector};

/// Mis-decoded UTF-8 renders `£` as `Â£`; the stray lead byte is dropped too.
const MOJIBAKE_PREFIX: char = 'Â';

pub struct HtmlExtractor {
    item: Selector,
    title: Selector,
    price: Selector,
    rating: Selector,
    title_attr: String,
    currency_symbol: char,
    policy: MissingFieldPolicy,
}

fn parse_selector(field: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::InvalidConfigValueError {
        field: field.to_string(),
        value: css.to_string(),
        reason: format!("Invalid CSS selector: {:?}", e),
    })
}

impl HtmlExtractor {
    pub fn new(selectors: &SelectorConfig, policy: MissingFieldPolicy) -> Result<Self> {
        Ok(Self {
            item: parse_selector("selectors.item", &selectors.item)?,
            title: parse_selector("selectors.title", &selectors.title)?,
            price: parse_selector("selectors.price", &selectors.price)?,
            rating: parse_selector("selectors.rating", &selectors.rating)?,
            title_attr: selectors.title_attr.clone(),
            currency_symbol: selectors.currency_symbol,
            policy,
        })
    }

    /// Extracts one [`Book`] per item block, in document order.
    ///
    /// Empty markup is not an error: it yields an empty [`Extraction`].
    /// Blocks that fail to parse are skipped or abort the run depending on
    /// the configured [`MissingFieldPolicy`].
    pub fn extract(&self, html: &str) -> Result<Extraction> {
        let mut extraction = Extraction::default();

        if html.trim().is_empty() {
            tracing::warn!("HTML content is empty. No data to extract.");
            return Ok(extraction);
        }

        tracing::info!("Parsing HTML and extracting book information...");
        let document = Html::parse_document(html);

        for (index, block) in document.select(&self.item).enumerate() {
            match self.parse_block(block) {
                Ok(book) => {
                    tracing::debug!("Block {}: {:?}", index, book);
                    extraction.books.push(book);
                }
                Err(reason) => match self.policy {
                    MissingFieldPolicy::Abort => {
                        return Err(EtlError::ParseError { index, reason });
                    }
                    MissingFieldPolicy::Skip => {
                        tracing::warn!("Skipping item block {}: {}", index, reason);
                        extraction.skipped.push(SkippedBlock { index, reason });
                    }
                },
            }
        }

        tracing::info!(
            "Finished extracting information for {} books.",
            extraction.books.len()
        );
        if !extraction.skipped.is_empty() {
            tracing::warn!("{} item blocks were skipped", extraction.skipped.len());
        }

        Ok(extraction)
    }

    fn parse_block(&self, block: ElementRef<'_>) -> std::result::Result<Book, BlockError> {
        let title = block
            .select(&self.title)
            .next()
            .and_then(|link| link.value().attr(&self.title_attr))
            // Padding around the attribute value is not part of the title.
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(BlockError::MissingTitle)?
            .to_string();

        let price_text: String = block
            .select(&self.price)
            .next()
            .ok_or(BlockError::MissingPrice)?
            .text()
            .collect();
        let price = parse_price(&price_text, self.currency_symbol)?;

        let rating_element = block
            .select(&self.rating)
            .next()
            .ok_or(BlockError::MissingRating)?;
        let rating = parse_rating(rating_element.value().attr("class").unwrap_or_default());

        Ok(Book {
            title,
            price,
            rating,
        })
    }
}

/// Parses displayed price text such as `£51.77`.
pub fn parse_price(text: &str, currency_symbol: char) -> std::result::Result<f64, BlockError> {
    let trimmed = text.trim();
    let amount = trimmed.trim_start_matches(MOJIBAKE_PREFIX);
    let amount = amount.strip_prefix(currency_symbol).unwrap_or(amount).trim();

    match amount.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(BlockError::InvalidPrice(trimmed.to_string())),
    }
}

/// Reads the rating from a class attribute like `star-rating Three`.
/// Only the second token counts; anything else rates 0.
pub fn parse_rating(class_attr: &str) -> u8 {
    class_attr
        .split_whitespace()
        .nth(1)
        .and_then(rating_from_word)
        .unwrap_or(0)
}

pub fn rating_from_word(word: &str) -> Option<u8> {
    match word {
        "One" => Some(1),
        "Two" => Some(2),
        "Three" => Some(3),
        "Four" => Some(4),
        "Five" => Some(5),
        _ => None,
    }
}
