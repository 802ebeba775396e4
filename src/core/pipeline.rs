use crate::adapters::http::HttpFetcher;
use crate::core::extractor::HtmlExtractor;
use crate::core::writer::write_books;
use crate::core::{Book, ConfigProvider, Extraction, Page, Pipeline, Storage};
use crate::utils::error::Result;
use std::path::Path;
use tracing::Instrument;

/// Fetches one page, extracts its item blocks and writes them as CSV.
pub struct ScrapePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: HttpFetcher,
    extractor: HtmlExtractor,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.request_timeout())?;
        let extractor = HtmlExtractor::new(&config.selectors(), config.missing_field_policy())?;
        Ok(Self {
            storage,
            config,
            fetcher,
            extractor,
        })
    }

    fn output_location(&self) -> String {
        Path::new(self.config.output_dir())
            .join(self.config.output_filename())
            .display()
            .to_string()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScrapePipeline<S, C> {
    async fn fetch(&self) -> Result<Page> {
        let url = self.config.target_url();
        self.fetcher
            .fetch(url)
            .instrument(tracing::info_span!("fetch"))
            .await
    }

    async fn extract(&self, page: Page) -> Result<Extraction> {
        tracing::debug!("Extracting from {} ({} bytes)", page.url, page.body.len());
        tracing::info_span!("extract").in_scope(|| self.extractor.extract(&page.body))
    }

    async fn load(&self, books: Vec<Book>) -> Result<Option<String>> {
        let written = write_books(&self.storage, self.config.output_filename(), &books)
            .instrument(tracing::info_span!("load"))
            .await?;

        if !written {
            return Ok(None);
        }

        let location = self.output_location();
        tracing::info!("Data successfully saved to {}", location);
        Ok(Some(location))
    }
}
