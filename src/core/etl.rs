use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;

/// Runs a [`Pipeline`] through fetch, extract and load, in that order.
///
/// Fetch and extract failures halt the run and are returned. Load failures
/// are logged and absorbed; the summary then reports no output.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting scrape");

        let page = self.pipeline.fetch().await.inspect_err(|e| {
            tracing::error!(
                "An error occurred while fetching the page: {} (Category: {:?})",
                e,
                e.category()
            );
        })?;

        let extraction = self.pipeline.extract(page).await.inspect_err(|e| {
            tracing::error!("Extraction aborted: {} (Category: {:?})", e, e.category());
        })?;

        let extracted = extraction.books.len();
        let skipped = extraction.skipped.len();

        let output = match self.pipeline.load(extraction.books).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Failed to save data to CSV: {}", e);
                None
            }
        };

        tracing::info!(
            "Scrape finished: {} extracted, {} skipped, output: {}",
            extracted,
            skipped,
            output.as_deref().unwrap_or("none")
        );

        Ok(RunSummary {
            extracted,
            skipped,
            output,
        })
    }
}
