use crate::domain::model::Page;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// `timeout` bounds the whole request; `None` leaves it unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Issues one GET and returns the body decoded as UTF-8.
    ///
    /// Non-success statuses are errors. No retries.
    pub async fn fetch(&self, url: &str) -> Result<Page> {
        tracing::info!("Fetching content from {}...", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("Response status: {}", response.status());
        let response = response.error_for_status()?;

        // Always UTF-8, whatever charset the server declares.
        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        tracing::info!("Successfully fetched page content ({} bytes).", bytes.len());
        Ok(Page {
            url: url.to_string(),
            body,
        })
    }
}
