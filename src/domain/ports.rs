use crate::domain::model::{Book, Extraction, MissingFieldPolicy, Page, SelectorConfig};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn target_url(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn output_filename(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn missing_field_policy(&self) -> MissingFieldPolicy;
    fn selectors(&self) -> SelectorConfig;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<Page>;
    async fn extract(&self, page: Page) -> Result<Extraction>;
    /// Returns the written location, or `None` if there was nothing to write.
    async fn load(&self, books: Vec<Book>) -> Result<Option<String>>;
}
