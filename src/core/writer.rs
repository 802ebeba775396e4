use crate::domain::model::Book;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};

/// Serializes `books` as CSV: a header row, then one row per book.
pub fn render_csv(books: &[Book]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for book in books {
        writer.serialize(book)?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Writes `books` to `filename` through `storage`.
///
/// Returns `false` without touching storage when there is nothing to write,
/// so an existing file is left as it was.
pub async fn write_books<S: Storage>(storage: &S, filename: &str, books: &[Book]) -> Result<bool> {
    if books.is_empty() {
        tracing::warn!("No data to save. CSV file will not be created.");
        return Ok(false);
    }

    let data = render_csv(books)?;
    tracing::debug!("Writing {} rows ({} bytes) to {}", books.len(), data.len(), filename);
    storage.write_file(filename, &data).await?;

    Ok(true)
}
