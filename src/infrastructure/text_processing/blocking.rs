use std::time::Duration;

use crate::application::ports::ExtractorError;
use crate::domain::FileType;

pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs a parser on the blocking pool, bounded by `timeout`.
pub(crate) async fn run_blocking<T, F>(
    timeout: Duration,
    file_type: FileType,
    parse: F,
) -> Result<T, ExtractorError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ExtractorError> + Send + 'static,
{
    tokio::time::timeout(timeout, tokio::task::spawn_blocking(parse))
        .await
        .map_err(|_| {
            ExtractorError::ExtractionFailed(format!(
                "{file_type} extraction timed out after {}s",
                timeout.as_secs()
            ))
        })?
        .map_err(|e| ExtractorError::ExtractionFailed(format!("task join error: {e}")))?
}
