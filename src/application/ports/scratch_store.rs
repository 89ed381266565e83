use std::io;
use std::path::Path;

use crate::domain::FileType;

/// An on-disk copy of an upload. Dropping it deletes the file.
pub trait ScratchArtifact: Send + Sync {
    fn path(&self) -> &Path;
}

/// Implementations write off the async runtime.
#[async_trait::async_trait]
pub trait ScratchStore: Send + Sync {
    async fn persist(
        &self,
        data: &[u8],
        file_type: FileType,
    ) -> Result<Box<dyn ScratchArtifact>, ScratchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScratchError {
    #[error("failed to create scratch file: {0}")]
    Create(io::Error),
    #[error("failed to write scratch file: {0}")]
    Write(io::Error),
    #[error("scratch write task failed: {0}")]
    Task(String),
}
