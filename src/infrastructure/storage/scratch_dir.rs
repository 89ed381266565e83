use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::application::ports::{ScratchArtifact, ScratchError, ScratchStore};
use crate::domain::FileType;

const SCRATCH_PREFIX: &str = "precis-";

/// Directory that holds short-lived copies of uploads for extractors that
/// can only parse from disk.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ScratchError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(ScratchError::Create)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `data` to a uniquely named file inside the directory.
    pub fn create_file(&self, data: &[u8], file_type: FileType) -> Result<ScratchFile, ScratchError> {
        let mut file = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(file_type.as_extension())
            .tempfile_in(&self.root)
            .map_err(ScratchError::Create)?;

        file.write_all(data).map_err(ScratchError::Write)?;
        file.flush().map_err(ScratchError::Write)?;

        Ok(ScratchFile {
            path: file.into_temp_path(),
        })
    }
}

#[async_trait::async_trait]
impl ScratchStore for ScratchDir {
    async fn persist(
        &self,
        data: &[u8],
        file_type: FileType,
    ) -> Result<Box<dyn ScratchArtifact>, ScratchError> {
        let scratch = self.clone();
        let data = data.to_vec();

        let file = tokio::task::spawn_blocking(move || scratch.create_file(&data, file_type))
            .await
            .map_err(|e| ScratchError::Task(e.to_string()))??;

        Ok(Box::new(file))
    }
}

/// Removes its file when dropped.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchArtifact for ScratchFile {
    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        tracing::debug!(path = %self.path.display(), "Removing scratch file");
    }
}
