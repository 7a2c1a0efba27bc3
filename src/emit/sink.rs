use std::path::PathBuf;

use tracing::info;

use crate::error::{Error, Result};

/// Destination for rendered export files.
pub trait FileSink {
    /// Store `bytes` under `file_name` and return where they went.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be stored.
    fn emit(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes each file into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn emit(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|source| Error::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote export file");
        Ok(path)
    }
}
