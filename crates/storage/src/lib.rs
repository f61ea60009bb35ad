pub mod error;
pub mod naming;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use tokchunk_core::config::StorageConfig;
use tokchunk_ingest::Chunk;

pub use error::StorageError;
pub use naming::{base_name, chunk_file_name, sanitize_filename};

/// What was written for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    /// Original (sanitized) upload name.
    pub filename: String,
    /// Chunk file names in chunk order, relative to the chunk directory.
    pub chunk_files: Vec<String>,
}

/// Flat-file store for uploaded PDFs and their chunks.
///
/// Directories come from configuration; nothing is created until
/// [`ChunkStore::ensure_dirs`] is called.
#[derive(Debug, Clone)]
pub struct ChunkStore {
    upload_dir: PathBuf,
    chunk_dir: PathBuf,
}

impl ChunkStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            chunk_dir: config.chunk_dir.clone(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn chunk_dir(&self) -> &Path {
        &self.chunk_dir
    }

    /// Create the chunk directory if missing.
    pub fn ensure_chunk_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.chunk_dir)?;
        Ok(())
    }

    /// Create the upload and chunk directories if missing.
    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.upload_dir)?;
        self.ensure_chunk_dir()?;
        info!(
            "Storage: uploads in {}, chunks in {}",
            self.upload_dir.display(),
            self.chunk_dir.display()
        );
        Ok(())
    }

    /// Save the original upload under its sanitized name. Returns the path
    /// written.
    pub fn save_upload(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let name = sanitize_filename(filename)?;
        let path = self.upload_dir.join(&name);
        fs::write(&path, bytes)?;
        info!(file = %path.display(), bytes = bytes.len(), "saved upload");
        Ok(path)
    }

    /// Write each chunk to `{base}_chunk_{n}.txt` in the chunk directory.
    ///
    /// All-or-nothing: if any write fails, files already written by this
    /// call are removed before the error is returned.
    pub fn write_chunks(&self, filename: &str, chunks: &[Chunk]) -> Result<ChunkSummary, StorageError> {
        let name = sanitize_filename(filename)?;
        let base = base_name(&name);

        let mut written: Vec<PathBuf> = Vec::with_capacity(chunks.len());
        let mut chunk_files = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let file_name = chunk_file_name(base, i);
            let path = self.chunk_dir.join(&file_name);
            if let Err(e) = fs::write(&path, chunk.content.as_bytes()) {
                warn!(
                    file = %path.display(),
                    error = %e,
                    rolled_back = written.len(),
                    "chunk write failed, removing partial output"
                );
                for done in &written {
                    if let Err(rm) = fs::remove_file(done) {
                        warn!(file = %done.display(), error = %rm, "failed to remove partial chunk");
                    }
                }
                return Err(e.into());
            }
            written.push(path);
            chunk_files.push(file_name);
        }

        info!(filename = %name, chunks = chunk_files.len(), "wrote chunk files");
        Ok(ChunkSummary {
            filename: name,
            chunk_files,
        })
    }
}
