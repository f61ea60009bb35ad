//! File naming for uploads and chunk files.

use std::path::Path;

use crate::error::StorageError;

/// Strip any directory components a client may have sent with the upload
/// name. Rejects names that leave nothing usable.
pub fn sanitize_filename(name: &str) -> Result<String, StorageError> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if last.is_empty() || last == "." || last == ".." {
        return Err(StorageError::InvalidFilename(name.to_string()));
    }
    Ok(last.to_string())
}

/// File name without its final extension: `report.v2.pdf` → `report.v2`.
/// Dotfiles keep their name: `.pdf` → `.pdf`.
pub fn base_name(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// `{base}_chunk_{n}.txt` with `n` 1-based.
pub fn chunk_file_name(base: &str, index: usize) -> String {
    format!("{}_chunk_{}.txt", base, index + 1)
}
