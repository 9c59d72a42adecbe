//! Input file discovery for batch runs

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::Encoding;

/// True when the file extension names a supported packing, e.g. `.raw10`.
pub fn is_supported_raw(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| Encoding::detect(ext).is_some())
}

/// Supported raw files directly inside `dir`, sorted by path.
pub fn discover_raw_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", dir.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_supported_raw(entry.path()) {
            files.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "Skipping unsupported file");
        }
    }
    files.sort();
    Ok(files)
}

/// Encoding identifier for `path`: the override if given, else its extension.
pub fn encoding_for(path: &Path, encoding_override: Option<&str>) -> String {
    match encoding_override {
        Some(encoding) => encoding.to_string(),
        None => path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    }
}
