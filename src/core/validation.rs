//! Checks applied to caller-supplied options before they reach taxonkit

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::paths::nodes_dump_path;
use crate::error::{TaxonKitError, TaxonKitResult};

/// Ensure `path` holds a non-empty `nodes.dmp` and return its canonical form
pub fn validate_data_dir<P: AsRef<Path>>(path: P) -> TaxonKitResult<PathBuf> {
    let path = path.as_ref();
    let nodes = nodes_dump_path(path);

    match fs::metadata(&nodes) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(fs::canonicalize(path)?),
        _ => Err(TaxonKitError::DumpNotFound(path.to_path_buf())),
    }
}

/// Parse a thread count, falling back to taxonkit's own default when invalid
pub fn validate_threads(value: &str) -> Option<usize> {
    match value.trim().parse::<usize>() {
        Ok(threads) => Some(threads),
        Err(_) => {
            warn!(
                "invalid thread count \"{}\"; resetting to taxonkit default",
                value
            );
            None
        }
    }
}
