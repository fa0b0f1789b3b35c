// CSV file discovery in the data directory.

use std::path::{Path, PathBuf};

use tracing::info;

use super::SourceError;

/// List the `*.csv` files directly inside `dir`, sorted by file name.
///
/// The extension check is case-insensitive. An empty result is reported as
/// `SourceError::NoEligibleFiles` so callers never attempt a read.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SourceError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(SourceError::NoEligibleFiles {
            dir: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    info!("found {} CSV files in {}", files.len(), dir.display());
    Ok(files)
}

/// File name of `path` for display in selectors.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
