//! Source workbook discovery.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Extensions accepted as source workbooks (compared case-insensitively).
pub const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Prefix of the owner files Office leaves next to an open workbook.
const LOCK_FILE_PREFIX: &str = "~$";

/// True if `path` names a `.xlsx`/`.xls` file that is not an Office lock file.
pub fn is_workbook_path(path: &Path) -> bool {
    let is_lock = path
        .file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.starts_with(LOCK_FILE_PREFIX));
    if is_lock {
        return false;
    }
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Source identifier for a workbook: its file name.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lists source workbooks in `dir`, sorted by file name.
///
/// Files named `exclude` are skipped so a run never reads its own output.
pub fn list_workbook_files(dir: &Path, exclude: Option<&OsStr>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() || !is_workbook_path(&path) {
            continue;
        }
        if exclude.is_some_and(|name| path.file_name() == Some(name)) {
            debug!(path = %path.display(), "skipping output workbook");
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
