//! Batch pipeline: discover source workbooks, extract each one in isolation,
//! consolidate, and write the roster workbook.
//!
//! A source that cannot be read is recorded as failed and skipped; the
//! remaining sources are still consolidated and written.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roster_core::{RecordExtractor, aggregate, build_rows};
use roster_ingest::{list_workbook_files, read_first_sheet, source_name};
use roster_model::{OutputLayout, Record, ResultSet};
use roster_output::write_workbook;
use tracing::{debug, info, info_span, trace, warn};

use crate::logging::redact_value;

/// Outcome of reading one source workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Extracted { records: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct SourceOutcome {
    /// Source identifier (file name).
    pub source: String,
    pub path: PathBuf,
    pub status: SourceStatus,
}

impl SourceOutcome {
    pub fn records(&self) -> usize {
        match self.status {
            SourceStatus::Extracted { records } => records,
            SourceStatus::Failed { .. } => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, SourceStatus::Failed { .. })
    }
}

/// Every source outcome plus the records consolidated from the readable ones.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub result_set: ResultSet,
    pub sources: Vec<SourceOutcome>,
}

impl BatchResult {
    pub fn failed(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.sources.iter().filter(|outcome| outcome.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn record_count(&self) -> usize {
        self.result_set.record_count()
    }
}

/// Lists the source workbooks of `source_dir`.
///
/// The output workbook is left out only when it lives in `source_dir`
/// itself; a source that merely shares its file name is still read.
pub fn discover(source_dir: &Path, output_path: &Path) -> Result<Vec<PathBuf>> {
    let exclude = output_in_dir(source_dir, output_path);
    if let Some(name) = exclude {
        debug!(file = %name.to_string_lossy(), "output workbook excluded from sources");
    }
    let files = list_workbook_files(source_dir, exclude)
        .with_context(|| format!("list workbooks in {}", source_dir.display()))?;
    debug!(dir = %source_dir.display(), count = files.len(), "source workbooks discovered");
    Ok(files)
}

/// File name of `output_path` when its directory is `source_dir`.
///
/// Both directories are canonicalized; a directory that does not exist
/// cannot hold the output, so nothing is excluded.
fn output_in_dir<'a>(source_dir: &Path, output_path: &'a Path) -> Option<&'a OsStr> {
    let name = output_path.file_name()?;
    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let output_dir = parent.canonicalize().ok()?;
    let source_dir = source_dir.canonicalize().ok()?;
    (output_dir == source_dir).then_some(name)
}

/// Extracts every record of the first sheet of the workbook at `path`.
pub fn extract_source(path: &Path, extractor: &RecordExtractor) -> Result<Vec<Record>> {
    let grid = read_first_sheet(path)?;
    let records = extractor.extract(&grid);
    let name_field = &extractor.form().name_field;
    let id_field = &extractor.form().id_field;
    for record in &records {
        trace!(
            name = %redact_value(record.value(name_field)),
            id = %redact_value(record.value(id_field)),
            "record extracted"
        );
    }
    Ok(records)
}

/// Runs `read` over each path in order, isolating failures per source.
///
/// Successful sources with no records are reported but not consolidated.
pub fn run_batch<F>(paths: &[PathBuf], mut read: F) -> BatchResult
where
    F: FnMut(&Path) -> Result<Vec<Record>>,
{
    let mut sources = Vec::with_capacity(paths.len());
    let mut extracted = Vec::with_capacity(paths.len());
    for path in paths {
        let source = source_name(path);
        let span = info_span!("source", source = %source);
        let _guard = span.enter();
        let status = match read(path) {
            Ok(records) => {
                info!(records = records.len(), "{source}: {} records", records.len());
                let count = records.len();
                extracted.push((source.clone(), records));
                SourceStatus::Extracted { records: count }
            }
            Err(error) => {
                let reason = format!("{error:#}");
                warn!(error = %reason, "source skipped");
                SourceStatus::Failed { reason }
            }
        };
        sources.push(SourceOutcome {
            source,
            path: path.clone(),
            status,
        });
    }
    BatchResult {
        result_set: aggregate(extracted),
        sources,
    }
}

/// Extracts every workbook in `paths` with `extractor`.
pub fn extract_all(paths: &[PathBuf], extractor: &RecordExtractor) -> BatchResult {
    run_batch(paths, |path| extract_source(path, extractor))
}

/// Writes the consolidated sheet and returns the number of rows written.
pub fn write_output(
    path: &Path,
    sheet_name: &str,
    result_set: &ResultSet,
    layout: &OutputLayout,
) -> Result<usize> {
    let rows = build_rows(result_set, layout);
    write_workbook(path, sheet_name, &rows)
        .with_context(|| format!("write roster {}", path.display()))?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use roster_model::fields;

    use super::*;

    fn record(name: &str) -> Record {
        [(fields::NAME, name)].into_iter().collect()
    }

    #[test]
    fn failures_are_isolated_per_source() {
        let paths = vec![
            PathBuf::from("dir/a.xlsx"),
            PathBuf::from("dir/broken.xlsx"),
            PathBuf::from("dir/c.xlsx"),
        ];
        let batch = run_batch(&paths, |path| {
            if path.ends_with("broken.xlsx") {
                Err(anyhow!("not a workbook"))
            } else {
                Ok(vec![record("x")])
            }
        });

        assert_eq!(batch.sources.len(), 3);
        assert!(batch.has_failures());
        let failed: Vec<_> = batch.failed().map(|o| o.source.as_str()).collect();
        assert_eq!(failed, vec!["broken.xlsx"]);
        assert_eq!(
            batch.sources[1].status,
            SourceStatus::Failed {
                reason: "not a workbook".to_string()
            }
        );
        let groups: Vec<_> = batch
            .result_set
            .groups()
            .iter()
            .map(|g| g.source.as_str())
            .collect();
        assert_eq!(groups, vec!["a.xlsx", "c.xlsx"]);
        assert_eq!(batch.record_count(), 2);
    }

    #[test]
    fn empty_sources_are_reported_but_not_grouped() {
        let paths = vec![PathBuf::from("empty.xlsx"), PathBuf::from("full.xlsx")];
        let batch = run_batch(&paths, |path| {
            if path.ends_with("empty.xlsx") {
                Ok(Vec::new())
            } else {
                Ok(vec![record("a"), record("b")])
            }
        });

        assert!(!batch.has_failures());
        assert_eq!(batch.sources[0].records(), 0);
        assert_eq!(batch.sources[1].records(), 2);
        assert_eq!(batch.result_set.len(), 1);
        assert!(batch.result_set.get("empty.xlsx").is_none());
    }
}
