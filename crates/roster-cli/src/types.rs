use std::path::PathBuf;

use roster_cli::pipeline::SourceOutcome;

#[derive(Debug)]
pub struct RunResult {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
    /// False for dry runs.
    pub written: bool,
    pub sources: Vec<SourceOutcome>,
    pub total_records: usize,
    pub has_errors: bool,
}
