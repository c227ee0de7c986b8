use std::path::PathBuf;

use dv_cli::pipeline::ConvertOutcome;

#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dry_run: bool,
    pub outcome: ConvertOutcome,
}
