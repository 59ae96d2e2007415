use std::path::PathBuf;

/// How a run processed its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Single,
    Bulk,
    Shift,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Single => "single",
            RunMode::Bulk => "bulk",
            RunMode::Shift => "shift",
        }
    }
}

/// Everything the end-of-run summary shows.
#[derive(Debug)]
pub struct RunResult {
    pub mode: RunMode,
    pub output_dir: PathBuf,
    pub transaction_sets: String,
    pub files: Vec<FileOutcome>,
    pub errors: Vec<String>,
    pub dry_run: bool,
    pub has_errors: bool,
}

/// One input/output pair in the summary table.
#[derive(Debug)]
pub struct FileOutcome {
    pub input_name: String,
    pub output_name: String,
    /// Fresh control number; shift runs keep the originals and carry none.
    pub control_number: Option<String>,
    pub segments: usize,
    /// Line items emitted by a generate run.
    pub line_items: Option<usize>,
    /// Date elements rewritten by a shift run.
    pub dates_shifted: Option<usize>,
}
