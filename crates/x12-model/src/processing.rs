use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dates::DateRegistry;
use crate::envelope::{EnvelopeHeader, EnvelopeOverrides};
use crate::line_items::Po1Group;

/// How a run treats its inputs: one interactively prepared document, or a
/// batch where every document passes through with per-index numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    Single,
    Bulk,
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Single => "single",
            ProcessingMode::Bulk => "bulk",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a single-document regeneration needs besides the document
/// itself and the clock. Built once per call and not mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegenerateOptions {
    /// Envelope as parsed from the document; the middle layer of the
    /// override > parsed > walked > default resolution.
    pub envelope: EnvelopeHeader,
    pub overrides: EnvelopeOverrides,
    pub dates: DateRegistry,
    pub line_items: Vec<Po1Group>,
    /// Offset added to the control-number seed; 0 outside batch runs.
    pub batch_index: usize,
}

/// Shared inputs for a bulk run. Line items always pass through in bulk, so
/// no decisions are carried; the per-document index comes from batch order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkOptions {
    pub overrides: EnvelopeOverrides,
    pub dates: DateRegistry,
}

/// One regenerated output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegeneratedDocument {
    pub file_name: String,
    pub content: String,
    pub control_number: String,
    pub segments_emitted: usize,
    pub line_items_emitted: usize,
}
