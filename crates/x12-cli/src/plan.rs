//! Run plans: the JSON file carrying everything a caller decided before a
//! run, in place of the interactive session the engines were built around.
//!
//! A plan holds envelope overrides, one decision per scanned PO1 group,
//! edits to scanned date entries, and an optional day offset. Line-item
//! decisions apply to groups by position; date edits match entries by their
//! original qualifier and date. A non-zero offset recomputes every date from
//! its original, so it takes precedence over individual date edits.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use x12_model::{DateRegistry, DateSegmentKind, EnvelopeOverrides, Po1Group};

/// Caller decisions for one run. Every field is optional in the JSON; an
/// empty plan regenerates everything as scanned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunPlan {
    pub envelope: EnvelopeOverrides,
    pub line_items: Vec<LineItemDecision>,
    pub dates: Vec<DateEdit>,
    /// Days added to every date. Single mode recomputes the scanned registry
    /// from its originals; bulk mode shifts the documents themselves.
    pub date_offset_days: i64,
}

/// Decision for one scanned PO1 group, matched by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDecision {
    pub include: bool,
    /// Replacement PO1 anchor text, without terminator.
    #[serde(default)]
    pub edited_anchor: Option<String>,
    /// Whether the edit is committed. Generation refuses included groups
    /// whose edit is still staged.
    #[serde(default = "default_committed")]
    pub committed: bool,
}

fn default_committed() -> bool {
    true
}

/// One date-entry edit, matched against a scanned entry by its original
/// qualifier and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateEdit {
    pub segment_type: DateSegmentKind,
    pub original_qualifier_id: String,
    pub original_date: String,
    /// Replacement qualifier; empty keeps whatever qualifier is already on
    /// the rewritten segment.
    #[serde(default)]
    pub qualifier_id: String,
    pub date: String,
}

impl RunPlan {
    /// Load a plan from a JSON file.
    pub fn load(path: &Path) -> Result<RunPlan> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read plan {}", path.display()))?;
        let plan =
            serde_json::from_str(&text).with_context(|| format!("parse plan {}", path.display()))?;
        Ok(plan)
    }

    /// Apply the line-item decisions to scanned groups by position. Staged
    /// edits stay staged unless the decision commits them; decisions beyond
    /// the scanned groups are ignored.
    pub fn apply_line_items(&self, groups: &mut [Po1Group]) {
        for (group, decision) in groups.iter_mut().zip(&self.line_items) {
            group.include = decision.include;
            if let Some(text) = &decision.edited_anchor {
                group.stage_edit(text.clone());
                if decision.committed {
                    group.commit_edit();
                }
            }
        }
        if self.line_items.len() > groups.len() {
            debug!(
                decisions = self.line_items.len(),
                groups = groups.len(),
                "plan carries more line-item decisions than scanned groups"
            );
        }
    }

    /// Apply the date edits to a registry. Edits that match no entry are
    /// logged and skipped.
    pub fn apply_dates(&self, registry: &mut DateRegistry) {
        for edit in &self.dates {
            let matched = registry.apply_edit(
                edit.segment_type,
                &edit.original_qualifier_id,
                &edit.original_date,
                &edit.qualifier_id,
                &edit.date,
            );
            if !matched {
                warn!(
                    segment = %edit.segment_type,
                    qualifier = %edit.original_qualifier_id,
                    date = %edit.original_date,
                    "date edit matches no scanned entry"
                );
            }
        }
    }
}
