use serde::{Deserialize, Serialize};

/// One PO1 line-item group: the PO1 anchor plus up to two dependents (a PO4
/// directly after the PO1, and an AMT directly after that PO4). Lines are
/// stored trimmed and without terminators.
///
/// Groups start excluded (`include = false`); as long as no group in a
/// document is included, regeneration treats the document as unfiltered and
/// emits every group verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Po1Group {
    pub anchor_line: String,
    pub include: bool,
    pub dependent_segments: Vec<String>,
    /// Edited anchor text that has not been committed yet. Regeneration
    /// refuses included groups that still carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_edit: Option<String>,
}

impl Po1Group {
    pub fn new(anchor_line: impl Into<String>) -> Po1Group {
        Po1Group {
            anchor_line: anchor_line.into(),
            include: false,
            dependent_segments: Vec::new(),
            pending_edit: None,
        }
    }

    /// Stage an edited anchor without committing it.
    pub fn stage_edit(&mut self, text: impl Into<String>) {
        self.pending_edit = Some(text.into());
    }

    /// Commit any staged edit into the anchor line.
    pub fn commit_edit(&mut self) {
        if let Some(text) = self.pending_edit.take() {
            self.anchor_line = text;
        }
    }

    pub fn has_pending_edit(&self) -> bool {
        self.pending_edit.is_some()
    }
}

/// Whether any group was explicitly included. When false, regeneration is a
/// pass-through over all groups.
pub fn any_included(groups: &[Po1Group]) -> bool {
    groups.iter().any(|group| group.include)
}

/// Count of groups a single-mode regeneration will emit: the included ones
/// when a selection was made, otherwise all of them.
pub fn emitted_group_count(groups: &[Po1Group]) -> usize {
    if any_included(groups) {
        groups.iter().filter(|group| group.include).count()
    } else {
        groups.len()
    }
}
