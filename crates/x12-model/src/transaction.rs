use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Transaction set identifiers with a dedicated date vocabulary.
const PURCHASE_ORDER: &str = "850";
const GROCERY_PURCHASE_ORDER: &str = "875";

/// Deduplicated ST transaction-set codes seen across one or more documents.
/// Merging batches is a plain set union, so the result is independent of
/// completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSetRegistry {
    codes: BTreeSet<String>,
}

impl TransactionSetRegistry {
    pub fn register(&mut self, code: &str) {
        let trimmed = code.trim();
        if !trimmed.is_empty() {
            self.codes.insert(trimmed.to_string());
        }
    }

    pub fn merge(&mut self, other: &TransactionSetRegistry) {
        for code in &other.codes {
            self.codes.insert(code.clone());
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Comma-separated code list for display.
    pub fn label(&self) -> String {
        self.codes.iter().cloned().collect::<Vec<_>>().join(", ")
    }

    /// Which date segment family applies: 850 documents carry DTM, 875
    /// documents carry G62, a mixed batch carries both.
    pub fn date_vocabulary(&self) -> &'static str {
        let has_850 = self.contains(PURCHASE_ORDER);
        let has_875 = self.contains(GROCERY_PURCHASE_ORDER);
        match (has_850, has_875) {
            (true, true) => "DTM/G62",
            (false, true) => "G62",
            _ => "DTM",
        }
    }
}
