use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which date segment a registry entry came from. 850 purchase orders carry
/// DTM; 875 grocery purchase orders carry G62.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateSegmentKind {
    Dtm,
    G62,
}

impl DateSegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateSegmentKind::Dtm => "DTM",
            DateSegmentKind::G62 => "G62",
        }
    }
}

impl fmt::Display for DateSegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DateSegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DTM" => Ok(DateSegmentKind::Dtm),
            "G62" => Ok(DateSegmentKind::G62),
            other => Err(format!("Unknown date segment: {}", other)),
        }
    }
}

/// One qualifier/date pair lifted from a DTM or G62 segment. The original
/// fields keep the values as scanned so edits stay matchable against the
/// source document (and date offsets stay idempotent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub segment_type: DateSegmentKind,
    pub qualifier_id: String,
    pub date: String,
    pub original_qualifier_id: String,
    pub original_date: String,
}

impl DateEntry {
    pub fn new(segment_type: DateSegmentKind, qualifier_id: &str, date: &str) -> DateEntry {
        DateEntry {
            segment_type,
            qualifier_id: qualifier_id.to_string(),
            date: date.to_string(),
            original_qualifier_id: qualifier_id.to_string(),
            original_date: date.to_string(),
        }
    }

    /// Seed entry used when a scan finds no dates at all: a bare DTM carrying
    /// the given day as CCYYMMDD.
    pub fn default_for(today: NaiveDate) -> DateEntry {
        let date = today.format("%Y%m%d").to_string();
        DateEntry::new(DateSegmentKind::Dtm, "", &date)
    }

    /// Registry dedup key, `tag_qualifier_date` over the scanned values.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.segment_type, self.original_qualifier_id, self.original_date
        )
    }
}

/// Ordered, deduplicated collection of the date segments seen outside PO1
/// groups. First-occurrence order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRegistry {
    pub entries: Vec<DateEntry>,
}

impl DateRegistry {
    /// Registry holding only the default seed entry for the given day.
    pub fn with_default_entry(today: NaiveDate) -> DateRegistry {
        DateRegistry {
            entries: vec![DateEntry::default_for(today)],
        }
    }

    /// Register a scanned qualifier/date pair. Duplicate
    /// `tag_qualifier_date` keys are ignored; returns whether an entry was
    /// added.
    pub fn register(&mut self, segment_type: DateSegmentKind, qualifier: &str, date: &str) -> bool {
        let key = format!("{}_{}_{}", segment_type, qualifier, date);
        if self.entries.iter().any(|entry| entry.dedup_key() == key) {
            return false;
        }
        self.entries.push(DateEntry::new(segment_type, qualifier, date));
        true
    }

    /// First DTM entry whose original qualifier matches. DTM rewriting
    /// matches on qualifier alone.
    pub fn find_dtm(&self, original_qualifier: &str) -> Option<&DateEntry> {
        self.entries.iter().find(|entry| {
            entry.segment_type == DateSegmentKind::Dtm
                && entry.original_qualifier_id == original_qualifier
        })
    }

    /// First G62 entry matching qualifier and original date. G62 rewriting
    /// requires the three-way match.
    pub fn find_g62(&self, original_qualifier: &str, original_date: &str) -> Option<&DateEntry> {
        self.entries.iter().find(|entry| {
            entry.segment_type == DateSegmentKind::G62
                && entry.original_qualifier_id == original_qualifier
                && entry.original_date == original_date
        })
    }

    /// Apply a caller edit to the entry matching the original values.
    /// Returns false when no entry matches.
    pub fn apply_edit(
        &mut self,
        segment_type: DateSegmentKind,
        original_qualifier: &str,
        original_date: &str,
        qualifier_id: &str,
        date: &str,
    ) -> bool {
        let entry = self.entries.iter_mut().find(|entry| {
            entry.segment_type == segment_type
                && entry.original_qualifier_id == original_qualifier
                && entry.original_date == original_date
        });
        match entry {
            Some(entry) => {
                entry.qualifier_id = qualifier_id.to_string();
                entry.date = date.to_string();
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
