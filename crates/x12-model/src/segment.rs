use std::fmt;

use serde::{Deserialize, Serialize};

/// The X12 data element separator. Delimiter discovery from ISA16 is out of
/// scope; the separator is fixed.
pub const ELEMENT_SEPARATOR: char = '*';

/// The X12 segment terminator.
pub const SEGMENT_TERMINATOR: char = '~';

/// Segment tags handled by the scanner and the regeneration engines.
pub mod tags {
    /// Interchange control header.
    pub const ISA: &str = "ISA";
    /// Functional group header.
    pub const GS: &str = "GS";
    /// Transaction set header.
    pub const ST: &str = "ST";
    /// Beginning segment for purchase order (850).
    pub const BEG: &str = "BEG";
    /// Date/time reference (850).
    pub const DTM: &str = "DTM";
    /// Date/time (875).
    pub const G62: &str = "G62";
    /// Baseline item data.
    pub const PO1: &str = "PO1";
    /// Item physical details, dependent of PO1.
    pub const PO4: &str = "PO4";
    /// Monetary amount, dependent of PO4.
    pub const AMT: &str = "AMT";
    /// Transaction totals.
    pub const CTT: &str = "CTT";
    /// Transaction set trailer.
    pub const SE: &str = "SE";
    /// Functional group trailer.
    pub const GE: &str = "GE";
    /// Interchange control trailer.
    pub const IEA: &str = "IEA";
}

/// Fixed element positions, 1-indexed after the tag. These never shift:
/// handlers read and write these positions regardless of how many elements a
/// malformed segment actually carries.
pub mod positions {
    /// ISA05: interchange sender ID qualifier.
    pub const ISA_SENDER_QUALIFIER: usize = 5;
    /// ISA06: interchange sender ID (fixed 15 characters).
    pub const ISA_SENDER_ID: usize = 6;
    /// ISA07: interchange receiver ID qualifier.
    pub const ISA_RECEIVER_QUALIFIER: usize = 7;
    /// ISA08: interchange receiver ID (fixed 15 characters).
    pub const ISA_RECEIVER_ID: usize = 8;
    /// ISA11: usage indicator.
    pub const ISA_USAGE_INDICATOR: usize = 11;
    /// ISA12: interchange control version number.
    pub const ISA_VERSION: usize = 12;
    /// ISA13: interchange control number.
    pub const ISA_CONTROL_NUMBER: usize = 13;

    /// GS02: application sender's code.
    pub const GS_SENDER_ID: usize = 2;
    /// GS03: application receiver's code.
    pub const GS_RECEIVER_ID: usize = 3;
    /// GS06: group control number.
    pub const GS_CONTROL_NUMBER: usize = 6;

    /// ST01: transaction set identifier code (850, 875, ...).
    pub const ST_IDENTIFIER: usize = 1;
    /// ST02: transaction set control number.
    pub const ST_CONTROL_NUMBER: usize = 2;

    /// BEG03: purchase order number.
    pub const BEG_PO_NUMBER: usize = 3;
    /// BEG05: purchase order date (CCYYMMDD).
    pub const BEG_PO_DATE: usize = 5;

    /// DTM01 / G6201: date qualifier.
    pub const DATE_QUALIFIER: usize = 1;
    /// DTM02 / G6202: date value.
    pub const DATE_VALUE: usize = 2;

    /// CTT01: number of line items.
    pub const CTT_LINE_ITEM_COUNT: usize = 1;

    /// SE01: number of included segments, ST through SE inclusive.
    pub const SE_SEGMENT_COUNT: usize = 1;
    /// SE02: transaction set control number.
    pub const SE_CONTROL_NUMBER: usize = 2;
}

/// One X12 segment: a tag followed by `*`-separated data elements.
///
/// Internally the tag is part position 0, so the 1-indexed element positions
/// in [`positions`] map directly onto part indices. Missing elements read as
/// absent and writes past the end extend the segment with empty elements
/// rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    parts: Vec<String>,
}

impl Segment {
    /// Parse a single segment line. The line is trimmed and at most one
    /// trailing terminator is stripped before splitting on `*`.
    pub fn parse(line: &str) -> Segment {
        let body = strip_terminator(line);
        Segment {
            parts: body.split(ELEMENT_SEPARATOR).map(str::to_string).collect(),
        }
    }

    /// Build a segment from a tag and element values, mainly for tests.
    pub fn from_parts<I, S>(tag: &str, elements: I) -> Segment
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts = vec![tag.to_string()];
        parts.extend(elements.into_iter().map(Into::into));
        Segment { parts }
    }

    /// The segment tag (part 0). Empty for a degenerate blank segment.
    pub fn tag(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }

    /// Raw element at a 1-indexed position, if present.
    pub fn element(&self, position: usize) -> Option<&str> {
        self.parts.get(position).map(String::as_str)
    }

    /// Trimmed element at a 1-indexed position, if present.
    pub fn element_trimmed(&self, position: usize) -> Option<&str> {
        self.element(position).map(str::trim)
    }

    /// Trimmed element, or `None` when the position is missing or blank.
    pub fn element_nonempty(&self, position: usize) -> Option<&str> {
        self.element_trimmed(position).filter(|value| !value.is_empty())
    }

    /// True when the 1-indexed position exists, regardless of content.
    pub fn has_element(&self, position: usize) -> bool {
        position < self.parts.len()
    }

    /// Overwrite the element at a 1-indexed position, extending the segment
    /// with empty elements when the position is past the current end.
    pub fn set_element(&mut self, position: usize, value: impl Into<String>) {
        if position >= self.parts.len() {
            self.parts.resize(position + 1, String::new());
        }
        self.parts[position] = value.into();
    }

    /// Number of parts including the tag.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// The segment text without a terminator, as stored in line-item groups.
    pub fn body(&self) -> String {
        self.parts.join("*")
    }

    /// Render the segment with exactly one trailing terminator.
    pub fn render(&self) -> String {
        let mut line = self.body();
        line.push(SEGMENT_TERMINATOR);
        line
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Trim a line and strip at most one trailing terminator.
pub fn strip_terminator(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_suffix(SEGMENT_TERMINATOR).unwrap_or(trimmed)
}

/// Normalize a segment line to carry exactly one trailing terminator.
/// Applying this twice yields the same output as applying it once.
pub fn ensure_terminated(line: &str) -> String {
    let mut normalized = strip_terminator(line).to_string();
    normalized.push(SEGMENT_TERMINATOR);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_element_separator() {
        let seg = Segment::parse("BEG*00*SA*PO123**20240115~");
        assert_eq!(seg.tag(), "BEG");
        assert_eq!(seg.element(positions::BEG_PO_NUMBER), Some("PO123"));
        assert_eq!(seg.element(4), Some(""));
        assert_eq!(seg.element(positions::BEG_PO_DATE), Some("20240115"));
        assert_eq!(seg.element(6), None);
    }

    #[test]
    fn set_element_extends_short_segments() {
        let mut seg = Segment::parse("ISA*00");
        seg.set_element(positions::ISA_CONTROL_NUMBER, "000000001");
        assert_eq!(seg.render(), "ISA*00************000000001~");
    }

    #[test]
    fn render_appends_exactly_one_terminator() {
        assert_eq!(Segment::parse("SE*6*0001").render(), "SE*6*0001~");
        assert_eq!(Segment::parse("SE*6*0001~").render(), "SE*6*0001~");
    }

    #[test]
    fn ensure_terminated_is_idempotent() {
        let once = ensure_terminated("  GE*1*0001~  ");
        assert_eq!(once, "GE*1*0001~");
        assert_eq!(ensure_terminated(&once), once);
    }

    #[test]
    fn element_nonempty_filters_blanks() {
        let seg = Segment::parse("GS*PO* *RECV");
        assert_eq!(seg.element_nonempty(positions::GS_SENDER_ID), None);
        assert_eq!(seg.element_nonempty(positions::GS_RECEIVER_ID), Some("RECV"));
    }
}
