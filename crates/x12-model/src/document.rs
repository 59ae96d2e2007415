use std::fmt;

use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Physical layout of an interchange file. Some trading partners send the
/// whole interchange on one line with segments separated only by `~`
/// (wrapped); others put one segment per line. Regenerated output must use
/// the same convention the input used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineLayout {
    /// Entire interchange on a single physical line.
    Wrapped,
    /// One segment per line, each with a trailing terminator.
    LinePerSegment,
}

impl LineLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineLayout::Wrapped => "wrapped",
            LineLayout::LinePerSegment => "line-per-segment",
        }
    }
}

impl fmt::Display for LineLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tokenized interchange: ordered segments plus the layout they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub segments: Vec<Segment>,
    pub layout: LineLayout,
}

impl Document {
    pub fn new(segments: Vec<Segment>, layout: LineLayout) -> Document {
        Document { segments, layout }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Render all segments using this document's layout convention.
    pub fn render(&self) -> String {
        let lines: Vec<String> = self.segments.iter().map(Segment::render).collect();
        join_segments(&lines, self.layout)
    }
}

/// Join already-terminated segment lines according to a layout: wrapped
/// output concatenates directly (the terminators separate segments),
/// line-per-segment output joins with newlines.
pub fn join_segments(lines: &[String], layout: LineLayout) -> String {
    match layout {
        LineLayout::Wrapped => lines.concat(),
        LineLayout::LinePerSegment => lines.join("\n"),
    }
}
