//! Raw text to segments.
//!
//! Interchanges arrive in one of two physical layouts: wrapped (the whole
//! interchange on a single line, segments separated only by `~`) or
//! line-per-segment (CR/LF separated, each line optionally carrying a
//! trailing `~`). Layout detection is by presence of a newline anywhere in
//! the content, and the detected layout travels with the document so
//! regeneration can re-emit the same convention.

use x12_model::segment::{SEGMENT_TERMINATOR, strip_terminator};
use x12_model::{Document, LineLayout, Segment};

/// A document is wrapped when it contains no newline at all.
pub fn detect_layout(content: &str) -> LineLayout {
    if content.contains('\n') {
        LineLayout::LinePerSegment
    } else {
        LineLayout::Wrapped
    }
}

/// Split raw content into trimmed, terminator-stripped segments. Blank
/// pieces are discarded.
pub fn tokenize(content: &str) -> Document {
    let layout = detect_layout(content);
    let pieces: Vec<&str> = match layout {
        LineLayout::Wrapped => content.split(SEGMENT_TERMINATOR).collect(),
        LineLayout::LinePerSegment => content.lines().collect(),
    };
    let segments = pieces
        .into_iter()
        .map(strip_terminator)
        .filter(|piece| !piece.is_empty())
        .map(Segment::parse)
        .collect();
    Document::new(segments, layout)
}
