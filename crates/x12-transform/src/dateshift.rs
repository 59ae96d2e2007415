//! Date arithmetic over EDI date elements.
//!
//! Dates travel as bare digit strings in two widths: CCYYMMDD and YYMMDD,
//! where two-digit years always mean 2000-2099. A shifted date keeps the
//! width it arrived in. Values that do not parse as a real calendar date
//! pass through unchanged; there is no month rollover.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use x12_model::segment::{positions, tags};
use x12_model::{DateRegistry, Document};

/// Add `days` to an EDI date value, preserving its width.
///
/// Returns `None` when the value is not a valid CCYYMMDD or YYMMDD date or
/// the shift leaves the supported range; callers keep the original text in
/// that case.
pub fn shift_date_value(value: &str, days: i64) -> Option<String> {
    let (date, width) = parse_edi_date(value)?;
    let shifted = date.checked_add_signed(Duration::days(days))?;
    Some(format_edi_date(shifted, width))
}

/// Shift every DTM and G62 date in the document by `days`, leaving all other
/// segments and any unparseable date values untouched.
pub fn shift_document_dates(document: &Document, days: i64) -> Document {
    let mut shifted = 0usize;
    let segments = document
        .segments
        .iter()
        .map(|segment| {
            let tag = segment.tag();
            if tag != tags::DTM && tag != tags::G62 {
                return segment.clone();
            }
            let Some(value) = segment.element(positions::DATE_VALUE) else {
                return segment.clone();
            };
            match shift_date_value(value, days) {
                Some(new_date) => {
                    let mut updated = segment.clone();
                    updated.set_element(positions::DATE_VALUE, new_date);
                    shifted += 1;
                    updated
                }
                None => segment.clone(),
            }
        })
        .collect();
    debug!(days, shifted, "shifted document dates");
    Document {
        segments,
        layout: document.layout,
    }
}

/// Set every registry entry's date to its original date plus `total_days`.
///
/// The shift always starts from the scanned original, so repeated calls with
/// a running total land on the same dates as one call with that total.
/// Entries whose original does not parse keep their current date.
pub fn apply_registry_offset(registry: &mut DateRegistry, total_days: i64) {
    for entry in &mut registry.entries {
        let base = if entry.original_date.is_empty() {
            entry.date.clone()
        } else {
            entry.original_date.clone()
        };
        if let Some(new_date) = shift_date_value(&base, total_days) {
            entry.date = new_date;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateWidth {
    Six,
    Eight,
}

fn parse_edi_date(value: &str) -> Option<(NaiveDate, DateWidth)> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match value.len() {
        8 => {
            let year: i32 = value[0..4].parse().ok()?;
            let month: u32 = value[4..6].parse().ok()?;
            let day: u32 = value[6..8].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, DateWidth::Eight))
        }
        6 => {
            let year: i32 = value[0..2].parse().ok()?;
            let month: u32 = value[2..4].parse().ok()?;
            let day: u32 = value[4..6].parse().ok()?;
            NaiveDate::from_ymd_opt(2000 + year, month, day).map(|date| (date, DateWidth::Six))
        }
        _ => None,
    }
}

fn format_edi_date(date: NaiveDate, width: DateWidth) -> String {
    match width {
        DateWidth::Eight => date.format("%Y%m%d").to_string(),
        DateWidth::Six => format!(
            "{:02}{:02}{:02}",
            date.year().rem_euclid(100),
            date.month(),
            date.day()
        ),
    }
}

#[cfg(test)]
mod tests {
    use x12_model::{DateSegmentKind, LineLayout, Segment};

    use super::*;

    #[test]
    fn shifts_eight_digit_dates_across_boundaries() {
        assert_eq!(shift_date_value("20240115", 17).unwrap(), "20240201");
        assert_eq!(shift_date_value("20231231", 1).unwrap(), "20240101");
        assert_eq!(shift_date_value("20240228", 1).unwrap(), "20240229");
        assert_eq!(shift_date_value("20230228", 1).unwrap(), "20230301");
        assert_eq!(shift_date_value("20240101", -1).unwrap(), "20231231");
    }

    #[test]
    fn shifts_six_digit_dates_in_the_2000s() {
        assert_eq!(shift_date_value("240115", 17).unwrap(), "240201");
        assert_eq!(shift_date_value("231231", 1).unwrap(), "240101");
        // Width survives even when the century wraps.
        assert_eq!(shift_date_value("991231", 1).unwrap(), "000101");
    }

    #[test]
    fn rejects_values_that_are_not_real_dates() {
        assert_eq!(shift_date_value("20240230", 1), None);
        assert_eq!(shift_date_value("20241301", 1), None);
        assert_eq!(shift_date_value("2024011", 1), None);
        assert_eq!(shift_date_value("ABCD0115", 1), None);
        assert_eq!(shift_date_value("2024-01-15", 1), None);
        assert_eq!(shift_date_value("", 1), None);
    }

    #[test]
    fn zero_shift_is_identity_for_valid_dates() {
        assert_eq!(shift_date_value("20240229", 0).unwrap(), "20240229");
        assert_eq!(shift_date_value("240229", 0).unwrap(), "240229");
    }

    #[test]
    fn document_shift_touches_every_date_segment() {
        let segments = vec![
            Segment::parse("BEG*00*SA*PO1**20240110"),
            Segment::parse("DTM*002*20240115"),
            Segment::parse("PO1*1*10*EA*9.95"),
            Segment::parse("G62*02*240120"),
            Segment::parse("DTM*010"),
        ];
        let document = Document::new(segments, LineLayout::LinePerSegment);
        let shifted = shift_document_dates(&document, 5);

        // BEG05 is not a date segment and stays put.
        assert_eq!(
            shifted.segments[0].element(positions::BEG_PO_DATE),
            Some("20240110")
        );
        assert_eq!(
            shifted.segments[1].element(positions::DATE_VALUE),
            Some("20240120")
        );
        assert_eq!(
            shifted.segments[3].element(positions::DATE_VALUE),
            Some("240125")
        );
        // No date element, nothing to shift.
        assert_eq!(shifted.segments[4].render(), "DTM*010~");
    }

    #[test]
    fn registry_offset_recomputes_from_originals() {
        let mut registry = DateRegistry::default();
        registry.register(DateSegmentKind::Dtm, "002", "20240115");
        registry.register(DateSegmentKind::G62, "02", "junk");

        apply_registry_offset(&mut registry, 5);
        assert_eq!(registry.entries[0].date, "20240120");
        assert_eq!(registry.entries[1].date, "junk");

        // A second call with the running total starts from the original
        // again rather than compounding.
        apply_registry_offset(&mut registry, 7);
        assert_eq!(registry.entries[0].date, "20240122");
        assert_eq!(registry.entries[0].original_date, "20240115");
    }
}
