//! Single-pass document scan.
//!
//! One walk over the segments collects four things: the envelope identity
//! fields (last occurrence wins), the date registry (DTM/G62 outside line
//! item groups, deduplicated), the PO1 line-item groups with their adjacent
//! dependents, and the set of transaction-set codes.

use serde::Serialize;
use tracing::debug;

use x12_model::envelope::{DEFAULT_ID_QUALIFIER, DEFAULT_ISA_VERSION, DEFAULT_USAGE_INDICATOR};
use x12_model::segment::{positions, tags};
use x12_model::{
    DateRegistry, DateSegmentKind, Document, EnvelopeHeader, Po1Group, Segment,
    TransactionSetRegistry,
};

/// Everything a scan extracts from one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentScan {
    pub envelope: EnvelopeHeader,
    pub dates: DateRegistry,
    pub line_items: Vec<Po1Group>,
    pub transaction_sets: TransactionSetRegistry,
}

/// Dependent slot of the currently open PO1 group. A PO4 may only fill the
/// slot directly after the PO1, an AMT only directly after that PO4; any
/// other segment closes the slot while the group itself stays open until the
/// next PO1 or end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DependentSlot {
    ExpectPo4,
    ExpectAmt,
    Closed,
}

#[derive(Debug)]
struct OpenGroup {
    group: Po1Group,
    slot: DependentSlot,
}

impl OpenGroup {
    fn new(anchor: &Segment) -> OpenGroup {
        OpenGroup {
            group: Po1Group::new(anchor.body()),
            slot: DependentSlot::ExpectPo4,
        }
    }
}

/// Scan a tokenized document. Never fails: malformed segments contribute
/// defaults instead of errors.
pub fn scan_document(document: &Document) -> DocumentScan {
    let mut scan = DocumentScan::default();
    let mut open: Option<OpenGroup> = None;

    for segment in &document.segments {
        let slot = open.as_ref().map(|current| current.slot);
        match segment.tag() {
            tags::PO1 => {
                if let Some(finished) = open.take() {
                    scan.line_items.push(finished.group);
                }
                open = Some(OpenGroup::new(segment));
            }
            tags::PO4 if slot == Some(DependentSlot::ExpectPo4) => {
                if let Some(current) = open.as_mut() {
                    current.group.dependent_segments.push(segment.body());
                    current.slot = DependentSlot::ExpectAmt;
                }
            }
            tags::AMT if slot == Some(DependentSlot::ExpectAmt) => {
                if let Some(current) = open.as_mut() {
                    current.group.dependent_segments.push(segment.body());
                    current.slot = DependentSlot::Closed;
                }
            }
            _ => {
                // Anything else breaks dependent adjacency but leaves the
                // group open, so dates inside the group are still skipped.
                if let Some(current) = open.as_mut() {
                    current.slot = DependentSlot::Closed;
                }
                scan_plain_segment(&mut scan, segment, open.is_none());
            }
        }
    }

    if let Some(finished) = open.take() {
        scan.line_items.push(finished.group);
    }

    debug!(
        line_items = scan.line_items.len(),
        dates = scan.dates.len(),
        transaction_sets = %scan.transaction_sets.label(),
        "scanned document"
    );
    scan
}

fn scan_plain_segment(scan: &mut DocumentScan, segment: &Segment, outside_group: bool) {
    match segment.tag() {
        tags::ISA => {
            let envelope = &mut scan.envelope;
            envelope.isa_sender_qualifier = segment
                .element_nonempty(positions::ISA_SENDER_QUALIFIER)
                .unwrap_or(DEFAULT_ID_QUALIFIER)
                .to_string();
            envelope.isa_sender_id = segment
                .element_nonempty(positions::ISA_SENDER_ID)
                .unwrap_or_default()
                .to_string();
            envelope.isa_receiver_qualifier = segment
                .element_nonempty(positions::ISA_RECEIVER_QUALIFIER)
                .unwrap_or(DEFAULT_ID_QUALIFIER)
                .to_string();
            envelope.isa_receiver_id = segment
                .element_nonempty(positions::ISA_RECEIVER_ID)
                .unwrap_or_default()
                .to_string();
            envelope.usage_indicator = segment
                .element_nonempty(positions::ISA_USAGE_INDICATOR)
                .unwrap_or(DEFAULT_USAGE_INDICATOR)
                .to_string();
            envelope.isa_version = segment
                .element_nonempty(positions::ISA_VERSION)
                .unwrap_or(DEFAULT_ISA_VERSION)
                .to_string();
            envelope.isa_control_number = segment
                .element_nonempty(positions::ISA_CONTROL_NUMBER)
                .unwrap_or_default()
                .to_string();
        }
        tags::GS => {
            scan.envelope.gs_sender_id = segment
                .element_nonempty(positions::GS_SENDER_ID)
                .unwrap_or_default()
                .to_string();
            scan.envelope.gs_receiver_id = segment
                .element_nonempty(positions::GS_RECEIVER_ID)
                .unwrap_or_default()
                .to_string();
            scan.envelope.gs_control_number = segment
                .element_nonempty(positions::GS_CONTROL_NUMBER)
                .unwrap_or_default()
                .to_string();
        }
        tags::ST => {
            if let Some(code) = segment.element(positions::ST_IDENTIFIER) {
                scan.transaction_sets.register(code);
            }
            scan.envelope.st_control_number = segment
                .element_nonempty(positions::ST_CONTROL_NUMBER)
                .unwrap_or_default()
                .to_string();
        }
        tags::BEG => {
            scan.envelope.po_number = segment
                .element_nonempty(positions::BEG_PO_NUMBER)
                .unwrap_or_default()
                .to_string();
            scan.envelope.po_date = segment
                .element_nonempty(positions::BEG_PO_DATE)
                .unwrap_or_default()
                .to_string();
        }
        tags::DTM | tags::G62 => {
            if outside_group && segment.has_element(positions::DATE_VALUE) {
                let kind = if segment.tag() == tags::DTM {
                    DateSegmentKind::Dtm
                } else {
                    DateSegmentKind::G62
                };
                let qualifier = segment
                    .element_trimmed(positions::DATE_QUALIFIER)
                    .unwrap_or_default();
                let date = segment
                    .element_trimmed(positions::DATE_VALUE)
                    .unwrap_or_default();
                scan.dates.register(kind, qualifier, date);
            }
        }
        _ => {}
    }
}
