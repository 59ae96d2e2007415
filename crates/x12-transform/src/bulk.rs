//! Bulk regeneration.
//!
//! Every document in the batch is rewritten independently with its own
//! control number, keyed by its position in the batch. Bulk mode offers no
//! line-item filtering: PO1 groups and their dependents pass straight
//! through, and CTT reports the document's total PO1 count. Identity fields
//! resolve from the shared overrides straight to the walked segment value,
//! never from another document in the batch, so results do not depend on
//! processing order.

use chrono::NaiveDateTime;
use tracing::{debug, info_span};

use x12_model::segment::{positions, tags};
use x12_model::{
    BulkOptions, Document, EnvelopeOverrides, RegeneratedDocument, Result, Segment, X12Error,
    first_non_empty, join_segments,
};

use crate::control::{control_number, epoch_millis};
use crate::filename::bulk_output_name;
use crate::rewrite::{rewrite_dtm, rewrite_gs, rewrite_isa};

/// One batch member: the name the output derives from plus its tokenized
/// content.
#[derive(Debug, Clone)]
pub struct BatchDocument {
    pub file_name: String,
    pub document: Document,
}

impl BatchDocument {
    pub fn new(file_name: impl Into<String>, document: Document) -> BatchDocument {
        BatchDocument {
            file_name: file_name.into(),
            document,
        }
    }
}

/// Regenerate every document in the batch with shared overrides and a
/// shared date registry.
pub fn regenerate_batch(
    documents: &[BatchDocument],
    options: &BulkOptions,
    now: NaiveDateTime,
) -> Result<Vec<RegeneratedDocument>> {
    if documents.is_empty() {
        return Err(X12Error::NoDocuments);
    }

    let span = info_span!("regenerate_batch", documents = documents.len());
    let _guard = span.enter();

    let epoch = epoch_millis(now);
    let mut outputs = Vec::with_capacity(documents.len());
    for (index, batch_document) in documents.iter().enumerate() {
        outputs.push(regenerate_one(batch_document, options, index, epoch, now));
    }
    Ok(outputs)
}

fn regenerate_one(
    batch_document: &BatchDocument,
    options: &BulkOptions,
    index: usize,
    epoch: u64,
    now: NaiveDateTime,
) -> RegeneratedDocument {
    let control = control_number(epoch, index);
    let document = &batch_document.document;

    let mut lines: Vec<String> = Vec::new();
    let mut segment_count = 0usize;
    let mut in_transaction_set = false;
    let mut po1_count = 0usize;

    for segment in &document.segments {
        match segment.tag() {
            tags::ST => {
                in_transaction_set = true;
                segment_count = 1;
                let mut updated = segment.clone();
                updated.set_element(positions::ST_CONTROL_NUMBER, control.clone());
                lines.push(updated.render());
            }
            tags::PO1 => {
                po1_count += 1;
                lines.push(segment.render());
                segment_count += 1;
            }
            tags::PO4 | tags::AMT => {
                lines.push(segment.render());
                segment_count += 1;
            }
            _ => {
                let mut updated = segment.clone();
                match updated.tag() {
                    tags::ISA => rewrite_isa(&mut updated, &options.overrides, None, &control),
                    tags::GS => rewrite_gs(&mut updated, &options.overrides, None, &control),
                    tags::BEG => rewrite_beg(&mut updated, &options.overrides, index),
                    tags::DTM => rewrite_dtm(&mut updated, &options.dates),
                    // G62 dates are left alone in bulk mode; only the
                    // single-document engine rewrites them.
                    tags::CTT => {
                        updated.set_element(positions::CTT_LINE_ITEM_COUNT, po1_count.to_string());
                    }
                    tags::SE => {
                        segment_count += 1;
                        updated.set_element(positions::SE_SEGMENT_COUNT, segment_count.to_string());
                        updated.set_element(positions::SE_CONTROL_NUMBER, control.clone());
                    }
                    _ => {}
                }
                let is_se = updated.tag() == tags::SE;
                lines.push(updated.render());
                if in_transaction_set && !is_se {
                    segment_count += 1;
                }
            }
        }
    }

    debug!(
        index,
        control = %control,
        line_items = po1_count,
        "regenerated batch document"
    );

    RegeneratedDocument {
        file_name: bulk_output_name(&batch_document.file_name, now),
        content: join_segments(&lines, document.layout),
        control_number: control,
        segments_emitted: lines.len(),
        line_items_emitted: po1_count,
    }
}

/// A shared PO number gets a per-document suffix so batch outputs stay
/// distinguishable; without one the document keeps its own PO number.
fn rewrite_beg(segment: &mut Segment, overrides: &EnvelopeOverrides, index: usize) {
    let shared_po = overrides
        .po_number
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let po_number = match shared_po {
        Some(shared) => format!("{shared}T{}", index + 1),
        None => segment
            .element_trimmed(positions::BEG_PO_NUMBER)
            .unwrap_or("")
            .to_string(),
    };
    let po_date = first_non_empty(
        &[
            overrides.po_date.as_deref(),
            segment.element(positions::BEG_PO_DATE),
        ],
        "",
    )
    .to_string();

    segment.set_element(positions::BEG_PO_NUMBER, po_number);
    segment.set_element(positions::BEG_PO_DATE, po_date);
}
