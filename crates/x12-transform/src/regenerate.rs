//! Single-document regeneration.
//!
//! One walk over the tokenized segments rewrites the envelope identity
//! fields, stamps a fresh control number into ISA13/GS06/ST02/SE02, applies
//! date-registry edits to DTM and G62 segments, honors the line-item
//! selection, and recomputes CTT and SE counters. Segment text the walk does
//! not touch passes through unchanged, and the output uses the same line
//! layout the input arrived in.

use chrono::NaiveDateTime;
use tracing::debug;

use x12_model::segment::{positions, tags};
use x12_model::{
    Document, EnvelopeHeader, EnvelopeOverrides, RegenerateOptions, RegeneratedDocument, Result,
    Segment, X12Error, any_included, emitted_group_count, ensure_terminated, first_non_empty,
    join_segments,
};

use crate::control::{control_number, epoch_millis};
use crate::filename::single_output_name;
use crate::rewrite::{rewrite_dtm, rewrite_g62, rewrite_gs, rewrite_isa};

/// Regenerate one document with the caller's selections and overrides.
///
/// Fails only when an included line item still carries uncommitted edited
/// text; malformed segments never fail, they default.
pub fn regenerate_document(
    document: &Document,
    original_name: &str,
    options: &RegenerateOptions,
    now: NaiveDateTime,
) -> Result<RegeneratedDocument> {
    check_committed(options)?;

    let control = control_number(epoch_millis(now), options.batch_index);
    let any_selected = any_included(&options.line_items);
    let group_total = emitted_group_count(&options.line_items);

    let mut lines: Vec<String> = Vec::new();
    let mut segment_count = 0usize;
    let mut in_transaction_set = false;
    let mut po1_index = 0usize;
    let mut line_items_emitted = 0usize;

    for segment in &document.segments {
        match segment.tag() {
            tags::ST => {
                in_transaction_set = true;
                // ST counts itself; everything after adds to it.
                segment_count = 1;
                let mut updated = segment.clone();
                updated.set_element(positions::ST_CONTROL_NUMBER, control.clone());
                lines.push(updated.render());
            }
            tags::PO1 => {
                if let Some(group) = options.line_items.get(po1_index) {
                    if !any_selected {
                        // Nothing selected: the whole document passes through
                        // with its original anchors and dependents.
                        lines.push(segment.render());
                        segment_count += 1;
                        for dependent in &group.dependent_segments {
                            lines.push(ensure_terminated(dependent));
                            segment_count += 1;
                        }
                        line_items_emitted += 1;
                    } else if group.include {
                        lines.push(ensure_terminated(&group.anchor_line));
                        segment_count += 1;
                        for dependent in &group.dependent_segments {
                            lines.push(ensure_terminated(dependent));
                            segment_count += 1;
                        }
                        line_items_emitted += 1;
                    } else {
                        debug!(group = po1_index + 1, "line item excluded");
                    }
                }
                po1_index += 1;
            }
            // Dependents only ever emit as part of their group above; a
            // stray top-level PO4/AMT is dropped in this mode.
            tags::PO4 | tags::AMT => {}
            _ => {
                let mut updated = segment.clone();
                match updated.tag() {
                    tags::ISA => rewrite_isa(
                        &mut updated,
                        &options.overrides,
                        Some(&options.envelope),
                        &control,
                    ),
                    tags::GS => rewrite_gs(
                        &mut updated,
                        &options.overrides,
                        Some(&options.envelope),
                        &control,
                    ),
                    tags::BEG => rewrite_beg(&mut updated, &options.envelope, &options.overrides),
                    tags::DTM => rewrite_dtm(&mut updated, &options.dates),
                    tags::G62 => rewrite_g62(&mut updated, &options.dates),
                    tags::CTT => {
                        updated.set_element(positions::CTT_LINE_ITEM_COUNT, group_total.to_string());
                    }
                    tags::SE => {
                        // SE counts itself too, so bump before assigning.
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
        control = %control,
        segments = lines.len(),
        line_items = line_items_emitted,
        "regenerated document"
    );

    Ok(RegeneratedDocument {
        file_name: single_output_name(original_name, now),
        content: join_segments(&lines, document.layout),
        control_number: control,
        segments_emitted: lines.len(),
        line_items_emitted,
    })
}

/// Included line items must not carry staged, uncommitted anchor edits.
fn check_committed(options: &RegenerateOptions) -> Result<()> {
    for (index, group) in options.line_items.iter().enumerate() {
        if group.include && group.has_pending_edit() {
            return Err(X12Error::UncommittedEdit {
                group_number: index + 1,
            });
        }
    }
    Ok(())
}

fn rewrite_beg(segment: &mut Segment, envelope: &EnvelopeHeader, overrides: &EnvelopeOverrides) {
    let po_number = first_non_empty(
        &[
            overrides.po_number.as_deref(),
            Some(envelope.po_number.as_str()),
            segment.element(positions::BEG_PO_NUMBER),
        ],
        "",
    )
    .to_string();
    let po_date = first_non_empty(
        &[
            overrides.po_date.as_deref(),
            Some(envelope.po_date.as_str()),
            segment.element(positions::BEG_PO_DATE),
        ],
        "",
    )
    .to_string();

    segment.set_element(positions::BEG_PO_NUMBER, po_number);
    segment.set_element(positions::BEG_PO_DATE, po_date);
}
