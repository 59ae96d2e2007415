//! Segment rewrite helpers shared by the two regeneration engines.
//!
//! Identity fields resolve through first-non-empty chains: caller override,
//! then the scanned envelope when the engine carries one (single-document
//! mode does, bulk mode does not), then the value already on the walked
//! segment, then the fixed default.

use x12_model::envelope::DEFAULT_ID_QUALIFIER;
use x12_model::segment::positions;
use x12_model::{DateRegistry, EnvelopeHeader, EnvelopeOverrides, Segment, first_non_empty, pad_isa_id};

pub(crate) fn rewrite_isa(
    segment: &mut Segment,
    overrides: &EnvelopeOverrides,
    parsed: Option<&EnvelopeHeader>,
    control: &str,
) {
    let sender_qualifier = first_non_empty(
        &[
            overrides.isa_sender_qualifier.as_deref(),
            parsed.map(|envelope| envelope.isa_sender_qualifier.as_str()),
            segment.element(positions::ISA_SENDER_QUALIFIER),
        ],
        DEFAULT_ID_QUALIFIER,
    )
    .to_string();
    let sender_id = first_non_empty(
        &[
            overrides.isa_sender_id.as_deref(),
            parsed.map(|envelope| envelope.isa_sender_id.as_str()),
            segment.element(positions::ISA_SENDER_ID),
        ],
        "",
    )
    .to_string();
    let receiver_qualifier = first_non_empty(
        &[
            overrides.isa_receiver_qualifier.as_deref(),
            parsed.map(|envelope| envelope.isa_receiver_qualifier.as_str()),
            segment.element(positions::ISA_RECEIVER_QUALIFIER),
        ],
        DEFAULT_ID_QUALIFIER,
    )
    .to_string();
    let receiver_id = first_non_empty(
        &[
            overrides.isa_receiver_id.as_deref(),
            parsed.map(|envelope| envelope.isa_receiver_id.as_str()),
            segment.element(positions::ISA_RECEIVER_ID),
        ],
        "",
    )
    .to_string();

    segment.set_element(positions::ISA_SENDER_QUALIFIER, sender_qualifier);
    segment.set_element(positions::ISA_SENDER_ID, pad_isa_id(&sender_id));
    segment.set_element(positions::ISA_RECEIVER_QUALIFIER, receiver_qualifier);
    segment.set_element(positions::ISA_RECEIVER_ID, pad_isa_id(&receiver_id));
    segment.set_element(positions::ISA_CONTROL_NUMBER, control);
}

pub(crate) fn rewrite_gs(
    segment: &mut Segment,
    overrides: &EnvelopeOverrides,
    parsed: Option<&EnvelopeHeader>,
    control: &str,
) {
    let sender = first_non_empty(
        &[
            overrides.gs_sender_id.as_deref(),
            parsed.map(|envelope| envelope.gs_sender_id.as_str()),
            segment.element(positions::GS_SENDER_ID),
        ],
        "",
    )
    .to_string();
    let receiver = first_non_empty(
        &[
            overrides.gs_receiver_id.as_deref(),
            parsed.map(|envelope| envelope.gs_receiver_id.as_str()),
            segment.element(positions::GS_RECEIVER_ID),
        ],
        "",
    )
    .to_string();

    segment.set_element(positions::GS_SENDER_ID, sender);
    segment.set_element(positions::GS_RECEIVER_ID, receiver);
    segment.set_element(positions::GS_CONTROL_NUMBER, control);
}

/// Rewrite a DTM from the registry entry whose original qualifier matches.
/// An entry edited down to an empty qualifier keeps the segment's own.
pub(crate) fn rewrite_dtm(segment: &mut Segment, dates: &DateRegistry) {
    let Some(original_qualifier) = segment.element_trimmed(positions::DATE_QUALIFIER) else {
        return;
    };
    let original_qualifier = original_qualifier.to_string();
    if let Some(entry) = dates.find_dtm(&original_qualifier) {
        let qualifier = if entry.qualifier_id.is_empty() {
            original_qualifier
        } else {
            entry.qualifier_id.clone()
        };
        let date = entry.date.clone();
        segment.set_element(positions::DATE_QUALIFIER, qualifier);
        segment.set_element(positions::DATE_VALUE, date);
    }
}

/// Rewrite a G62 from the registry entry matching both the original
/// qualifier and the original date. G62 qualifiers repeat within a
/// document, so the date participates in the match.
pub(crate) fn rewrite_g62(segment: &mut Segment, dates: &DateRegistry) {
    let (Some(original_qualifier), Some(original_date)) = (
        segment.element_trimmed(positions::DATE_QUALIFIER),
        segment.element_trimmed(positions::DATE_VALUE),
    ) else {
        return;
    };
    let original_qualifier = original_qualifier.to_string();
    if let Some(entry) = dates.find_g62(&original_qualifier, original_date) {
        let qualifier = if entry.qualifier_id.is_empty() {
            original_qualifier
        } else {
            entry.qualifier_id.clone()
        };
        let date = entry.date.clone();
        segment.set_element(positions::DATE_QUALIFIER, qualifier);
        segment.set_element(positions::DATE_VALUE, date);
    }
}

#[cfg(test)]
mod tests {
    use x12_model::DateSegmentKind;

    use super::*;

    #[test]
    fn isa_override_beats_parsed_and_walked() {
        let mut segment =
            Segment::parse("ISA*00*          *00*          *ZZ*OLD*ZZ*OLDRECV*240115*0905*U*00501*000000001*0*P*>");
        let overrides = EnvelopeOverrides {
            isa_sender_id: Some("NEWSEND".to_string()),
            ..EnvelopeOverrides::default()
        };
        let parsed = EnvelopeHeader {
            isa_sender_id: "PARSED".to_string(),
            isa_receiver_id: "PARSEDRECV".to_string(),
            ..EnvelopeHeader::default()
        };

        rewrite_isa(&mut segment, &overrides, Some(&parsed), "123456789");

        assert_eq!(segment.element(positions::ISA_SENDER_ID), Some("NEWSEND        "));
        assert_eq!(
            segment.element(positions::ISA_RECEIVER_ID),
            Some("PARSEDRECV     ")
        );
        assert_eq!(segment.element(positions::ISA_CONTROL_NUMBER), Some("123456789"));
    }

    #[test]
    fn isa_without_parsed_layer_falls_back_to_walked() {
        let mut segment =
            Segment::parse("ISA*00*          *00*          *01*WALKED*ZZ**240115*0905*U*00501*1*0*P*>");
        let overrides = EnvelopeOverrides::default();

        rewrite_isa(&mut segment, &overrides, None, "000000042");

        assert_eq!(segment.element(positions::ISA_SENDER_QUALIFIER), Some("01"));
        assert_eq!(segment.element(positions::ISA_SENDER_ID), Some("WALKED         "));
        assert_eq!(
            segment.element(positions::ISA_RECEIVER_ID),
            Some("               ")
        );
    }

    #[test]
    fn dtm_rewrite_keeps_qualifier_when_entry_qualifier_is_blank() {
        let mut dates = DateRegistry::default();
        dates.register(DateSegmentKind::Dtm, "002", "20240115");
        dates.entries[0].qualifier_id = String::new();
        dates.entries[0].date = "20240301".to_string();

        let mut segment = Segment::parse("DTM*002*20240115");
        rewrite_dtm(&mut segment, &dates);

        assert_eq!(segment.element(positions::DATE_QUALIFIER), Some("002"));
        assert_eq!(segment.element(positions::DATE_VALUE), Some("20240301"));
    }

    #[test]
    fn g62_rewrite_requires_matching_original_date() {
        let mut dates = DateRegistry::default();
        dates.register(DateSegmentKind::G62, "02", "20240115");
        dates.apply_edit(DateSegmentKind::G62, "02", "20240115", "02", "20240301");

        let mut matching = Segment::parse("G62*02*20240115");
        rewrite_g62(&mut matching, &dates);
        assert_eq!(matching.element(positions::DATE_VALUE), Some("20240301"));

        let mut other = Segment::parse("G62*02*20240120");
        rewrite_g62(&mut other, &dates);
        assert_eq!(other.element(positions::DATE_VALUE), Some("20240120"));
    }
}
