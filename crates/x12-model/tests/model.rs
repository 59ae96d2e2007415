//! Tests for x12-model types.

use x12_model::{
    DateRegistry, DateSegmentKind, Document, LineLayout, Po1Group, Segment, emitted_group_count,
    pad_isa_id,
};

#[test]
fn document_render_round_trips_segment_text() {
    let doc = Document::new(
        vec![
            Segment::parse("ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240115*1200*U*00501*000000001*0*P*>~"),
            Segment::parse("GS*PO*SENDER*RECEIVER*20240115*1200*1*X*005010~"),
            Segment::parse("ST*850*0001"),
            Segment::parse("SE*2*0001"),
        ],
        LineLayout::LinePerSegment,
    );
    let rendered = doc.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|line| line.ends_with('~')));
    assert!(lines[0].starts_with("ISA*00*"));
}

#[test]
fn registry_edit_keeps_original_values_for_matching() {
    let mut registry = DateRegistry::default();
    registry.register(DateSegmentKind::G62, "02", "20240115");
    registry.apply_edit(DateSegmentKind::G62, "02", "20240115", "04", "20240301");

    // Lookups still go through the scanned values.
    let entry = registry.find_g62("02", "20240115").expect("entry");
    assert_eq!(entry.qualifier_id, "04");
    assert_eq!(entry.date, "20240301");
    assert!(registry.find_g62("04", "20240301").is_none());
}

#[test]
fn selection_counts_follow_include_flags() {
    let mut groups = vec![
        Po1Group::new("PO1*1*10*EA*9.95"),
        Po1Group::new("PO1*2*5*CA*12.00"),
        Po1Group::new("PO1*3*1*EA*99.00"),
    ];
    assert_eq!(emitted_group_count(&groups), 3);

    groups[0].include = true;
    groups[2].include = true;
    assert_eq!(emitted_group_count(&groups), 2);
}

#[test]
fn isa_ids_pad_to_fixed_width() {
    for id in ["", "A", "EXACTLY15CHARSX", "LONGERTHANFIFTEENCHARS"] {
        assert_eq!(pad_isa_id(id).chars().count(), 15);
    }
    assert_eq!(pad_isa_id("EXACTLY15CHARSX"), "EXACTLY15CHARSX");
}
