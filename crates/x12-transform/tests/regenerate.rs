//! Single-document regeneration against scanned fixtures.

use chrono::{NaiveDate, NaiveDateTime};
use insta::assert_snapshot;

use x12_model::segment::positions;
use x12_model::{EnvelopeOverrides, RegenerateOptions, X12Error};
use x12_parse::{scan_document, tokenize};
use x12_transform::regenerate_document;

const WRAPPED_850: &str = concat!(
    "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       ",
    "*240115*0905*U*00501*000000001*0*P*>~",
    "GS*PO*SENDER*RECEIVER*20240115*0905*000000001*X*005010~",
    "ST*850*0001~",
    "BEG*00*SA*PO123**20240101~",
    "REF*DP*038~",
    "DTM*002*20240120~",
    "PO1*1*10*EA*5*PP*VP*ITEM1~",
    "PO4*1*CA*25~",
    "AMT*TT*50~",
    "CTT*1~",
    "SE*8*0001~",
    "GE*1*000000001~",
    "IEA*1*000000001~",
);

const LINES_850: &str = "ISA*00*          *00*          *ZZ*ACME           *ZZ*DEPOT          *240110*1200*U*00501*000000100*0*P*>
GS*PO*ACME*DEPOT*20240110*1200*100*X*005010
ST*850*0100
BEG*00*SA*PO555**20240110
PO1*1*10*EA*5.00*PE*VP*ITEM1
PO4*1*CA*25
AMT*TT*50
PO1*2*4*EA*2.50*PE*VP*ITEM2
PO4*2*CA*10
CTT*2
SE*9*0100
GE*1*100
IEA*1*000000100";

/// 2024-01-15 09:05, epoch 1705309500000, so index 0 yields "309500000".
fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap()
}

fn scanned_options(content: &str) -> (x12_model::Document, RegenerateOptions) {
    let document = tokenize(content);
    let scan = scan_document(&document);
    let options = RegenerateOptions {
        envelope: scan.envelope,
        dates: scan.dates,
        line_items: scan.line_items,
        ..RegenerateOptions::default()
    };
    (document, options)
}

#[test]
fn sender_override_pads_and_control_numbers_align() {
    let (document, mut options) = scanned_options(WRAPPED_850);
    options.overrides.isa_sender_id = Some("NEWSEND".to_string());

    let output = regenerate_document(&document, "po850.txt", &options, fixed_now()).unwrap();

    assert_eq!(output.control_number, "309500000");
    assert_eq!(output.file_name, "edi_update_20240115_0905.txt");
    assert_eq!(output.segments_emitted, 13);
    assert_eq!(output.line_items_emitted, 1);

    let regenerated = tokenize(&output.content);
    let isa = &regenerated.segments[0];
    assert_eq!(isa.element(positions::ISA_SENDER_ID), Some("NEWSEND        "));
    assert_eq!(isa.element(positions::ISA_RECEIVER_ID), Some("RECEIVER       "));
    assert_eq!(isa.element(positions::ISA_CONTROL_NUMBER), Some("309500000"));
    assert_eq!(
        regenerated.segments[1].element(positions::GS_CONTROL_NUMBER),
        Some("309500000")
    );
    assert_eq!(
        regenerated.segments[2].element(positions::ST_CONTROL_NUMBER),
        Some("309500000")
    );
    let se = &regenerated.segments[10];
    assert_eq!(se.element(positions::SE_CONTROL_NUMBER), Some("309500000"));
    assert_eq!(se.element(positions::SE_SEGMENT_COUNT), Some("9"));

    assert_snapshot!(output.content, @"ISA*00*          *00*          *ZZ*NEWSEND        *ZZ*RECEIVER       *240115*0905*U*00501*309500000*0*P*>~GS*PO*SENDER*RECEIVER*20240115*0905*309500000*X*005010~ST*850*309500000~BEG*00*SA*PO123**20240101~REF*DP*038~DTM*002*20240120~PO1*1*10*EA*5*PP*VP*ITEM1~PO4*1*CA*25~AMT*TT*50~CTT*1~SE*9*309500000~GE*1*000000001~IEA*1*000000001~");
}

#[test]
fn selection_emits_only_included_groups_and_recounts() {
    let (document, mut options) = scanned_options(LINES_850);
    options.line_items[1].include = true;
    options.line_items[1].stage_edit("PO1*2*8*EA*2.50*PE*VP*ITEM2");
    options.line_items[1].commit_edit();

    let output = regenerate_document(&document, "orders.edi", &options, fixed_now()).unwrap();

    assert!(output.content.contains('\n'));
    assert!(output.content.contains("PO1*2*8*EA*2.50*PE*VP*ITEM2~"));
    assert!(output.content.contains("PO4*2*CA*10~"));
    assert!(!output.content.contains("ITEM1"));
    assert!(output.content.contains("CTT*1~"));
    assert!(output.content.contains("SE*6*309500000~"));
    assert_eq!(output.line_items_emitted, 1);
}

#[test]
fn no_selection_passes_every_group_through() {
    let (document, options) = scanned_options(LINES_850);

    let output = regenerate_document(&document, "orders.edi", &options, fixed_now()).unwrap();

    assert!(output.content.contains("PO1*1*10*EA*5.00*PE*VP*ITEM1~"));
    assert!(output.content.contains("PO1*2*4*EA*2.50*PE*VP*ITEM2~"));
    assert!(output.content.contains("CTT*2~"));
    assert!(output.content.contains("SE*9*309500000~"));
    assert_eq!(output.line_items_emitted, 2);
}

#[test]
fn included_group_with_uncommitted_edit_is_refused() {
    let (document, mut options) = scanned_options(LINES_850);
    options.line_items[1].include = true;
    options.line_items[1].stage_edit("PO1*2*999*EA*2.50*PE*VP*ITEM2");

    let err = regenerate_document(&document, "orders.edi", &options, fixed_now()).unwrap_err();
    assert!(matches!(err, X12Error::UncommittedEdit { group_number: 2 }));
}

#[test]
fn registry_edits_rewrite_matching_date_segments() {
    let content = concat!(
        "ST*850*0001~",
        "BEG*00*SA*PO9**20240101~",
        "DTM*002*20240120~",
        "G62*02*20240120~",
        "CTT*0~",
        "SE*6*0001~",
    );
    let (document, mut options) = scanned_options(content);
    assert!(options.dates.apply_edit(
        x12_model::DateSegmentKind::Dtm,
        "002",
        "20240120",
        "002",
        "20240301",
    ));
    assert!(options.dates.apply_edit(
        x12_model::DateSegmentKind::G62,
        "02",
        "20240120",
        "02",
        "20240315",
    ));

    let output = regenerate_document(&document, "dates.txt", &options, fixed_now()).unwrap();

    assert!(output.content.contains("DTM*002*20240301~"));
    assert!(output.content.contains("G62*02*20240315~"));
}

#[test]
fn po_number_and_date_overrides_rewrite_beg_without_suffix() {
    let (document, mut options) = scanned_options(WRAPPED_850);
    options.overrides = EnvelopeOverrides::default()
        .with_po_number("NEWPO")
        .with_po_date("20240601");

    let output = regenerate_document(&document, "po850.txt", &options, fixed_now()).unwrap();

    assert!(output.content.contains("BEG*00*SA*NEWPO**20240601~"));
    assert!(!output.content.contains("NEWPOT"));
}

#[test]
fn batch_index_separates_control_numbers() {
    let (document, options) = scanned_options(WRAPPED_850);
    let first = regenerate_document(&document, "a.txt", &options, fixed_now()).unwrap();

    let mut indexed = options.clone();
    indexed.batch_index = 1;
    let second = regenerate_document(&document, "a.txt", &indexed, fixed_now()).unwrap();

    assert_eq!(first.control_number, "309500000");
    assert_eq!(second.control_number, "309500001");
}
