//! Bulk regeneration across a batch of documents.

use chrono::{NaiveDate, NaiveDateTime};

use x12_model::segment::positions;
use x12_model::{BulkOptions, DateRegistry, DateSegmentKind, EnvelopeOverrides, X12Error};
use x12_parse::tokenize;
use x12_transform::{BatchDocument, regenerate_batch};

const ORDER_A: &str = concat!(
    "ISA*00*          *00*          *ZZ*VENDORA        *ZZ*RETAIL         ",
    "*240115*0905*U*00501*000000011*0*P*>~",
    "GS*PO*VENDORA*RETAIL*20240115*0905*11*X*005010~",
    "ST*850*0011~",
    "BEG*00*SA*POA**20240105~",
    "DTM*002*20240110~",
    "PO1*1*10*EA*5*PP*VP*A1~",
    "PO4*1*CA*25~",
    "AMT*TT*50~",
    "PO1*2*3*EA*9*PP*VP*A2~",
    "CTT*5~",
    "SE*10*0011~",
    "GE*1*11~",
    "IEA*1*000000011~",
);

const ORDER_B: &str = "ST*850*0033~BEG*00*SA*POB**20240106~PO1*1*5*EA*2*PP*VP*B1~CTT*1~SE*5*0033~";

const GROCERY_875: &str = "ISA*00*          *00*          *ZZ*VENDORB        *ZZ*GROCER         *240115*0905*U*00501*000000022*0*P*>
GS*OG*VENDORB*GROCER*20240115*0905*22*X*005010
ST*875*0022
G50*N*20240110*PO-B
G62*02*20240110
PO1*1*12*CA*7.25*PE*UK*B1
SE*6*0022
GE*1*22
IEA*1*000000022";

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap()
}

fn batch_of(inputs: &[(&str, &str)]) -> Vec<BatchDocument> {
    inputs
        .iter()
        .map(|(name, content)| BatchDocument::new(*name, tokenize(content)))
        .collect()
}

#[test]
fn shared_po_number_gets_per_document_suffix() {
    let documents = batch_of(&[("orderA.txt", ORDER_A), ("orderB.txt", ORDER_B)]);
    let options = BulkOptions {
        overrides: EnvelopeOverrides::default().with_po_number("SHARED"),
        ..BulkOptions::default()
    };

    let outputs = regenerate_batch(&documents, &options, fixed_now()).unwrap();

    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].content.contains("BEG*00*SA*SHAREDT1**20240105~"));
    assert!(outputs[1].content.contains("BEG*00*SA*SHAREDT2**20240106~"));
}

#[test]
fn without_shared_po_each_document_keeps_its_own() {
    let documents = batch_of(&[("orderA.txt", ORDER_A), ("orderB.txt", ORDER_B)]);

    let outputs = regenerate_batch(&documents, &BulkOptions::default(), fixed_now()).unwrap();

    assert!(outputs[0].content.contains("BEG*00*SA*POA**20240105~"));
    assert!(outputs[1].content.contains("BEG*00*SA*POB**20240106~"));
}

#[test]
fn controls_differ_per_document_and_counts_are_recomputed() {
    let documents = batch_of(&[("orderA.txt", ORDER_A), ("orderB.txt", ORDER_B)]);

    let outputs = regenerate_batch(&documents, &BulkOptions::default(), fixed_now()).unwrap();

    assert_eq!(outputs[0].control_number, "309500000");
    assert_eq!(outputs[1].control_number, "309500001");

    let first = tokenize(&outputs[0].content);
    assert_eq!(
        first.segments[0].element(positions::ISA_CONTROL_NUMBER),
        Some("309500000")
    );
    assert_eq!(
        first.segments[1].element(positions::GS_CONTROL_NUMBER),
        Some("309500000")
    );
    assert_eq!(
        first.segments[2].element(positions::ST_CONTROL_NUMBER),
        Some("309500000")
    );

    // Both PO1 groups pass through and CTT reports the real total.
    assert_eq!(outputs[0].line_items_emitted, 2);
    assert!(outputs[0].content.contains("PO4*1*CA*25~"));
    assert!(outputs[0].content.contains("AMT*TT*50~"));
    assert!(outputs[0].content.contains("CTT*2~"));
    assert!(outputs[0].content.contains("SE*9*309500000~"));
}

#[test]
fn bulk_rewrites_dtm_but_leaves_g62_alone() {
    let documents = batch_of(&[("orderA.txt", ORDER_A), ("grocery.edi", GROCERY_875)]);
    let mut dates = DateRegistry::default();
    dates.register(DateSegmentKind::Dtm, "002", "20240110");
    dates.apply_edit(DateSegmentKind::Dtm, "002", "20240110", "002", "20240601");
    dates.register(DateSegmentKind::G62, "02", "20240110");
    dates.apply_edit(DateSegmentKind::G62, "02", "20240110", "02", "20240601");
    let options = BulkOptions {
        dates,
        ..BulkOptions::default()
    };

    let outputs = regenerate_batch(&documents, &options, fixed_now()).unwrap();

    assert!(outputs[0].content.contains("DTM*002*20240601~"));
    assert!(outputs[1].content.contains("G62*02*20240110~"));
}

#[test]
fn output_names_and_layout_follow_each_input() {
    let documents = batch_of(&[("orderA.txt", ORDER_A), ("grocery.edi", GROCERY_875)]);

    let outputs = regenerate_batch(&documents, &BulkOptions::default(), fixed_now()).unwrap();

    assert_eq!(outputs[0].file_name, "orderA_updated_20240115_0905.txt");
    assert_eq!(outputs[1].file_name, "grocery_updated_20240115_0905.edi");
    assert!(!outputs[0].content.contains('\n'));
    assert!(outputs[1].content.contains('\n'));
}

#[test]
fn empty_batch_is_rejected() {
    let err = regenerate_batch(&[], &BulkOptions::default(), fixed_now()).unwrap_err();
    assert!(matches!(err, X12Error::NoDocuments));
}
