//! Ingestion for X12 EDI purchase-order interchanges: raw text tokenizing,
//! single-pass structure scanning, and concurrent batch loading.

pub mod batch;
pub mod scan;
pub mod tokenizer;

pub use batch::{BatchFile, DocumentBatch, display_name, load_batch};
pub use scan::{DocumentScan, scan_document};
pub use tokenizer::{detect_layout, tokenize};
