//! EDI document regeneration and date arithmetic.
//!
//! This crate turns scanned documents plus caller decisions into fresh
//! output documents:
//!
//! - **control**: batch-unique 9-digit control numbers
//! - **regenerate**: single-document engine with line-item filtering
//! - **bulk**: per-batch engine without filtering
//! - **dateshift**: uniform day offsets over DTM/G62 dates
//! - **filename**: derived output file names

pub mod bulk;
pub mod control;
pub mod dateshift;
pub mod filename;
pub mod regenerate;
mod rewrite;

// Re-export common functions for external use
pub use bulk::{BatchDocument, regenerate_batch};
pub use control::{CONTROL_NUMBER_WIDTH, control_number, epoch_millis};
pub use dateshift::{apply_registry_offset, shift_date_value, shift_document_dates};
pub use filename::{bulk_output_name, single_output_name};
pub use regenerate::regenerate_document;
