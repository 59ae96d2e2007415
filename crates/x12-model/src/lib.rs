pub mod dates;
pub mod document;
pub mod envelope;
pub mod error;
pub mod line_items;
pub mod processing;
pub mod segment;
pub mod transaction;

pub use dates::{DateEntry, DateRegistry, DateSegmentKind};
pub use document::{Document, LineLayout, join_segments};
pub use envelope::{EnvelopeHeader, EnvelopeOverrides, first_non_empty, pad_isa_id};
pub use error::{Result, X12Error};
pub use line_items::{Po1Group, any_included, emitted_group_count};
pub use processing::{BulkOptions, ProcessingMode, RegenerateOptions, RegeneratedDocument};
pub use segment::{Segment, ensure_terminated, strip_terminator};
pub use transaction::TransactionSetRegistry;
