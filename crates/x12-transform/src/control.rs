//! Interchange control numbers.
//!
//! One fresh nine-digit number is stamped into ISA13, GS06, ST02 and SE02 of
//! a regenerated document. The number is derived from the clock so reruns
//! differ, and from the batch index so the documents of one batch differ
//! from each other.

use chrono::NaiveDateTime;

/// Width of a generated control number.
pub const CONTROL_NUMBER_WIDTH: usize = 9;

/// Derive the nine-digit control number for a document: the last nine
/// decimal digits of the epoch-millisecond clock, plus the batch index,
/// zero-padded and truncated back to nine digits on overflow.
pub fn control_number(epoch_millis: u64, index: usize) -> String {
    let digits = epoch_millis.to_string();
    let tail_start = digits.len().saturating_sub(CONTROL_NUMBER_WIDTH);
    let seed: u64 = digits[tail_start..].parse().unwrap_or(0);
    let stamped = format!("{:0width$}", seed + index as u64, width = CONTROL_NUMBER_WIDTH);
    stamped[stamped.len() - CONTROL_NUMBER_WIDTH..].to_string()
}

/// Clock value engines thread through to [`control_number`].
pub fn epoch_millis(now: NaiveDateTime) -> u64 {
    now.and_utc().timestamp_millis().max(0) as u64
}
