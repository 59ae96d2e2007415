//! CLI library components for the X12 purchase-order regenerator.

pub mod logging;
pub mod pipeline;
pub mod plan;
