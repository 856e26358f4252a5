//! # Aggregation
//!
//! Incremental offset statistics.
//!
//! - [`OffsetAccumulator`]: running count / sum / min / max for one key
//! - [`GroupedIndex`]: three string-keyed accumulator tables, one per [`Dimension`]
//!
//! Accumulators are append-only and mergeable, so independent runs can be
//! combined after the fact.

mod accumulator;
mod index;

pub use accumulator::{AccumulatorSnapshot, OffsetAccumulator};
pub use index::{Dimension, GroupedIndex};
