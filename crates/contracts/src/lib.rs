//! # Contracts
//!
//! Shared data structures for the device time survey engine.
//! Business crates depend on this crate; reverse dependencies are prohibited.
//!
//! ## Units
//! - Offset magnitudes are whole milliseconds (`u64`)
//! - Threshold windows are named by the phrase the survey sheets use ("2 sec", "1 hour", ...)

mod config;
mod error;
mod record;
mod threshold;

pub use config::*;
pub use error::*;
pub use record::*;
pub use threshold::*;
