//! Command implementations.

mod info;
mod run;
mod source;
mod validate;

pub use info::run_info;
pub use run::run_report;
pub use validate::run_validate;
