//! Pre-deployment validation checklist.
//!
//! A fixed, ordered sequence of independent filesystem and content checks,
//! each classified success, warning, or error. Warnings never fail the run;
//! any error does.

mod checks;
mod report;

pub use checks::run_validation;
pub use report::{print_report, CheckOutcome, Section, Severity, ValidationReport};
