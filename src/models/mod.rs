//! Core data models for the certified payroll service.
//!
//! Each record type maps onto one document collection in the store.

mod document;
mod employee;
mod project;
mod signature;
mod submission;
mod timesheet;

pub use document::Stored;
pub use employee::Employee;
pub use project::{DEFAULT_APPRENTICE_FACTOR, Project, WageRate};
pub use signature::{Signature, SignatureType};
pub use submission::{PayrollLine, PayrollTotals, Submission, SubmissionStatus};
pub use timesheet::TimesheetEntry;
