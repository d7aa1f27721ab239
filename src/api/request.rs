//! Request types for the certified payroll API.
//!
//! Bodies for the create endpoints reuse the record types in
//! [`crate::models`] directly; this module holds the wrappers and query
//! strings that have no model of their own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TimesheetEntry;

/// Request body for `POST /submissions/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The project to generate for.
    pub project_id: String,
    /// The payroll week to generate for.
    pub week_ending: NaiveDate,
}

/// Request body for `POST /submissions/sign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRequest {
    /// The submission being signed.
    pub submission_id: String,
    /// Name of the person signing.
    pub signer_name: String,
    /// Title of the person signing.
    pub signer_title: String,
}

/// Request body for `POST /timesheets/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetBulkRequest {
    /// Entries to store, in order.
    pub entries: Vec<TimesheetEntry>,
}

/// Query string for listing timesheets and submissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectWeekQuery {
    /// Only return documents for this project.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Only return documents for this week.
    #[serde(default)]
    pub week_ending: Option<NaiveDate>,
}

/// Query string for listing signatures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureQuery {
    /// Only return signatures for this submission.
    #[serde(default)]
    pub submission_id: Option<String>,
}
