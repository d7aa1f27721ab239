//! Employee directory model.
//!
//! Employees have an independent lifecycle. Timesheets refer to workers by
//! name only, so nothing in the payroll computation reads this record.

use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// A worker listed in the contractor's employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The worker's full name.
    pub name: String,
    /// Last four digits of the social security number, as printed on WH-347.
    #[serde(default)]
    pub last_four_ssn: Option<String>,
    /// Work classification, usually matching a project craft.
    #[serde(default)]
    pub classification: Option<String>,
}

impl Employee {
    /// Creates an employee with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_four_ssn: None,
            classification: None,
        }
    }

    /// Rejects a blank name.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.name.trim().is_empty() {
            return Err(PayrollError::invalid("name", "must not be empty"));
        }
        Ok(())
    }
}
