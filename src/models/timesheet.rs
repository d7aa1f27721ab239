//! Timesheet entry model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Hours worked by one employee in one craft on one day.
///
/// Entries are written once and never mutated. `project_id` is not checked
/// against the project collection when the entry is stored.
///
/// # Example
///
/// ```
/// use certified_payroll::models::TimesheetEntry;
///
/// let json = r#"{
///     "project_id": "p1",
///     "employee_name": "Dana Ruiz",
///     "date": "2026-01-12",
///     "craft": "Electrician",
///     "hours": 8,
///     "week_ending": "2026-01-17"
/// }"#;
/// let entry: TimesheetEntry = serde_json::from_str(json).unwrap();
/// assert!(!entry.apprentice);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// Id of the project the hours were worked on.
    pub project_id: String,
    /// Name of the worker.
    pub employee_name: String,
    /// The day the hours were worked.
    pub date: NaiveDate,
    /// Craft the hours were worked in; joins against the project's wage rates.
    pub craft: String,
    /// Hours worked.
    #[serde(with = "rust_decimal::serde::float")]
    pub hours: Decimal,
    /// Whether the worker was an apprentice for these hours.
    #[serde(default)]
    pub apprentice: bool,
    /// Week-ending date used to group entries into a payroll week.
    pub week_ending: NaiveDate,
}

impl TimesheetEntry {
    /// Rejects negative hours.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.hours < Decimal::ZERO {
            return Err(PayrollError::invalid(
                "hours",
                format!(
                    "must not be negative ({} on {})",
                    self.employee_name, self.date
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hours: Decimal) -> TimesheetEntry {
        TimesheetEntry {
            project_id: "p1".to_string(),
            employee_name: "Dana Ruiz".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            craft: "Electrician".to_string(),
            hours,
            apprentice: false,
            week_ending: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
        }
    }

    #[test]
    fn test_zero_hours_is_valid() {
        assert!(entry(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_negative_hours_is_rejected() {
        let err = entry(Decimal::new(-1, 0)).validate().unwrap_err();
        assert!(matches!(err, PayrollError::InvalidRecord { field, .. } if field == "hours"));
    }

    #[test]
    fn test_dates_serialize_as_iso_strings() {
        let json = serde_json::to_value(entry(Decimal::new(8, 0))).unwrap();
        assert_eq!(json["date"], "2026-01-12");
        assert_eq!(json["week_ending"], "2026-01-17");
    }

    #[test]
    fn test_bad_date_format_is_rejected() {
        let json = r#"{
            "project_id": "p1",
            "employee_name": "Dana Ruiz",
            "date": "01/12/2026",
            "craft": "Electrician",
            "hours": 8,
            "week_ending": "2026-01-17"
        }"#;
        let result: Result<TimesheetEntry, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
