//! Payroll submission models.
//!
//! This module contains the [`Submission`] snapshot produced for one
//! project and week, along with the per-row [`PayrollLine`] breakdown and
//! the rounded [`PayrollTotals`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Computed from timesheets, not yet signed.
    #[default]
    Generated,
    /// A statement of compliance has been signed.
    Signed,
}

/// Aggregated payroll totals for one project week.
///
/// Each value is rounded to cents. Amounts are written to JSON as numbers.
///
/// # Example
///
/// ```
/// use certified_payroll::models::PayrollTotals;
///
/// let totals = PayrollTotals::default();
/// assert_eq!(serde_json::to_value(&totals).unwrap()["gross"], 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Total hours priced against a wage rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub hours: Decimal,
    /// Total base wages.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_pay: Decimal,
    /// Total fringe benefits.
    #[serde(with = "rust_decimal::serde::float")]
    pub fringe: Decimal,
    /// Base wages plus fringe.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
}

/// Pay for a single priced timesheet row.
///
/// Amounts are exact products and are not rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// Name of the worker.
    pub employee_name: String,
    /// The day the hours were worked.
    pub date: NaiveDate,
    /// Craft the row was priced under.
    pub craft: String,
    /// Hours worked.
    #[serde(with = "rust_decimal::serde::float")]
    pub hours: Decimal,
    /// Whether the apprentice factor was applied.
    pub apprentice: bool,
    /// Base hourly rate after the apprentice factor.
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    /// Hourly fringe amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub fringe_rate: Decimal,
    /// `hourly_rate * hours`.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_pay: Decimal,
    /// `fringe_rate * hours`.
    #[serde(with = "rust_decimal::serde::float")]
    pub fringe_pay: Decimal,
    /// `base_pay + fringe_pay`.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
}

/// A generated certified-payroll snapshot for one project and week.
///
/// Submissions are never updated in place; signing writes a separate
/// [`Signature`](super::Signature) record, so the signer fields stay empty
/// on generated documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Id of the project the submission covers.
    pub project_id: String,
    /// Week-ending date of the covered payroll week.
    pub week_ending: NaiveDate,
    /// Rounded totals across all priced rows.
    #[serde(default)]
    pub totals: PayrollTotals,
    /// Per-row pay breakdown for priced rows.
    #[serde(default)]
    pub lines: Vec<PayrollLine>,
    /// Problems found while pricing, in row order.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Name of the signer.
    #[serde(default)]
    pub signer_name: Option<String>,
    /// Title of the signer.
    #[serde(default)]
    pub signer_title: Option<String>,
    /// When the submission was signed.
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl Submission {
    /// Builds a freshly generated, unsigned submission.
    pub fn generated(
        project_id: impl Into<String>,
        week_ending: NaiveDate,
        totals: PayrollTotals,
        lines: Vec<PayrollLine>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            week_ending,
            totals,
            lines,
            warnings,
            signer_name: None,
            signer_title: None,
            signed_at: None,
            status: SubmissionStatus::Generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SubmissionStatus::Generated).unwrap(),
            "\"generated\""
        );
        assert_eq!(
            serde_json::to_string(&SubmissionStatus::Signed).unwrap(),
            "\"signed\""
        );
    }

    #[test]
    fn test_generated_submission_is_unsigned() {
        let week = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        let submission = Submission::generated("p1", week, PayrollTotals::default(), vec![], vec![]);

        assert_eq!(submission.status, SubmissionStatus::Generated);
        assert!(submission.signer_name.is_none());
        assert!(submission.signed_at.is_none());
    }

    #[test]
    fn test_totals_serialize_as_json_numbers() {
        let totals = PayrollTotals {
            hours: dec("8.00"),
            base_pay: dec("400.00"),
            fringe: dec("40.00"),
            gross: dec("440.00"),
        };

        let json = serde_json::to_value(&totals).unwrap();
        assert!(json["gross"].is_number());
        assert_eq!(json["hours"], 8.0);
        assert_eq!(json["base_pay"], 400.0);
        assert_eq!(json["fringe"], 40.0);
        assert_eq!(json["gross"], 440.0);
        assert_eq!(serde_json::to_string(&totals).unwrap(), r#"{"hours":8.0,"base_pay":400.0,"fringe":40.0,"gross":440.0}"#);
    }

    #[test]
    fn test_line_amounts_serialize_as_json_numbers() {
        let line = PayrollLine {
            employee_name: "Dana Ruiz".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            craft: "Laborer".to_string(),
            hours: dec("0.3333"),
            apprentice: false,
            hourly_rate: dec("33.33"),
            fringe_rate: dec("0"),
            base_pay: dec("11.108889"),
            fringe_pay: dec("0"),
            gross: dec("11.108889"),
        };

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["hours"], 0.3333);
        assert_eq!(json["hourly_rate"], 33.33);
        assert_eq!(json["gross"], 11.108889);
    }

    #[test]
    fn test_totals_accept_numbers_or_strings() {
        let from_numbers: PayrollTotals =
            serde_json::from_str(r#"{"hours": 8, "base_pay": 400.5, "fringe": 40, "gross": 440.5}"#).unwrap();
        let from_strings: PayrollTotals =
            serde_json::from_str(r#"{"hours": "8", "base_pay": "400.50", "fringe": "40", "gross": "440.50"}"#)
                .unwrap();

        assert_eq!(from_numbers, from_strings);
        assert_eq!(from_numbers.base_pay, dec("400.50"));
    }

    #[test]
    fn test_totals_survive_a_json_round_trip() {
        let totals = PayrollTotals {
            hours: dec("37.50"),
            base_pay: dec("1963.13"),
            fringe: dec("1166.25"),
            gross: dec("3129.38"),
        };
        let json = serde_json::to_string(&totals).unwrap();
        let back: PayrollTotals = serde_json::from_str(&json).unwrap();
        assert_eq!(back, totals);
    }

    #[test]
    fn test_submission_reads_documents_without_optional_fields() {
        let json = r#"{"project_id": "p1", "week_ending": "2026-01-17"}"#;
        let submission: Submission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.totals, PayrollTotals::default());
        assert!(submission.warnings.is_empty());
        assert_eq!(submission.status, SubmissionStatus::Generated);
    }
}
