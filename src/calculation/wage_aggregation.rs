//! Weekly wage aggregation.
//!
//! This module prices a week of timesheet rows against a project's wage
//! templates and sums the result into the totals reported on a certified
//! payroll submission.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollLine, PayrollTotals, TimesheetEntry, WageRate};

use super::rate_table::RateTable;

/// The result of aggregating a week of timesheet rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WageAggregation {
    /// Totals rounded to cents.
    pub totals: PayrollTotals,
    /// Pay for each priced row, in input order.
    pub lines: Vec<PayrollLine>,
    /// One message per row whose craft had no wage rate, in input order.
    pub warnings: Vec<String>,
}

/// Formats the warning recorded for a row whose craft has no wage rate.
pub fn missing_rate_warning(craft: &str) -> String {
    format!("Missing wage rate for craft '{}'", craft)
}

/// Rounds to two decimal places, half away from zero, and pads the scale so
/// the value always prints with exactly two places.
///
/// # Examples
///
/// ```
/// use certified_payroll::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_cents(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round_to_cents(Decimal::new(8, 0)).to_string(), "8.00");
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Aggregates timesheet rows into payroll totals.
///
/// Each row is priced against the wage template for its craft:
///
/// * `base_pay = base_rate * (apprentice_factor if apprentice else 1) * hours`
/// * `fringe_pay = fringe_rate * hours`
/// * `gross = base_pay + fringe_pay`
///
/// A row whose craft has no template adds a warning and nothing else, even
/// when it has zero hours. Totals are summed exactly and rounded to cents
/// only at the end. The function is pure; identical inputs always produce
/// identical output.
///
/// # Errors
///
/// Returns [`PayrollError::CalculationOverflow`] naming the first row whose
/// pay, or whose addition to the running totals, does not fit in a
/// `Decimal`. Nothing is returned for the other rows in that case.
///
/// # Arguments
///
/// * `templates` - The project's wage templates
/// * `rows` - Timesheet rows for one project and week
///
/// # Examples
///
/// ```
/// use certified_payroll::calculation::aggregate_wages;
/// use certified_payroll::models::{TimesheetEntry, WageRate};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let templates = vec![WageRate::new("Electrician", Decimal::new(50, 0)).with_fringe(Decimal::new(5, 0))];
/// let rows = vec![TimesheetEntry {
///     project_id: "p1".to_string(),
///     employee_name: "Dana Ruiz".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     craft: "Electrician".to_string(),
///     hours: Decimal::new(8, 0),
///     apprentice: false,
///     week_ending: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
/// }];
///
/// let result = aggregate_wages(&templates, &rows).unwrap();
/// assert_eq!(result.totals.gross.to_string(), "440.00");
/// assert!(result.warnings.is_empty());
/// ```
pub fn aggregate_wages(
    templates: &[WageRate],
    rows: &[TimesheetEntry],
) -> PayrollResult<WageAggregation> {
    let table = RateTable::from_templates(templates);

    let mut hours = Decimal::ZERO;
    let mut base_pay = Decimal::ZERO;
    let mut fringe = Decimal::ZERO;
    let mut gross = Decimal::ZERO;
    let mut lines = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();

    for row in rows {
        let Some(rate) = table.get(&row.craft) else {
            warnings.push(missing_rate_warning(&row.craft));
            continue;
        };

        let overflow = || PayrollError::CalculationOverflow {
            employee_name: row.employee_name.clone(),
            craft: row.craft.clone(),
            date: row.date.to_string(),
        };

        let hourly_rate = rate.effective_base_rate(row.apprentice).ok_or_else(overflow)?;
        let row_base_pay = hourly_rate.checked_mul(row.hours).ok_or_else(overflow)?;
        let row_fringe_pay = rate.fringe.checked_mul(row.hours).ok_or_else(overflow)?;
        let row_gross = row_base_pay.checked_add(row_fringe_pay).ok_or_else(overflow)?;

        hours = hours.checked_add(row.hours).ok_or_else(overflow)?;
        base_pay = base_pay.checked_add(row_base_pay).ok_or_else(overflow)?;
        fringe = fringe.checked_add(row_fringe_pay).ok_or_else(overflow)?;
        gross = gross.checked_add(row_gross).ok_or_else(overflow)?;

        lines.push(PayrollLine {
            employee_name: row.employee_name.clone(),
            date: row.date,
            craft: row.craft.clone(),
            hours: row.hours,
            apprentice: row.apprentice,
            hourly_rate,
            fringe_rate: rate.fringe,
            base_pay: row_base_pay,
            fringe_pay: row_fringe_pay,
            gross: row_gross,
        });
    }

    Ok(WageAggregation {
        totals: PayrollTotals {
            hours: round_to_cents(hours),
            base_pay: round_to_cents(base_pay),
            fringe: round_to_cents(fringe),
            gross: round_to_cents(gross),
        },
        lines,
        warnings,
    })
}
