//! Project and wage rate models.
//!
//! A [`Project`] owns the list of [`WageRate`] templates used to price
//! every timesheet row logged against it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Apprentice factor applied when a wage rate does not specify one (60%).
pub const DEFAULT_APPRENTICE_FACTOR: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

fn default_apprentice_factor() -> Decimal {
    DEFAULT_APPRENTICE_FACTOR
}

/// A prevailing wage rate for one craft on a project.
///
/// # Example
///
/// ```
/// use certified_payroll::models::{WageRate, DEFAULT_APPRENTICE_FACTOR};
/// use rust_decimal::Decimal;
///
/// let rate: WageRate = serde_json::from_str(r#"{"craft": "Electrician", "base_rate": 50}"#).unwrap();
/// assert_eq!(rate.base_rate, Decimal::new(50, 0));
/// assert_eq!(rate.fringe_rate, Decimal::ZERO);
/// assert_eq!(rate.apprentice_factor, DEFAULT_APPRENTICE_FACTOR);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRate {
    /// Craft or classification name, e.g. "Electrician".
    pub craft: String,
    /// Base hourly rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_rate: Decimal,
    /// Hourly fringe amount.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub fringe_rate: Decimal,
    /// Multiplier applied to the base rate for apprentices.
    #[serde(default = "default_apprentice_factor", with = "rust_decimal::serde::float")]
    pub apprentice_factor: Decimal,
}

impl WageRate {
    /// Creates a wage rate with no fringe and the default apprentice factor.
    pub fn new(craft: impl Into<String>, base_rate: Decimal) -> Self {
        Self {
            craft: craft.into(),
            base_rate,
            fringe_rate: Decimal::ZERO,
            apprentice_factor: DEFAULT_APPRENTICE_FACTOR,
        }
    }

    /// Sets the hourly fringe amount.
    pub fn with_fringe(mut self, fringe_rate: Decimal) -> Self {
        self.fringe_rate = fringe_rate;
        self
    }

    /// Sets the apprentice factor.
    pub fn with_apprentice_factor(mut self, apprentice_factor: Decimal) -> Self {
        self.apprentice_factor = apprentice_factor;
        self
    }

    /// Checks the range constraints on the rate.
    ///
    /// The craft must be non-blank, both rates non-negative, and the
    /// apprentice factor within `[0, 1]`.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.craft.trim().is_empty() {
            return Err(PayrollError::invalid("craft", "must not be empty"));
        }
        if self.base_rate < Decimal::ZERO {
            return Err(PayrollError::invalid(
                "base_rate",
                format!("must not be negative (craft '{}')", self.craft),
            ));
        }
        if self.fringe_rate < Decimal::ZERO {
            return Err(PayrollError::invalid(
                "fringe_rate",
                format!("must not be negative (craft '{}')", self.craft),
            ));
        }
        if self.apprentice_factor < Decimal::ZERO || self.apprentice_factor > Decimal::ONE {
            return Err(PayrollError::invalid(
                "apprentice_factor",
                format!("must be between 0 and 1 (craft '{}')", self.craft),
            ));
        }
        Ok(())
    }
}

/// A public works project subject to certified payroll reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// The project name.
    pub name: String,
    /// Contracting agency or owner.
    #[serde(default)]
    pub agency: Option<String>,
    /// County the work is performed in.
    #[serde(default)]
    pub county: Option<String>,
    /// State the work is performed in.
    #[serde(default)]
    pub state: Option<String>,
    /// The agency's project or contract number.
    #[serde(default)]
    pub project_number: Option<String>,
    /// Site address.
    #[serde(default)]
    pub address: Option<String>,
    /// Craft wage and fringe rates for this project.
    #[serde(default)]
    pub wage_templates: Vec<WageRate>,
    /// Free-text apprentice ratio requirement, e.g. "1:5".
    #[serde(default)]
    pub apprentice_required_ratio: Option<String>,
}

impl Project {
    /// Creates a project with the given name and no other details.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agency: None,
            county: None,
            state: None,
            project_number: None,
            address: None,
            wage_templates: Vec::new(),
            apprentice_required_ratio: None,
        }
    }

    /// Validates every wage template, reporting the index of the first bad one.
    pub fn validate(&self) -> PayrollResult<()> {
        for (index, rate) in self.wage_templates.iter().enumerate() {
            rate.validate().map_err(|err| match err {
                PayrollError::InvalidRecord { field, message } => PayrollError::InvalidRecord {
                    field: format!("wage_templates[{index}].{field}"),
                    message,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}
