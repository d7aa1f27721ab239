//! Craft rate lookup.
//!
//! This module turns a project's wage templates into a table keyed by craft
//! name so each timesheet row can be priced with a single lookup.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::WageRate;

/// The rates that apply to one craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftRate {
    /// Base hourly rate for a journeyman.
    pub base: Decimal,
    /// Hourly fringe amount.
    pub fringe: Decimal,
    /// Multiplier applied to `base` for apprentices.
    pub apprentice_factor: Decimal,
}

impl CraftRate {
    /// Returns the base hourly rate, discounted by the apprentice factor when
    /// `apprentice` is set. `None` when the discounted rate overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use certified_payroll::calculation::CraftRate;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = CraftRate {
    ///     base: Decimal::new(40, 0),
    ///     fringe: Decimal::ZERO,
    ///     apprentice_factor: Decimal::new(6, 1),
    /// };
    /// assert_eq!(rate.effective_base_rate(true), Some(Decimal::new(24, 0)));
    /// assert_eq!(rate.effective_base_rate(false), Some(Decimal::new(40, 0)));
    /// ```
    pub fn effective_base_rate(&self, apprentice: bool) -> Option<Decimal> {
        if apprentice {
            self.base.checked_mul(self.apprentice_factor)
        } else {
            Some(self.base)
        }
    }
}

impl From<&WageRate> for CraftRate {
    fn from(rate: &WageRate) -> Self {
        CraftRate {
            base: rate.base_rate,
            fringe: rate.fringe_rate,
            apprentice_factor: rate.apprentice_factor,
        }
    }
}

/// Wage rates keyed by craft name.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<String, CraftRate>,
}

impl RateTable {
    /// Builds the table from wage templates.
    ///
    /// When two templates share a craft name the later one wins. The
    /// overwrite is logged so the duplicate can be cleaned up on the project.
    pub fn from_templates(templates: &[WageRate]) -> Self {
        let mut rates = HashMap::with_capacity(templates.len());
        for template in templates {
            if rates
                .insert(template.craft.clone(), CraftRate::from(template))
                .is_some()
            {
                warn!(
                    craft = %template.craft,
                    "Duplicate wage template for craft; later entry replaces earlier"
                );
            }
        }
        Self { rates }
    }

    /// Looks up the rates for a craft. Matching is exact and case sensitive.
    pub fn get(&self, craft: &str) -> Option<&CraftRate> {
        self.rates.get(craft)
    }

    /// Number of distinct crafts in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table holds no crafts.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
