//! Calculation logic for the certified payroll service.
//!
//! This module contains the craft rate lookup and the weekly wage
//! aggregation that turns timesheet rows into submission totals. Nothing
//! here touches storage.

mod rate_table;
mod wage_aggregation;

pub use rate_table::{CraftRate, RateTable};
pub use wage_aggregation::{
    WageAggregation, aggregate_wages, missing_rate_warning, round_to_cents,
};
