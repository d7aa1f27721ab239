//! Certified payroll service for prevailing-wage construction projects.
//!
//! This crate stores projects, employees, and timesheet entries in a
//! document store, and generates weekly certified-payroll submissions by
//! pricing each timesheet row against the project's wage rates.
//!
//! The core computation lives in [`calculation::aggregate_wages`], which is
//! pure and deterministic. [`service::PayrollService`] wraps it with store
//! access, and [`api`] exposes everything over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
