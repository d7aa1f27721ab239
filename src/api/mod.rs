//! HTTP API module for the certified payroll service.
//!
//! This module provides the REST endpoints for projects, employees,
//! timesheets, submission generation, and signing.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{SERVICE_NAME, build_cors_layer, create_router};
pub use request::{
    GenerateRequest, ProjectWeekQuery, SignRequest, SignatureQuery, TimesheetBulkRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, BulkInsertResponse, CreatedResponse, HealthResponse,
    RootResponse, SignResponse,
};
pub use state::AppState;
