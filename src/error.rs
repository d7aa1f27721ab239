//! Error types for the certified payroll service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`StoreError`] covers failures of the document store collaborator and is
//! carried unmodified inside [`PayrollError::Storage`].

use thiserror::Error;

/// Errors raised by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("Storage backend unavailable: {message}")]
    Unavailable {
        /// A description of the failure.
        message: String,
    },

    /// A document could not be stored or decoded into its typed record.
    #[error("Invalid document in collection '{collection}': {message}")]
    InvalidDocument {
        /// The collection the document belongs to.
        collection: String,
        /// A description of what was wrong with the document.
        message: String,
    },

    /// An I/O error from a file-backed store.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization error while encoding or decoding documents.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// The main error type for the certified payroll service.
///
/// # Example
///
/// ```
/// use certified_payroll::error::PayrollError;
///
/// let error = PayrollError::ProjectNotFound {
///     project_id: "abc123".to_string(),
/// };
/// assert_eq!(error.to_string(), "Project not found: abc123");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration key.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The referenced project id has no stored project.
    #[error("Project not found: {project_id}")]
    ProjectNotFound {
        /// The id that was looked up.
        project_id: String,
    },

    /// A record failed a range or presence check at the boundary.
    #[error("Invalid field '{field}': {message}")]
    InvalidRecord {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A timesheet row's pay does not fit in a decimal amount.
    #[error("Pay for {employee_name} ({craft}, {date}) exceeds the representable amount")]
    CalculationOverflow {
        /// Worker on the offending row.
        employee_name: String,
        /// Craft the row was priced under.
        craft: String,
        /// Day the hours were worked.
        date: String,
    },

    /// The document store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl PayrollError {
    /// Shorthand for an [`PayrollError::InvalidRecord`] error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
