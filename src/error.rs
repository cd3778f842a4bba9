//! Error types for the payroll engine.
//!
//! Calculations are total functions over well-formed numeric input, so errors
//! only arise at the configuration boundary and from explicit business-rule
//! validators.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use lohn_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A rate bundle parsed but violates a table invariant.
    #[error("Invalid configuration for tax year {year}: {message}")]
    InvalidConfig {
        /// The tax year of the offending bundle.
        year: i32,
        /// A description of the violated invariant.
        message: String,
    },

    /// No rate bundle is effective for the requested year.
    #[error("No rate bundle available for tax year {year}")]
    TaxYearNotFound {
        /// The requested tax year.
        year: i32,
    },

    /// An input value failed a business-rule check.
    #[error("Validation failed for '{field}': {message}")]
    ValidationError {
        /// The field that was rejected.
        field: String,
        /// A description of why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
