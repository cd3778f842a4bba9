//! What the payroll endpoints send back.
//!
//! Every payroll result travels in an [`ApiResponse`] stamped with the
//! correlation id and the tax year whose rate bundle priced it. Failures
//! become an [`ApiError`]: rejected payroll input is a `400`, a broken rate
//! bundle on the server side is a `500`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// A payroll result with the request's correlation id and tax year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Identifier of the request, also present in the logs.
    pub correlation_id: Uuid,
    /// Year of the rate bundle that was applied.
    pub tax_year: i32,
    /// Net wage, payroll split or special-payment record.
    pub result: T,
}

/// Error body returned when a payroll request cannot be priced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable code such as `TAX_YEAR_NOT_FOUND`.
    pub code: String,
    /// What went wrong, naming the offending field or year.
    pub message: String,
    /// Hint on how the request or the rate bundle needs to change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates an error without a hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error carrying a hint for the caller.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Payroll input that breaks a business rule.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Request body that is not valid payroll JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// No rate bundle covers `year`.
    pub fn tax_year_not_found(year: i32) -> Self {
        Self::with_details(
            "TAX_YEAR_NOT_FOUND",
            format!("No wage-tax and contribution rates for tax year {}", year),
            "Use a tax year covered by a rate bundle under config/de/years",
        )
    }
}

/// An [`ApiError`] paired with its HTTP status.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Payroll rates are not available",
                    format!("Rate bundle file missing: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Payroll rates could not be read",
                    format!("Rate bundle {} is malformed: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { year, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Rate bundle for tax year {} is inconsistent", year),
                    message,
                ),
            },
            EngineError::TaxYearNotFound { year } => {
                ApiErrorResponse::bad_request(ApiError::tax_year_not_found(year))
            }
            EngineError::ValidationError { field, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid value for '{}': {}", field, message),
                    "The payroll input parsed but cannot be calculated as given",
                ))
            }
        }
    }
}
