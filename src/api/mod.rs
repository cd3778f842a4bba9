//! HTTP API module for the payroll engine.
//!
//! This module exposes the calculators as JSON endpoints: gross-to-net and
//! its inverse, salary curves, employee parameter derivation, special
//! payments and the industry supplements.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{MAX_CURVE_STEPS, create_router};
pub use request::{
    ConstructionRequest, GastronomyRequest, GrossToNetRequest, MaternityRequest,
    NetToGrossRequest, NursingRequest, SalaryCurveRequest, ShortTimeWorkRequest, SickPayRequest,
    TaxParamsRequest, TaxProfile,
};
pub use response::{ApiError, ApiErrorResponse, ApiResponse};
pub use state::AppState;
