//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler tags its log lines with a fresh correlation id that is echoed in
//! the response envelope.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{build_tax_params, complete_tax, gross_from_net, salary_curve};
use crate::config::TaxYearConfig;
use crate::error::{EngineError, EngineResult};
use crate::industry::{
    IndustryPayroll, calculate_construction_payroll, calculate_gastronomy_payroll,
    calculate_nursing_payroll,
};
use crate::models::MaternityBenefitKind;
use crate::special::{
    calculate_maternity_benefit, calculate_short_time_work, calculate_sick_pay,
    protection_period, validate_short_time_work,
};

use super::request::{
    ConstructionRequest, GastronomyRequest, GrossToNetRequest, MaternityRequest,
    NetToGrossRequest, NursingRequest, SalaryCurveRequest, ShortTimeWorkRequest, SickPayRequest,
    TaxParamsRequest,
};
use super::response::{ApiError, ApiErrorResponse, ApiResponse};
use super::state::AppState;

/// Upper bound for salary-curve steps per request.
pub const MAX_CURVE_STEPS: u32 = 1000;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tax/gross-to-net", post(gross_to_net_handler))
        .route("/tax/net-to-gross", post(net_to_gross_handler))
        .route("/tax/salary-curve", post(salary_curve_handler))
        .route("/employees/tax-params", post(tax_params_handler))
        .route("/special/sick-pay", post(sick_pay_handler))
        .route("/special/maternity", post(maternity_handler))
        .route("/special/short-time-work", post(short_time_work_handler))
        .route("/industry/construction", post(construction_handler))
        .route("/industry/gastronomy", post(gastronomy_handler))
        .route("/industry/nursing", post(nursing_handler))
        .with_state(state)
}

/// Handler for POST /tax/gross-to-net.
async fn gross_to_net_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrossToNetRequest>, JsonRejection>,
) -> Response {
    handle(&state, "gross-to-net", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        Ok((bundle.year, complete_tax(&request.params, bundle)))
    })
}

/// Handler for POST /tax/net-to-gross.
async fn net_to_gross_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetToGrossRequest>, JsonRejection>,
) -> Response {
    handle(&state, "net-to-gross", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        let params = request.profile.with_gross_monthly(request.target_net_monthly);
        Ok((
            bundle.year,
            gross_from_net(request.target_net_monthly, &params, bundle),
        ))
    })
}

/// Handler for POST /tax/salary-curve.
async fn salary_curve_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryCurveRequest>, JsonRejection>,
) -> Response {
    handle(&state, "salary-curve", payload, |request, loader| {
        if request.steps > MAX_CURVE_STEPS {
            return Err(EngineError::ValidationError {
                field: "steps".to_string(),
                message: format!("at most {} steps are supported", MAX_CURVE_STEPS),
            });
        }
        let bundle = loader.resolve(request.tax_year)?;
        let params = request.profile.with_gross_monthly(request.from_monthly);
        Ok((
            bundle.year,
            salary_curve(
                request.from_monthly,
                request.to_monthly,
                request.steps,
                &params,
                bundle,
            ),
        ))
    })
}

/// Handler for POST /employees/tax-params.
async fn tax_params_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxParamsRequest>, JsonRejection>,
) -> Response {
    handle(&state, "tax-params", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        let reference = request
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());
        Ok((
            bundle.year,
            build_tax_params(&request.employee, reference, bundle),
        ))
    })
}

/// Handler for POST /special/sick-pay.
async fn sick_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<SickPayRequest>, JsonRejection>,
) -> Response {
    handle(&state, "sick-pay", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        let params = request.profile.with_gross_monthly(request.gross_monthly);
        Ok((
            bundle.year,
            calculate_sick_pay(&params, request.start_date, request.end_date, bundle),
        ))
    })
}

/// Handler for POST /special/maternity.
async fn maternity_handler(
    State(state): State<AppState>,
    payload: Result<Json<MaternityRequest>, JsonRejection>,
) -> Response {
    handle(&state, "maternity", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        let (start_date, end_date) = maternity_period(&request, bundle)?;
        let params = request.profile.with_gross_monthly(request.gross_monthly);
        Ok((
            bundle.year,
            calculate_maternity_benefit(request.kind, &params, start_date, end_date, bundle),
        ))
    })
}

/// Resolves the benefit period from explicit dates or the due date.
fn maternity_period(
    request: &MaternityRequest,
    bundle: &TaxYearConfig,
) -> EngineResult<(chrono::NaiveDate, chrono::NaiveDate)> {
    match (request.kind, request.start_date, request.end_date, request.due_date) {
        (_, Some(start), Some(end), _) => Ok((start, end)),
        (MaternityBenefitKind::ProtectionPeriod, _, _, Some(due_date)) => Ok(protection_period(
            due_date,
            &bundle.special_payments.maternity,
        )),
        _ => Err(EngineError::ValidationError {
            field: "start_date".to_string(),
            message: "start_date and end_date are required unless a due_date is given for a protection period"
                .to_string(),
        }),
    }
}

/// Handler for POST /special/short-time-work.
async fn short_time_work_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortTimeWorkRequest>, JsonRejection>,
) -> Response {
    handle(&state, "short-time-work", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        validate_short_time_work(
            request.original_hours,
            request.reduced_hours,
            &bundle.special_payments.short_time_work,
        )?;
        let params = request.profile.with_gross_monthly(request.gross_monthly);
        Ok((
            bundle.year,
            calculate_short_time_work(
                &params,
                request.original_hours,
                request.reduced_hours,
                request.period_start,
                request.period_end,
                bundle,
            ),
        ))
    })
}

/// Handler for POST /industry/construction.
async fn construction_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConstructionRequest>, JsonRejection>,
) -> Response {
    handle(&state, "construction", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        let payroll = calculate_construction_payroll(&request.input, bundle);
        log_industry_split(&payroll);
        Ok((bundle.year, payroll))
    })
}

/// Handler for POST /industry/gastronomy.
async fn gastronomy_handler(
    State(state): State<AppState>,
    payload: Result<Json<GastronomyRequest>, JsonRejection>,
) -> Response {
    handle(&state, "gastronomy", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        let payroll = calculate_gastronomy_payroll(&request.input, bundle);
        log_industry_split(&payroll);
        Ok((bundle.year, payroll))
    })
}

/// Handler for POST /industry/nursing.
async fn nursing_handler(
    State(state): State<AppState>,
    payload: Result<Json<NursingRequest>, JsonRejection>,
) -> Response {
    handle(&state, "nursing", payload, |request, loader| {
        let bundle = loader.resolve(request.tax_year)?;
        let payroll = calculate_nursing_payroll(&request.input, bundle);
        log_industry_split(&payroll);
        Ok((bundle.year, payroll))
    })
}

fn log_industry_split(payroll: &impl IndustryPayroll) {
    debug!(
        industry = ?payroll.industry(),
        total_gross = %payroll.total_gross(),
        tax_free = %payroll.tax_free(),
        taxable = %payroll.taxable(),
        "Industry payroll computed"
    );
}

/// Shared request pipeline: parse, calculate, log and wrap the result.
fn handle<Req, Res, F>(
    state: &AppState,
    operation: &'static str,
    payload: Result<Json<Req>, JsonRejection>,
    calculate: F,
) -> Response
where
    Res: Serialize,
    F: FnOnce(Req, &crate::config::ConfigLoader) -> EngineResult<(i32, Res)>,
{
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, operation, "Processing request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection_to_error(rejection, correlation_id);
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let start_time = Instant::now();
    match calculate(request, state.config()) {
        Ok((tax_year, result)) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                tax_year,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                ApiResponse {
                    correlation_id,
                    tax_year,
                    result,
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to an API error body.
fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
