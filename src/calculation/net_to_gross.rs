//! Net-to-gross inversion.
//!
//! There is no closed form for the inverse because the wage tax is a step
//! function of the gross. The solver bisects the monthly gross instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TaxYearConfig;
use crate::models::{TaxCalculationParams, TaxCalculationResult};

use super::gross_to_net::complete_tax;

/// Hard upper bound on bisection steps.
pub const MAX_ITERATIONS: u32 = 50;

/// Accepted distance between achieved and target net, in EUR.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest monthly net target the solver searches for, in EUR (10^15).
///
/// Larger targets are clamped so that the search bounds and their yearly
/// amounts stay within `Decimal` range.
pub const MAX_TARGET_NET_MONTHLY: Decimal =
    Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

const UPPER_BOUND_FACTOR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Outcome of a net-to-gross search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetToGrossResult {
    /// Monthly gross needed to reach the target, in whole cents.
    pub required_gross: Decimal,
    /// Monthly net produced by `required_gross`.
    pub achieved_net: Decimal,
    /// Absolute distance between achieved and target net.
    pub difference: Decimal,
    /// Number of calculator evaluations spent by the search.
    pub iterations: u32,
    /// Full calculation at `required_gross`.
    pub result: TaxCalculationResult,
}

/// Finds the monthly gross that yields `target_net_monthly`.
///
/// Bisects between `target` and `3 × target`, evaluating each midpoint on
/// whole cents. Net below target raises the lower bound, otherwise the upper
/// bound drops. The search stops once the net is within [`TOLERANCE`], the
/// interval has shrunk to one cent, or [`MAX_ITERATIONS`] is reached; the
/// closest evaluation seen is returned.
///
/// Net only ever jumps downwards as the gross grows, so when the interval
/// collapses its upper end sits on the rising side of the crossing and lies
/// within one cent of the target. Negative targets are treated as zero and
/// targets above [`MAX_TARGET_NET_MONTHLY`] are clamped to it.
///
/// # Example
///
/// ```no_run
/// use lohn_engine::calculation::{complete_tax, gross_from_net};
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::models::TaxCalculationParams;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let config = loader.latest().unwrap();
/// let params = TaxCalculationParams::default();
///
/// let found = gross_from_net(Decimal::from(2500), &params, config);
/// assert!(found.difference <= Decimal::new(1, 2));
/// assert!(found.required_gross > Decimal::from(2500));
/// ```
pub fn gross_from_net(
    target_net_monthly: Decimal,
    params: &TaxCalculationParams,
    config: &TaxYearConfig,
) -> NetToGrossResult {
    let target = target_net_monthly
        .clamp(Decimal::ZERO, MAX_TARGET_NET_MONTHLY)
        .round_dp(2);
    let evaluate = |gross: Decimal| complete_tax(&params.with_gross_monthly(gross), config);

    let mut lower = target;
    let mut upper = target * UPPER_BOUND_FACTOR;
    let mut best: Option<(Decimal, Decimal, TaxCalculationResult)> = None;
    let mut iterations = 0;

    let mut consider = |gross: Decimal, result: TaxCalculationResult| {
        let difference = (result.net_monthly - target).abs();
        let improves = best
            .as_ref()
            .is_none_or(|(_, best_difference, _)| difference < *best_difference);
        if improves {
            best = Some((gross, difference, result));
        }
        difference
    };

    while iterations < MAX_ITERATIONS {
        iterations += 1;

        let mid = ((lower + upper) / Decimal::TWO).round_dp(2);
        let result = evaluate(mid);
        let net = result.net_monthly;
        if consider(mid, result) <= TOLERANCE {
            break;
        }

        if net < target {
            lower = mid;
        } else {
            upper = mid;
        }

        if upper - lower <= TOLERANCE {
            if iterations < MAX_ITERATIONS {
                iterations += 1;
                consider(upper, evaluate(upper));
            }
            break;
        }
    }

    let (required_gross, difference, result) = match best {
        Some(found) => found,
        None => (target, Decimal::ZERO, evaluate(target)),
    };

    debug!(
        target = %target,
        required_gross = %required_gross,
        difference = %difference,
        iterations,
        "Net-to-gross search finished"
    );

    NetToGrossResult {
        required_gross,
        achieved_net: result.net_monthly,
        difference,
        iterations,
        result,
    }
}
