//! Statutory payroll calculation.
//!
//! This module contains the wage-tax lookup, solidarity surcharge and church
//! tax, social-insurance contributions for the minijob, midijob and regular
//! regimes, the gross-to-net orchestration, the net-to-gross solver, the
//! salary-curve generator and the factory turning an employee record into
//! calculation parameters.

mod gross_to_net;
mod net_to_gross;
mod parameter_factory;
mod salary_curve;
mod social_insurance;
mod wage_tax;

use rust_decimal::Decimal;

pub use gross_to_net::{complete_tax, net_monthly_for};
pub use net_to_gross::{
    MAX_ITERATIONS, MAX_TARGET_NET_MONTHLY, NetToGrossResult, TOLERANCE, gross_from_net,
};
pub use parameter_factory::{age_at, build_tax_params, monthly_gross};
pub use salary_curve::{CurvePoint, SalaryCurve, salary_curve};
pub use social_insurance::{
    ContributionBreakdown, MidijobBases, care_employee_rate, classify_regime, health_rate,
    midijob_bases, social_contributions,
};
pub use wage_tax::{church_tax, income_tax, solidarity_tax, taxable_income};

/// Applies a percentage rate (`9.3` means 9.3 %) to an amount.
///
/// Falls back to dividing first when the product would overflow, and
/// saturates at the `Decimal` bounds after that.
pub(crate) fn percent_of(amount: Decimal, rate_percent: Decimal) -> Decimal {
    match amount.checked_mul(rate_percent) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => (amount / Decimal::ONE_HUNDRED).saturating_mul(rate_percent),
    }
}
