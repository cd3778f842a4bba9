//! Social-insurance contribution calculation.
//!
//! Contributions are computed on yearly amounts. The regime (minijob, midijob
//! or regular) is selected from the monthly gross.

use rust_decimal::Decimal;

use crate::config::{ContributionRates, MidijobConfig, MinijobConfig, SocialInsuranceConfig};
use crate::models::{
    EmployerContributions, EmploymentRegime, SocialContributions, TaxCalculationParams,
};

use super::percent_of;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const TWO: Decimal = Decimal::TWO;

/// Employee and employer contributions for one gross figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionBreakdown {
    /// The regime that was applied.
    pub regime: EmploymentRegime,
    /// Employee-side contributions, yearly.
    pub employee: SocialContributions,
    /// Employer-side contributions, yearly.
    pub employer: EmployerContributions,
}

/// Monthly contribution bases in the transitional range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidijobBases {
    /// Reduced base for the employee share (BE_AN).
    pub employee_base: Decimal,
    /// Base for the total contribution (BE).
    pub total_base: Decimal,
}

/// Selects the regime for a monthly gross.
///
/// Minijob up to and including the minijob threshold, midijob up to and
/// including the midijob upper bound, regular above.
pub fn classify_regime(gross_monthly: Decimal, config: &SocialInsuranceConfig) -> EmploymentRegime {
    if gross_monthly <= config.minijob.threshold {
        EmploymentRegime::Minijob
    } else if gross_monthly <= config.midijob.upper_bound {
        EmploymentRegime::Midijob
    } else {
        EmploymentRegime::Regular
    }
}

/// Computes the sliding-scale contribution bases (§20 (2a) SGB IV).
///
/// With `G` the minijob threshold, `OG` the upper bound and `F` the yearly
/// factor:
///
/// - `BE_AN = OG / (OG - G) × (AE - G)`
/// - `BE = F × G + (OG / (OG - G) - G / (OG - G) × F) × (AE - G)`
///
/// Both bases equal the gross at the upper bound.
pub fn midijob_bases(
    gross_monthly: Decimal,
    minijob: &MinijobConfig,
    midijob: &MidijobConfig,
) -> MidijobBases {
    let g = minijob.threshold;
    let og = midijob.upper_bound;
    let f = midijob.factor;
    let span = og - g;
    let excess = (gross_monthly - g).max(Decimal::ZERO);

    MidijobBases {
        employee_base: og / span * excess,
        total_base: f * g + (og / span - g / span * f) * excess,
    }
}

/// Health-insurance employee rate: general half plus half the additional rate.
pub fn health_rate(rates: &ContributionRates, additional_rate: Decimal) -> ContributionRates {
    ContributionRates {
        employee: rates.employee + additional_rate / TWO,
        employer: rates.employer + additional_rate / TWO,
    }
}

/// Care-insurance employee rate including the childless surcharge if due.
///
/// The surcharge applies to childless employees from the configured minimum
/// age onwards.
pub fn care_employee_rate(params: &TaxCalculationParams, config: &SocialInsuranceConfig) -> Decimal {
    let care = &config.care;
    if params.childless && params.age >= care.surcharge_min_age {
        care.employee + care.childless_surcharge
    } else {
        care.employee
    }
}

/// Computes employee and employer contributions for the given parameters.
pub fn social_contributions(
    params: &TaxCalculationParams,
    config: &SocialInsuranceConfig,
) -> ContributionBreakdown {
    let gross_yearly = params.gross_salary_yearly.max(Decimal::ZERO);
    let regime = classify_regime(gross_yearly / MONTHS_PER_YEAR, config);

    match regime {
        EmploymentRegime::Minijob => minijob_contributions(gross_yearly, &config.minijob),
        EmploymentRegime::Midijob => midijob_contributions(gross_yearly, params, config),
        EmploymentRegime::Regular => regular_contributions(gross_yearly, params, config),
    }
}

fn minijob_contributions(gross_yearly: Decimal, minijob: &MinijobConfig) -> ContributionBreakdown {
    ContributionBreakdown {
        regime: EmploymentRegime::Minijob,
        employee: SocialContributions::default(),
        employer: EmployerContributions {
            pension: percent_of(gross_yearly, minijob.employer_pension),
            unemployment: Decimal::ZERO,
            health: percent_of(gross_yearly, minijob.employer_health),
            care: Decimal::ZERO,
            flat_tax: percent_of(gross_yearly, minijob.employer_flat_tax),
        },
    }
}

fn regular_contributions(
    gross_yearly: Decimal,
    params: &TaxCalculationParams,
    config: &SocialInsuranceConfig,
) -> ContributionBreakdown {
    let ceilings = config.ceilings.for_region(params.region);
    let pension_base = gross_yearly.min(ceilings.pension_unemployment);
    let health_base = gross_yearly.min(ceilings.health_care);
    let health = health_rate(&config.health, params.health_insurance_additional_rate);

    ContributionBreakdown {
        regime: EmploymentRegime::Regular,
        employee: SocialContributions {
            pension: percent_of(pension_base, config.pension.employee),
            unemployment: percent_of(pension_base, config.unemployment.employee),
            health: percent_of(health_base, health.employee),
            care: percent_of(health_base, care_employee_rate(params, config)),
        },
        employer: EmployerContributions {
            pension: percent_of(pension_base, config.pension.employer),
            unemployment: percent_of(pension_base, config.unemployment.employer),
            health: percent_of(health_base, health.employer),
            care: percent_of(health_base, config.care.employer),
            flat_tax: Decimal::ZERO,
        },
    }
}

fn midijob_contributions(
    gross_yearly: Decimal,
    params: &TaxCalculationParams,
    config: &SocialInsuranceConfig,
) -> ContributionBreakdown {
    let monthly = midijob_bases(gross_yearly / MONTHS_PER_YEAR, &config.minijob, &config.midijob);
    let employee_base = monthly.employee_base * MONTHS_PER_YEAR;
    let total_base = monthly.total_base * MONTHS_PER_YEAR;

    // Employer pays the total on BE minus the employee share on BE_AN.
    let employer_share = |rates: &ContributionRates| {
        percent_of(total_base, rates.total()) - percent_of(employee_base, rates.employee)
    };

    let health = health_rate(&config.health, params.health_insurance_additional_rate);
    let care = ContributionRates {
        employee: config.care.employee,
        employer: config.care.employer,
    };

    ContributionBreakdown {
        regime: EmploymentRegime::Midijob,
        employee: SocialContributions {
            pension: percent_of(employee_base, config.pension.employee),
            unemployment: percent_of(employee_base, config.unemployment.employee),
            health: percent_of(employee_base, health.employee),
            care: percent_of(employee_base, care_employee_rate(params, config)),
        },
        employer: EmployerContributions {
            pension: employer_share(&config.pension),
            unemployment: employer_share(&config.unemployment),
            health: employer_share(&health),
            care: employer_share(&care),
            flat_tax: Decimal::ZERO,
        },
    }
}
