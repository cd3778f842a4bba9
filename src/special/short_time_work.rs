//! Short-time work allowance (Kurzarbeitergeld).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{net_monthly_for, percent_of};
use crate::config::{ShortTimeWorkConfig, TaxYearConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{PaymentStatus, ShortTimeWorkRecord, TaxCalculationParams};

/// Reduction of working time as a fraction between 0 and 1.
///
/// Zero when `original_hours` is zero or negative.
pub fn reduction_fraction(original_hours: Decimal, reduced_hours: Decimal) -> Decimal {
    if original_hours <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((original_hours - reduced_hours) / original_hours).clamp(Decimal::ZERO, Decimal::ONE)
}

/// Checks that a working-time reduction qualifies for short-time work.
///
/// Returns the reduction fraction, or a validation error when it is below
/// the configured minimum (10 %).
pub fn validate_short_time_work(
    original_hours: Decimal,
    reduced_hours: Decimal,
    config: &ShortTimeWorkConfig,
) -> EngineResult<Decimal> {
    let reduction = reduction_fraction(original_hours, reduced_hours);
    let reduction_percent = reduction * Decimal::ONE_HUNDRED;

    if reduction_percent < config.minimum_reduction {
        return Err(EngineError::ValidationError {
            field: "reduced_hours".to_string(),
            message: format!(
                "reduction of {}% is below the minimum of {}%",
                reduction_percent.round_dp(2).normalize(),
                config.minimum_reduction.normalize()
            ),
        });
    }

    Ok(reduction)
}

/// Calculates the short-time work allowance for a settlement period.
///
/// The gross loss is the regular gross times the reduction fraction. The net
/// loss is the difference between the net on the full gross and the net on
/// the reduced gross. The allowance is 67 % of the net loss for employees
/// with children and 60 % otherwise.
///
/// This function does not enforce the minimum reduction; call
/// [`validate_short_time_work`] first where eligibility matters.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::models::TaxCalculationParams;
/// use lohn_engine::special::calculate_short_time_work;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let params = TaxCalculationParams::for_yearly_gross(Decimal::from(42000));
/// let record = calculate_short_time_work(
///     &params,
///     Decimal::from(160),
///     Decimal::from(80),
///     NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
///     loader.latest().unwrap(),
/// );
/// assert_eq!(record.reduction, Decimal::new(5, 1));
/// ```
pub fn calculate_short_time_work(
    params: &TaxCalculationParams,
    original_hours: Decimal,
    reduced_hours: Decimal,
    period_start: NaiveDate,
    period_end: NaiveDate,
    config: &TaxYearConfig,
) -> ShortTimeWorkRecord {
    let rules = &config.special_payments.short_time_work;
    let gross_monthly = params.gross_monthly().max(Decimal::ZERO);

    let reduction = reduction_fraction(original_hours, reduced_hours);
    let gross_loss = gross_monthly * reduction;
    let net_loss = (net_monthly_for(gross_monthly, params, config)
        - net_monthly_for(gross_monthly - gross_loss, params, config))
    .max(Decimal::ZERO);

    let benefit_rate = if params.childless {
        rules.rate_without_children
    } else {
        rules.rate_with_children
    };

    ShortTimeWorkRecord {
        id: Uuid::new_v4(),
        period_start,
        period_end,
        original_hours,
        reduced_hours,
        reduction,
        gross_loss,
        net_loss,
        benefit_rate,
        benefit: percent_of(net_loss, benefit_rate),
        status: PaymentStatus::Calculated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::complete_tax;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bundle() -> TaxYearConfig {
        ConfigLoader::load("./config/de")
            .unwrap()
            .tax_year(2025)
            .unwrap()
            .clone()
    }

    fn params(gross_monthly: &str, childless: bool) -> TaxCalculationParams {
        TaxCalculationParams {
            childless,
            age: 40,
            ..TaxCalculationParams::default()
        }
        .with_gross_monthly(dec(gross_monthly))
    }

    #[test]
    fn test_reduction_fraction() {
        assert_eq!(reduction_fraction(dec("160"), dec("120")), dec("0.25"));
        assert_eq!(reduction_fraction(dec("160"), dec("0")), Decimal::ONE);
        assert_eq!(reduction_fraction(Decimal::ZERO, dec("10")), Decimal::ZERO);
        assert_eq!(reduction_fraction(dec("-5"), dec("10")), Decimal::ZERO);
    }

    #[test]
    fn test_validator_rejects_small_reductions() {
        let config = bundle().special_payments.short_time_work;

        match validate_short_time_work(dec("160"), dec("150"), &config) {
            Err(EngineError::ValidationError { field, message }) => {
                assert_eq!(field, "reduced_hours");
                assert!(message.contains("6.25%"), "unexpected message: {}", message);
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validator_accepts_ten_percent() {
        let config = bundle().special_payments.short_time_work;
        assert_eq!(
            validate_short_time_work(dec("100"), dec("90"), &config).unwrap(),
            dec("0.1")
        );
    }

    #[test]
    fn test_benefit_rate_depends_on_children() {
        let config = bundle();
        let start = date(2025, 4, 1);
        let end = date(2025, 4, 30);

        let with_children =
            calculate_short_time_work(&params("3500", false), dec("160"), dec("80"), start, end, &config);
        let childless =
            calculate_short_time_work(&params("3500", true), dec("160"), dec("80"), start, end, &config);

        assert_eq!(with_children.benefit_rate, dec("67"));
        assert_eq!(childless.benefit_rate, dec("60"));
        assert_eq!(with_children.gross_loss, dec("1750"));
    }

    #[test]
    fn test_net_loss_uses_tax_calculator() {
        let config = bundle();
        let params = params("4000", true);
        let record = calculate_short_time_work(
            &params,
            dec("160"),
            dec("120"),
            date(2025, 4, 1),
            date(2025, 4, 30),
            &config,
        );

        let full = complete_tax(&params, &config).net_monthly;
        let reduced = complete_tax(&params.with_gross_monthly(dec("3000")), &config).net_monthly;
        assert_eq!(record.gross_loss, dec("1000"));
        assert_eq!(record.net_loss, full - reduced);
        assert_eq!(record.benefit, record.net_loss * dec("60") / dec("100"));
        assert!(record.net_loss < record.gross_loss);
    }

    #[test]
    fn test_zero_original_hours_yields_no_benefit() {
        let config = bundle();
        let record = calculate_short_time_work(
            &params("3000", false),
            Decimal::ZERO,
            Decimal::ZERO,
            date(2025, 4, 1),
            date(2025, 4, 30),
            &config,
        );

        assert_eq!(record.reduction, Decimal::ZERO);
        assert_eq!(record.benefit, Decimal::ZERO);
    }
}
