//! Gross-to-net orchestration.
//!
//! Combines the wage-tax lookup, solidarity surcharge, church tax and social
//! contributions into a [`TaxCalculationResult`].

use rust_decimal::Decimal;

use crate::config::TaxYearConfig;
use crate::models::{EmploymentRegime, TaxCalculationParams, TaxCalculationResult};

use super::social_insurance::social_contributions;
use super::wage_tax::{church_tax, income_tax, solidarity_tax, taxable_income};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Calculates the complete gross-to-net result for one employee.
///
/// The wage tax is looked up on the **monthly** gross and multiplied by 12;
/// solidarity surcharge and church tax derive from that yearly figure.
/// Minijobs carry no employee taxes or contributions, so net equals gross.
///
/// # Example
///
/// ```no_run
/// use lohn_engine::calculation::complete_tax;
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::models::{TaxCalculationParams, TaxClass};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let params = TaxCalculationParams {
///     gross_salary_yearly: Decimal::from(48000),
///     tax_class: TaxClass::I,
///     childless: true,
///     ..TaxCalculationParams::default()
/// };
///
/// let result = complete_tax(&params, loader.latest().unwrap());
/// assert!(result.net_yearly < Decimal::from(48000));
/// assert!(result.employer_costs > Decimal::from(48000));
/// ```
pub fn complete_tax(params: &TaxCalculationParams, config: &TaxYearConfig) -> TaxCalculationResult {
    let params = params.normalized();
    let gross_yearly = params.gross_salary_yearly;
    let gross_monthly = gross_yearly / MONTHS_PER_YEAR;

    let contributions = social_contributions(&params, &config.social_insurance);
    let employee = contributions.employee;
    let total_social_contributions = employee.total();

    let (income_tax_monthly, solidarity, church) = match contributions.regime {
        EmploymentRegime::Minijob => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        EmploymentRegime::Midijob | EmploymentRegime::Regular => {
            let monthly = income_tax(gross_monthly, params.tax_class, &config.tax.wage_tax_table);
            let yearly = monthly * MONTHS_PER_YEAR;
            let church_rate = if params.church_tax {
                params.church_tax_rate
            } else {
                Decimal::ZERO
            };
            (
                monthly,
                solidarity_tax(yearly, &config.tax.solidarity),
                church_tax(yearly, church_rate),
            )
        }
    };
    let income_tax_yearly = income_tax_monthly * MONTHS_PER_YEAR;

    let total_taxes = income_tax_yearly + solidarity + church;
    let total_deductions = total_taxes + total_social_contributions;
    let net_yearly = gross_yearly - total_deductions;

    TaxCalculationResult {
        regime: contributions.regime,
        gross_yearly,
        gross_monthly,
        taxable_income: taxable_income(
            gross_yearly,
            params.child_allowances,
            total_social_contributions,
            &config.tax,
        ),
        income_tax: income_tax_yearly,
        income_tax_monthly,
        solidarity_tax: solidarity,
        church_tax: church,
        employee_contributions: employee,
        employer_contributions: contributions.employer,
        total_taxes,
        total_social_contributions,
        total_deductions,
        net_yearly,
        net_monthly: net_yearly / MONTHS_PER_YEAR,
        employer_costs: gross_yearly + contributions.employer.total(),
    }
}

/// Convenience wrapper returning only the monthly net for a monthly gross.
pub fn net_monthly_for(
    gross_monthly: Decimal,
    params: &TaxCalculationParams,
    config: &TaxYearConfig,
) -> Decimal {
    complete_tax(&params.with_gross_monthly(gross_monthly), config).net_monthly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Region, TaxClass};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bundle() -> TaxYearConfig {
        ConfigLoader::load("./config/de")
            .unwrap()
            .tax_year(2025)
            .unwrap()
            .clone()
    }

    fn scenario_params() -> TaxCalculationParams {
        TaxCalculationParams {
            gross_salary_yearly: dec("48000"),
            tax_class: TaxClass::I,
            child_allowances: Decimal::ZERO,
            church_tax: false,
            church_tax_rate: Decimal::ZERO,
            health_insurance_additional_rate: dec("2.5"),
            region: Region::West,
            childless: true,
            age: 35,
        }
    }

    #[test]
    fn test_scenario_48000_class_one_childless() {
        let result = complete_tax(&scenario_params(), &bundle());

        assert_eq!(result.regime, EmploymentRegime::Regular);
        assert!(result.net_yearly < dec("48000"));
        assert!(result.employer_costs > dec("48000"));
        assert!(result.employee_contributions.pension > Decimal::ZERO);
        assert!(result.employee_contributions.unemployment > Decimal::ZERO);
        assert!(result.employee_contributions.health > Decimal::ZERO);
        assert!(result.employee_contributions.care > Decimal::ZERO);

        // 4000/month → 454 monthly wage tax
        assert_eq!(result.income_tax_monthly, dec("454"));
        assert_eq!(result.income_tax, dec("5448"));
        assert_eq!(result.solidarity_tax, Decimal::ZERO);
        // childless surcharge: 2.4% of 48000
        assert_eq!(result.employee_contributions.care, dec("1152"));
        assert_eq!(result.total_social_contributions, dec("10344"));
        assert_eq!(result.net_yearly, dec("32208"));
        assert_eq!(result.net_monthly, dec("2684"));
        assert_eq!(result.employer_costs, dec("58056"));
    }

    #[test]
    fn test_net_plus_deductions_equals_gross() {
        let config = bundle();
        for gross in ["6000", "9000", "20000", "31000", "75000", "180000"] {
            let params = scenario_params().with_gross_yearly(dec(gross));
            let result = complete_tax(&params, &config);
            assert_eq!(result.net_yearly + result.total_deductions, result.gross_yearly);
            assert_eq!(
                result.employer_costs,
                result.gross_yearly + result.employer_contributions.total()
            );
        }
    }

    #[test]
    fn test_minijob_boundary_net_equals_gross() {
        let params = scenario_params().with_gross_monthly(dec("556"));
        let result = complete_tax(&params, &bundle());

        assert_eq!(result.regime, EmploymentRegime::Minijob);
        assert_eq!(result.net_monthly, dec("556"));
        assert_eq!(result.employee_contributions.pension, Decimal::ZERO);
        assert_eq!(result.employee_contributions.unemployment, Decimal::ZERO);
        assert_eq!(result.employee_contributions.health, Decimal::ZERO);
        assert_eq!(result.employee_contributions.care, Decimal::ZERO);
        assert_eq!(result.total_taxes, Decimal::ZERO);
        assert!(result.employer_costs > result.gross_yearly);
    }

    #[test]
    fn test_midijob_uses_sliding_scale() {
        let params = scenario_params().with_gross_monthly(dec("1200"));
        let result = complete_tax(&params, &bundle());

        assert_eq!(result.regime, EmploymentRegime::Midijob);
        let flat_social = dec("14400") * dec("0.2315");
        assert!(result.total_social_contributions < flat_social);
        assert!(result.net_monthly < dec("1200"));
    }

    #[test]
    fn test_wage_tax_uses_monthly_lookup() {
        let config = bundle();
        let params = scenario_params().with_gross_monthly(dec("3600"));
        let result = complete_tax(&params, &config);

        let monthly = income_tax(dec("3600"), TaxClass::I, &config.tax.wage_tax_table);
        assert_eq!(result.income_tax, monthly * dec("12"));
    }

    #[test]
    fn test_church_tax_only_when_enabled() {
        let config = bundle();
        let mut params = scenario_params();
        params.church_tax_rate = dec("9");
        params.church_tax = false;
        assert_eq!(complete_tax(&params, &config).church_tax, Decimal::ZERO);

        params.church_tax = true;
        // floor(5448 × 9%) = 490
        assert_eq!(complete_tax(&params, &config).church_tax, dec("490"));
    }

    #[test]
    fn test_high_income_pays_solidarity() {
        let params = scenario_params().with_gross_monthly(dec("12000"));
        let result = complete_tax(&params, &bundle());

        // 3100 × 12 = 37200 ≥ 19950 → floor(37200 × 5.5%) = 2046
        assert_eq!(result.solidarity_tax, dec("2046"));
    }

    #[test]
    fn test_negative_gross_is_treated_as_zero() {
        let params = scenario_params().with_gross_yearly(dec("-500"));
        let result = complete_tax(&params, &bundle());

        assert_eq!(result.gross_yearly, Decimal::ZERO);
        assert_eq!(result.net_yearly, Decimal::ZERO);
    }

    #[test]
    fn test_net_monthly_for_matches_complete_tax() {
        let config = bundle();
        let params = scenario_params();
        assert_eq!(
            net_monthly_for(dec("4000"), &params, &config),
            complete_tax(&params, &config).net_monthly
        );
    }
}
