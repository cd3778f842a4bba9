//! Wage tax, solidarity surcharge, church tax and taxable income.
//!
//! The wage tax comes from a monthly table lookup. Solidarity surcharge and
//! church tax are derived from the yearly wage tax and truncated to whole EUR.

use rust_decimal::Decimal;

use crate::config::{SolidarityConfig, TaxConfig, WageTaxTable};
use crate::models::TaxClass;

use super::percent_of;

/// Looks up the wage tax for a gross amount in the table.
///
/// The first row whose bound is at or above `gross` supplies the tax in the
/// column for `tax_class` (classes I and IV share a column). Above the last
/// row the tax is extrapolated linearly with the slope of the last two rows.
/// Zero or negative gross yields zero.
///
/// # Example
///
/// ```no_run
/// use lohn_engine::calculation::income_tax;
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::models::TaxClass;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let table = &loader.latest().unwrap().tax.wage_tax_table;
/// let tax = income_tax(Decimal::from(4000), TaxClass::I, table);
/// assert_eq!(tax, Decimal::from(454));
/// ```
pub fn income_tax(gross: Decimal, tax_class: TaxClass, table: &WageTaxTable) -> Decimal {
    if gross <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let rows = table.rows();
    if let Some(row) = rows.iter().find(|row| row.up_to >= gross) {
        return row.tax_for(tax_class).max(Decimal::ZERO);
    }

    match rows {
        [.., prev, last] => {
            let slope = (last.tax_for(tax_class) - prev.tax_for(tax_class))
                / (last.up_to - prev.up_to);
            let extrapolated = last.tax_for(tax_class) + (gross - last.up_to) * slope;
            extrapolated.max(Decimal::ZERO)
        }
        [only] => only.tax_for(tax_class).max(Decimal::ZERO),
        [] => Decimal::ZERO,
    }
}

/// Computes the yearly solidarity surcharge.
///
/// Zero while the yearly income tax is below the free threshold, otherwise
/// `floor(income_tax × rate)`.
pub fn solidarity_tax(annual_income_tax: Decimal, config: &SolidarityConfig) -> Decimal {
    if annual_income_tax < config.free_threshold {
        return Decimal::ZERO;
    }
    percent_of(annual_income_tax, config.rate).floor()
}

/// Computes the yearly church tax as `floor(income_tax × rate / 100)`.
///
/// A rate of zero (no church membership) yields zero.
///
/// # Example
///
/// ```
/// use lohn_engine::calculation::church_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(church_tax(Decimal::from(10000), Decimal::from(9)), Decimal::from(900));
/// assert_eq!(church_tax(Decimal::from(10000), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn church_tax(annual_income_tax: Decimal, rate_percent: Decimal) -> Decimal {
    if rate_percent <= Decimal::ZERO || annual_income_tax <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent_of(annual_income_tax, rate_percent).floor()
}

/// Computes the yearly taxable income.
///
/// Gross minus the work-expense and special-expense allowances, the
/// deductible social contributions and the child allowances; floored at zero
/// and truncated to whole EUR.
pub fn taxable_income(
    gross_yearly: Decimal,
    child_allowances: Decimal,
    social_contributions_yearly: Decimal,
    config: &TaxConfig,
) -> Decimal {
    let taxable = gross_yearly
        - config.work_expense_allowance
        - config.special_expense_allowance
        - social_contributions_yearly
        - child_allowances.max(Decimal::ZERO) * config.child_allowance;

    taxable.max(Decimal::ZERO).trunc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, TaxYearConfig, WageTaxRow};
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

    fn row(up_to: &str, tax: &str) -> WageTaxRow {
        WageTaxRow {
            up_to: dec(up_to),
            class_i: dec(tax),
            class_ii: dec(tax),
            class_iii: dec(tax),
            class_v: dec(tax),
            class_vi: dec(tax),
        }
    }

    #[test]
    fn test_lookup_uses_first_row_at_or_above_gross() {
        let table = bundle().tax.wage_tax_table;

        assert_eq!(income_tax(dec("4000"), TaxClass::I, &table), dec("454"));
        assert_eq!(income_tax(dec("3500.01"), TaxClass::I, &table), dec("454"));
        assert_eq!(income_tax(dec("3500"), TaxClass::I, &table), dec("352"));
    }

    #[test]
    fn test_class_iv_shares_class_one_column() {
        let table = bundle().tax.wage_tax_table;
        for gross in ["1800", "3200", "7500"] {
            assert_eq!(
                income_tax(dec(gross), TaxClass::IV, &table),
                income_tax(dec(gross), TaxClass::I, &table)
            );
        }
    }

    #[test]
    fn test_classes_use_their_own_columns() {
        let table = bundle().tax.wage_tax_table;

        assert_eq!(income_tax(dec("3000"), TaxClass::II, &table), dec("186"));
        assert_eq!(income_tax(dec("3000"), TaxClass::III, &table), dec("46"));
        assert_eq!(income_tax(dec("3000"), TaxClass::V, &table), dec("494"));
        assert_eq!(income_tax(dec("3000"), TaxClass::VI, &table), dec("512"));
    }

    #[test]
    fn test_low_income_yields_zero() {
        let table = bundle().tax.wage_tax_table;
        assert_eq!(income_tax(dec("900"), TaxClass::I, &table), Decimal::ZERO);
        assert_eq!(income_tax(Decimal::ZERO, TaxClass::V, &table), Decimal::ZERO);
        assert_eq!(income_tax(dec("-50"), TaxClass::VI, &table), Decimal::ZERO);
    }

    #[test]
    fn test_extrapolates_beyond_last_row() {
        let table = WageTaxTable::new(vec![row("1000", "100"), row("2000", "300")]);

        // slope 0.2 per EUR above 2000
        assert_eq!(income_tax(dec("2500"), TaxClass::I, &table), dec("400"));
        assert_eq!(income_tax(dec("3000"), TaxClass::III, &table), dec("500"));
    }

    #[test]
    fn test_lookup_is_monotonic_across_table() {
        let table = bundle().tax.wage_tax_table;
        for class in TaxClass::ALL {
            let mut previous = Decimal::ZERO;
            let mut gross = dec("0");
            while gross <= dec("20000") {
                let tax = income_tax(gross, class, &table);
                assert!(tax >= previous, "class {} not monotonic at {}", class, gross);
                previous = tax;
                gross += dec("137.5");
            }
        }
    }

    #[test]
    fn test_solidarity_zero_below_threshold() {
        let config = bundle().tax.solidarity;
        assert_eq!(solidarity_tax(dec("19949.99"), &config), Decimal::ZERO);
        assert_eq!(solidarity_tax(dec("5000"), &config), Decimal::ZERO);
    }

    #[test]
    fn test_solidarity_floors_above_threshold() {
        let config = bundle().tax.solidarity;
        // 20000 × 5.5% = 1100
        assert_eq!(solidarity_tax(dec("20000"), &config), dec("1100"));
        // 30001 × 5.5% = 1650.055
        assert_eq!(solidarity_tax(dec("30001"), &config), dec("1650"));
    }

    #[test]
    fn test_church_tax_rates() {
        assert_eq!(church_tax(dec("10000"), dec("9")), dec("900"));
        assert_eq!(church_tax(dec("10000"), dec("8")), dec("800"));
        assert_eq!(church_tax(dec("10000"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(church_tax(dec("1234"), dec("9")), dec("111"));
    }

    #[test]
    fn test_surcharges_on_huge_income_tax_do_not_overflow() {
        let config = bundle().tax.solidarity;

        let church = church_tax(Decimal::MAX, dec("9"));
        assert!(church > Decimal::ZERO && church < Decimal::MAX);
        let solidarity = solidarity_tax(Decimal::MAX, &config);
        assert!(solidarity > Decimal::ZERO && solidarity < Decimal::MAX);
    }

    #[test]
    fn test_taxable_income_subtracts_allowances() {
        let config = bundle().tax;
        // 48000 - 1230 - 36 - 10000 - 9600 = 27134
        assert_eq!(
            taxable_income(dec("48000"), dec("1"), dec("10000"), &config),
            dec("27134")
        );
    }

    #[test]
    fn test_taxable_income_truncates_and_floors() {
        let config = bundle().tax;
        assert_eq!(
            taxable_income(dec("20000.99"), Decimal::ZERO, Decimal::ZERO, &config),
            dec("18734")
        );
        assert_eq!(
            taxable_income(dec("5000"), dec("2"), dec("1000"), &config),
            Decimal::ZERO
        );
    }
}
