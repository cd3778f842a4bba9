//! Property-based tests for the calculation core.

use std::sync::LazyLock;

use proptest::prelude::*;
use rust_decimal::Decimal;

use lohn_engine::calculation::{TOLERANCE, complete_tax, gross_from_net, solidarity_tax};
use lohn_engine::config::{ConfigLoader, TaxYearConfig};
use lohn_engine::industry::{SfnBonus, tips_treatment};
use lohn_engine::models::{Region, TaxCalculationParams, TaxClass};
use lohn_engine::special::calculate_sick_pay;

static BUNDLE: LazyLock<TaxYearConfig> = LazyLock::new(|| {
    ConfigLoader::load("./config/de")
        .unwrap()
        .tax_year(2025)
        .unwrap()
        .clone()
});

fn bundle() -> &'static TaxYearConfig {
    &BUNDLE
}

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn tax_class() -> impl Strategy<Value = TaxClass> {
    prop_oneof![
        Just(TaxClass::I),
        Just(TaxClass::II),
        Just(TaxClass::III),
        Just(TaxClass::IV),
        Just(TaxClass::V),
        Just(TaxClass::VI),
    ]
}

fn params(gross_yearly: Decimal, tax_class: TaxClass, childless: bool, east: bool) -> TaxCalculationParams {
    TaxCalculationParams {
        gross_salary_yearly: gross_yearly,
        tax_class,
        childless,
        region: if east { Region::East } else { Region::West },
        ..TaxCalculationParams::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Net plus deductions always reproduces the gross.
    #[test]
    fn prop_deductions_and_net_sum_to_gross(
        gross in 0u64..30_000_000,
        class in tax_class(),
        childless in any::<bool>(),
        east in any::<bool>(),
    ) {
        let config = bundle();
        let result = complete_tax(&params(cents(gross), class, childless, east), config);

        prop_assert_eq!(result.net_yearly + result.total_deductions, result.gross_yearly);
        prop_assert!(result.total_taxes >= Decimal::ZERO);
        prop_assert!(result.employer_costs >= result.gross_yearly);
    }

    /// The solver lands within one cent of any reachable target.
    #[test]
    fn prop_net_to_gross_meets_tolerance(
        target in 0u64..800_000,
        class in tax_class(),
        childless in any::<bool>(),
    ) {
        let config = bundle();
        let base = params(Decimal::ZERO, class, childless, false);
        let found = gross_from_net(cents(target), &base, config);

        prop_assert!(found.difference <= TOLERANCE);
        prop_assert!(found.required_gross >= found.achieved_net - TOLERANCE);
    }

    /// A higher wage tax never yields a lower solidarity surcharge.
    #[test]
    fn prop_solidarity_is_monotone(a in 0u64..10_000_000, b in 0u64..10_000_000) {
        let config = bundle();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let solidarity = &config.tax.solidarity;

        prop_assert!(
            solidarity_tax(cents(low), solidarity) <= solidarity_tax(cents(high), solidarity)
        );
    }

    /// Tips split completely into a tax-free and a taxable part.
    #[test]
    fn prop_tips_split_is_complete(amount in 0u64..1_000_000, from_employer in any::<bool>()) {
        let tips = tips_treatment(cents(amount), from_employer);

        prop_assert_eq!(tips.tax_free + tips.taxable, tips.amount);
        if from_employer {
            prop_assert_eq!(tips.tax_free, Decimal::ZERO);
        } else {
            prop_assert_eq!(tips.taxable, Decimal::ZERO);
        }
    }

    /// SFN bonuses never grow past the bonus on the capped hourly rate.
    #[test]
    fn prop_sfn_bonus_uses_capped_rate(
        hours in 0u64..20_000,
        hourly_rate in 0u64..15_000,
        rate in prop_oneof![Just(25u32), Just(40), Just(50), Just(125), Just(150)],
    ) {
        let config = bundle();
        let cap = config.sfn.base_rate_cap;
        let bonus = SfnBonus::compute(cents(hours), cents(hourly_rate), Decimal::from(rate), cap);

        prop_assert!(bonus.base_rate <= cap);
        prop_assert!(bonus.amount >= Decimal::ZERO);
        prop_assert!(
            bonus.amount <= cents(hours) * cap * Decimal::from(rate) / Decimal::ONE_HUNDRED
        );
    }

    /// Sick pay never exceeds 70 % of the daily gross or 90 % of the daily net.
    #[test]
    fn prop_sick_pay_is_bounded(gross_monthly in 60_000u64..1_500_000, days in 0u64..60) {
        let config = bundle();
        let start = chrono::NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let end = start + chrono::Days::new(days);
        let monthly = cents(gross_monthly);
        let record = calculate_sick_pay(
            &params(monthly * Decimal::from(12), TaxClass::I, false, false),
            start,
            end,
            config,
        );

        let gross_cap = record.daily_gross * Decimal::from(70) / Decimal::ONE_HUNDRED;
        let net_cap = record.daily_net * Decimal::from(90) / Decimal::ONE_HUNDRED;

        prop_assert!(record.pay_per_day <= gross_cap.min(net_cap));
        prop_assert_eq!(record.total, record.pay_per_day * Decimal::from(record.days));
    }
}
