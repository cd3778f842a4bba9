//! Industry-specific supplemental pay.
//!
//! Each industry module owns its rules and constant tables and is layered on
//! top of a base gross figure. Results carry one field per bonus or allowance
//! category, the total gross and its tax-free/taxable split, with
//! `total = base + categories` and `tax_free + taxable = total`; the
//! [`IndustryPayroll`] trait exposes that split uniformly.

mod construction;
mod gastronomy;
mod nursing;
mod sfn;

use rust_decimal::Decimal;

use crate::models::Industry;

pub use construction::{
    ConstructionPayroll, ConstructionPayrollInput, HazardBonuses, HazardHours, SokaContribution,
    VacationAccount, calculate_construction_payroll, hazard_bonuses, soka_contributions,
    tariff_wage, vacation_account, winter_allowance,
};
pub use gastronomy::{
    GastronomyPayroll, GastronomyPayrollInput, GastronomySfn, GastronomySfnHours, MealBenefits,
    MinijobCheck, TipsTreatment, calculate_gastronomy_payroll, gastronomy_sfn, meal_benefits,
    minijob_overflow_check, tips_treatment,
};
pub use nursing::{
    NursingPayroll, NursingPayrollInput, NursingSfn, NursingSfnHours, ShiftAllowances, ShiftEntry,
    calculate_nursing_payroll, generate_shift_plan, hourly_rate, nursing_sfn, on_call_pay,
    shift_allowances,
};
pub use sfn::{SfnBonus, SfnTaxation, sfn_taxation, sum_bonuses, sunday_hours};

/// Common view over the per-industry payroll results.
pub trait IndustryPayroll {
    /// The industry whose rules produced the result.
    fn industry(&self) -> Industry;

    /// Gross before supplements.
    fn base_gross(&self) -> Decimal;

    /// Base gross plus every supplement.
    fn total_gross(&self) -> Decimal;

    /// Tax-free part of the total.
    fn tax_free(&self) -> Decimal;

    /// Taxable part of the total.
    fn taxable(&self) -> Decimal;

    /// Supplements on top of the base gross.
    fn supplements(&self) -> Decimal {
        self.total_gross() - self.base_gross()
    }
}

macro_rules! impl_industry_payroll {
    ($ty:ty, $industry:expr) => {
        impl IndustryPayroll for $ty {
            fn industry(&self) -> Industry {
                $industry
            }

            fn base_gross(&self) -> Decimal {
                self.base_gross
            }

            fn total_gross(&self) -> Decimal {
                self.total_gross
            }

            fn tax_free(&self) -> Decimal {
                self.tax_free
            }

            fn taxable(&self) -> Decimal {
                self.taxable
            }
        }
    };
}

impl_industry_payroll!(ConstructionPayroll, Industry::Construction);
impl_industry_payroll!(GastronomyPayroll, Industry::Gastronomy);
impl_industry_payroll!(NursingPayroll, Industry::Nursing);
