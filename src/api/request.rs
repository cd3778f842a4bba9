//! Request types for the payroll engine API.
//!
//! Every request carries an optional `tax_year` selecting the rate bundle;
//! the newest bundle is used when it is absent.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::industry::{ConstructionPayrollInput, GastronomyPayrollInput, NursingPayrollInput};
use crate::models::{Employee, MaternityBenefitKind, Region, TaxCalculationParams, TaxClass};

/// Tax profile without a gross amount.
///
/// Used by endpoints that supply the gross separately or search for it.
/// Every field is optional and defaults like [`TaxCalculationParams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxProfile {
    /// Wage-tax class.
    pub tax_class: TaxClass,
    /// Number of child allowances.
    pub child_allowances: Decimal,
    /// Whether church tax is levied.
    pub church_tax: bool,
    /// Church-tax rate in percent.
    pub church_tax_rate: Decimal,
    /// Health-insurance additional rate in percent.
    pub health_insurance_additional_rate: Decimal,
    /// Legal area.
    pub region: Region,
    /// Whether the employee is childless.
    pub childless: bool,
    /// Age in completed years.
    pub age: u32,
}

impl Default for TaxProfile {
    fn default() -> Self {
        let defaults = TaxCalculationParams::default();
        Self {
            tax_class: defaults.tax_class,
            child_allowances: defaults.child_allowances,
            church_tax: defaults.church_tax,
            church_tax_rate: defaults.church_tax_rate,
            health_insurance_additional_rate: defaults.health_insurance_additional_rate,
            region: defaults.region,
            childless: defaults.childless,
            age: defaults.age,
        }
    }
}

impl TaxProfile {
    /// Builds calculation parameters for a monthly gross.
    pub fn with_gross_monthly(&self, gross_monthly: Decimal) -> TaxCalculationParams {
        TaxCalculationParams {
            gross_salary_yearly: gross_monthly * Decimal::from(12),
            tax_class: self.tax_class,
            child_allowances: self.child_allowances,
            church_tax: self.church_tax,
            church_tax_rate: self.church_tax_rate,
            health_insurance_additional_rate: self.health_insurance_additional_rate,
            region: self.region,
            childless: self.childless,
            age: self.age,
        }
    }
}

/// Request body for `POST /tax/gross-to-net`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossToNetRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Calculation parameters.
    #[serde(flatten)]
    pub params: TaxCalculationParams,
}

/// Request body for `POST /tax/net-to-gross`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetToGrossRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Desired monthly net.
    pub target_net_monthly: Decimal,
    /// Tax profile.
    #[serde(default)]
    pub profile: TaxProfile,
}

/// Request body for `POST /tax/salary-curve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryCurveRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// First monthly gross of the range.
    pub from_monthly: Decimal,
    /// Last monthly gross of the range.
    pub to_monthly: Decimal,
    /// Number of intervals; the curve has `steps + 1` points.
    pub steps: u32,
    /// Tax profile.
    #[serde(default)]
    pub profile: TaxProfile,
}

/// Request body for `POST /employees/tax-params`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxParamsRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Employee record.
    pub employee: Employee,
    /// Date the age is computed for; defaults to today.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Request body for `POST /special/sick-pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SickPayRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Regular monthly gross.
    pub gross_monthly: Decimal,
    /// First day of incapacity.
    pub start_date: NaiveDate,
    /// Last day of incapacity.
    pub end_date: NaiveDate,
    /// Tax profile.
    #[serde(default)]
    pub profile: TaxProfile,
}

/// Request body for `POST /special/maternity`.
///
/// For a protection period either `due_date` or both `start_date` and
/// `end_date` must be given; parental leave always needs both dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaternityRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Benefit kind.
    pub kind: MaternityBenefitKind,
    /// Regular monthly gross.
    pub gross_monthly: Decimal,
    /// Expected delivery date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// First day of the period.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the period.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Tax profile.
    #[serde(default)]
    pub profile: TaxProfile,
}

/// Request body for `POST /special/short-time-work`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortTimeWorkRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Regular monthly gross.
    pub gross_monthly: Decimal,
    /// Contractual hours in the period.
    pub original_hours: Decimal,
    /// Hours actually worked.
    pub reduced_hours: Decimal,
    /// First day of the settlement period.
    pub period_start: NaiveDate,
    /// Last day of the settlement period.
    pub period_end: NaiveDate,
    /// Tax profile.
    #[serde(default)]
    pub profile: TaxProfile,
}

/// Request body for `POST /industry/construction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructionRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Payroll input.
    #[serde(flatten)]
    pub input: ConstructionPayrollInput,
}

/// Request body for `POST /industry/gastronomy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GastronomyRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Payroll input.
    #[serde(flatten)]
    pub input: GastronomyPayrollInput,
}

/// Request body for `POST /industry/nursing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NursingRequest {
    /// Tax year; defaults to the newest bundle.
    #[serde(default)]
    pub tax_year: Option<i32>,
    /// Payroll input.
    #[serde(flatten)]
    pub input: NursingPayrollInput,
}
