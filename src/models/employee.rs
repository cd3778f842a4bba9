//! Employee aggregate and related types.
//!
//! The aggregate groups personal, employment and salary data the way the
//! payroll administration keeps them. The engine never reads it directly; the
//! parameter factory translates it into [`TaxCalculationParams`].
//!
//! [`TaxCalculationParams`]: super::TaxCalculationParams

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Region;

/// German federal state (Bundesland), serialized by its ISO 3166-2 suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FederalState {
    /// Baden-Württemberg.
    #[serde(rename = "BW")]
    BadenWuerttemberg,
    /// Bavaria.
    #[serde(rename = "BY")]
    Bavaria,
    /// Berlin.
    #[serde(rename = "BE")]
    Berlin,
    /// Brandenburg.
    #[serde(rename = "BB")]
    Brandenburg,
    /// Bremen.
    #[serde(rename = "HB")]
    Bremen,
    /// Hamburg.
    #[serde(rename = "HH")]
    Hamburg,
    /// Hesse.
    #[serde(rename = "HE")]
    Hesse,
    /// Mecklenburg-Western Pomerania.
    #[serde(rename = "MV")]
    MecklenburgWesternPomerania,
    /// Lower Saxony.
    #[serde(rename = "NI")]
    LowerSaxony,
    /// North Rhine-Westphalia.
    #[serde(rename = "NW")]
    NorthRhineWestphalia,
    /// Rhineland-Palatinate.
    #[serde(rename = "RP")]
    RhinelandPalatinate,
    /// Saarland.
    #[serde(rename = "SL")]
    Saarland,
    /// Saxony.
    #[serde(rename = "SN")]
    Saxony,
    /// Saxony-Anhalt.
    #[serde(rename = "ST")]
    SaxonyAnhalt,
    /// Schleswig-Holstein.
    #[serde(rename = "SH")]
    SchleswigHolstein,
    /// Thuringia.
    #[serde(rename = "TH")]
    Thuringia,
}

impl FederalState {
    /// The legal area used for assessment ceilings.
    pub fn region(self) -> Region {
        match self {
            FederalState::Berlin
            | FederalState::Brandenburg
            | FederalState::MecklenburgWesternPomerania
            | FederalState::Saxony
            | FederalState::SaxonyAnhalt
            | FederalState::Thuringia => Region::East,
            FederalState::BadenWuerttemberg
            | FederalState::Bavaria
            | FederalState::Bremen
            | FederalState::Hamburg
            | FederalState::Hesse
            | FederalState::LowerSaxony
            | FederalState::NorthRhineWestphalia
            | FederalState::RhinelandPalatinate
            | FederalState::Saarland
            | FederalState::SchleswigHolstein => Region::West,
        }
    }

    /// Church-tax rate in percent for members of a church.
    pub fn church_tax_rate(self) -> Decimal {
        match self {
            FederalState::Bavaria | FederalState::BadenWuerttemberg => Decimal::from(8),
            _ => Decimal::from(9),
        }
    }
}

/// Personal data relevant for payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalData {
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Tax class as entered on the form (e.g. "1", "III").
    pub tax_class: String,
    /// Whether the employee is a member of a church levying church tax.
    #[serde(default)]
    pub church_member: bool,
    /// Federal state of the workplace.
    pub federal_state: FederalState,
    /// Additional rate of the health-insurance fund in percent.
    #[serde(default)]
    pub health_insurance_additional_rate: Option<Decimal>,
    /// Child allowances registered for wage tax.
    #[serde(default)]
    pub child_allowances: Option<Decimal>,
}

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Marginal employment declared as minijob.
    Minijob,
    /// Employment declared in the transitional range.
    Midijob,
}

/// Employment data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentData {
    /// The declared employment type.
    pub employment_type: EmploymentType,
    /// Contractual weekly hours.
    #[serde(default)]
    pub weekly_hours: Decimal,
    /// Start of employment.
    pub start_date: NaiveDate,
}

/// How the salary amount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryType {
    /// Fixed monthly gross.
    Monthly,
    /// Hourly wage multiplied by contractual hours.
    Hourly,
}

/// Salary data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryData {
    /// Monthly gross or hourly wage depending on `salary_type`.
    pub salary_type: SalaryType,
    /// Amount in EUR.
    pub amount: Decimal,
}

/// Represents an employee as held by the payroll administration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Personal data.
    pub personal: PersonalData,
    /// Employment data.
    pub employment: EmploymentData,
    /// Salary data.
    pub salary: SalaryData,
}

impl Employee {
    /// Returns true if the employee was hired as a minijobber.
    pub fn is_minijob(&self) -> bool {
        self.employment.employment_type == EmploymentType::Minijob
    }
}
