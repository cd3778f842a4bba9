//! Configuration loading and management for the payroll engine.
//!
//! Every rate, ceiling, threshold and tariff table lives in a YAML bundle per
//! tax year, so new years need no code changes.
//!
//! # Example
//!
//! ```no_run
//! use lohn_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/de").unwrap();
//! println!("Loaded rule set: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AssessmentCeilings, CareInsuranceRates, ConstructionConfig, ContributionRates, EngineConfig,
    EngineMetadata, GastronomyConfig, GastronomySfnRates, HazardRates, MaternityConfig,
    MealValues, MidijobConfig, MinijobConfig, NursingConfig, NursingSfnRates, RegionalCeilings,
    RegionalRate, SfnConfig, ShiftAllowanceRates, ShortTimeWorkConfig, SickPayConfig,
    SocialInsuranceConfig, SolidarityConfig, SpecialPaymentsConfig, TariffWageTable, TaxConfig,
    TaxYearConfig, TierRates, TradeGroupWages, WageTaxRow, WageTaxTable,
};
