//! Core data models for the payroll engine.
//!
//! This module contains the value objects passed into and returned from the
//! calculators.

mod employee;
mod industry;
mod special_payment;
mod tax;

pub use employee::{
    Employee, EmploymentData, EmploymentType, FederalState, PersonalData, SalaryData, SalaryType,
};
pub use industry::{Industry, MealType, QualificationTier, ShiftType, TradeGroup};
pub use special_payment::{
    MaternityBenefitKind, MaternityBenefitRecord, PaymentStatus, ShortTimeWorkRecord,
    SickPayRecord,
};
pub use tax::{
    DEFAULT_HEALTH_ADDITIONAL_RATE, EmployerContributions, EmploymentRegime, Region,
    SocialContributions, TaxCalculationParams, TaxCalculationResult, TaxClass,
};
