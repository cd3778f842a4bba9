//! Payroll engine for German employment contracts
//!
//! This crate computes wage tax, solidarity surcharge, church tax and social
//! insurance for a yearly gross salary, inverts that calculation to find the
//! gross for a target net, and layers statutory special payments (sick pay,
//! maternity and parental benefits, short-time work) and industry supplements
//! (construction, gastronomy, nursing) on top. Rates are loaded per tax year
//! from YAML bundles and the calculators are exposed over an axum API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod industry;
pub mod models;
pub mod special;
