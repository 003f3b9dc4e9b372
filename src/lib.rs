//! Comprehensive Ranking System scoring engine.
//!
//! This crate converts raw language-test results to the standardized
//! proficiency scale, scores a candidate profile against administrable point
//! tables, evaluates eligibility for the Express Entry programs, and compares
//! the total with each program's most recent cutoff.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
