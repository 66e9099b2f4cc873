//! # dealias-fft
//!
//! Transform collaborator for the dealias workspace.
//!
//! Wraps `rustfft` behind an explicit [`Planner`] that caches one plan per
//! distinct shape, hands out engine-owned [`ComplexPlan`], [`StridedPlan`] and
//! [`RealPlan`] objects, and optionally persists the planned shapes ("wisdom")
//! to a JSON file so a later process can warm its cache up front.
//!
//! All transforms are unnormalised. [`Direction::Backward`] uses the
//! `e^{+2πi jk/n}` kernel, [`Direction::Forward`] the `e^{-2πi jk/n}` one.
#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod error;
pub mod plan;
pub mod planner;
pub mod wisdom;

// Re-exports
pub use config::{FftConfig, PlanEffort};
pub use error::FftError;
pub use plan::{ComplexPlan, Direction, RealPlan, StridedPlan};
pub use planner::Planner;
pub use rustfft::num_complex::Complex64;
