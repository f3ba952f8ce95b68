//! # pricer_core: Foundation for GBM Monte Carlo Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Validated option parameters: `PricingParameters`, `OptionType` (`types`)
//! - Error types: `ParameterDomainError` (`types::error`)
//! - Standard normal distribution and regression helpers (`math`)
//! - Black-Scholes reference prices and validation reports (`analytical`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::analytical::{black_scholes_call, ValidationReport};
//! use pricer_core::types::PricingParameters;
//!
//! let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let reference = black_scholes_call(&params);
//! assert!(reference > 0.0 && reference < params.spot());
//!
//! let report = ValidationReport::new(10.44, 0.015, reference);
//! assert!(report.passed());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for parameters and validation reports

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod math;
pub mod types;
