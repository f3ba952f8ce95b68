//! # pricer_pricing: Sharded Monte Carlo Engine (Layer 3)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing estimates European option prices by Monte Carlo under
//! Geometric Brownian Motion, on one thread or across a group of workers:
//! - Seeded standard normal streams (`rng`)
//! - Terminal price transform, payoffs and variance reduction (`mc`)
//! - Streaming statistics, collective sum reduction and finalisation (`mc`)
//!
//! Parameters and the Black-Scholes reference come from `pricer_core`.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::analytical::black_scholes_call;
//! use pricer_core::types::PricingParameters;
//! use pricer_pricing::mc::{estimate_serial, SampleRequest};
//!
//! let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let request = SampleRequest::builder().total_samples(1_000_000).seed(42).build().unwrap();
//!
//! let result = estimate_serial(&params, &request).unwrap();
//! let report = result.validate_against(black_scholes_call(&params));
//! assert!(report.passed());
//! ```
//!
//! ## Reproducibility
//!
//! For a fixed worker count, results are bit-for-bit reproducible: worker
//! `r` draws from seed `base + r` and reductions add contributions in rank
//! order. Different worker counts give statistically consistent, not
//! identical, estimates.
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for requests, strategies and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;
