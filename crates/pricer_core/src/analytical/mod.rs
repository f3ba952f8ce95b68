//! Analytical reference pricing.
//!
//! - Black-Scholes call/put prices for European options
//! - [`ValidationReport`] for comparing Monte Carlo estimates with the oracle

pub mod black_scholes;
pub mod validation;

pub use black_scholes::{black_scholes_call, black_scholes_price, black_scholes_put, d1_d2};
pub use validation::{ValidationReport, RELATIVE_ERROR_THRESHOLD_PCT, Z_95};
