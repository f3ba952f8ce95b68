//! Error types for structured error handling.
//!
//! This module provides:
//! - `ParameterDomainError`: a pricing parameter violates its domain

use thiserror::Error;

/// Pricing parameter domain violations.
///
/// Raised by [`PricingParameters`](super::PricingParameters) constructors
/// before any sampling work is performed. Never retried.
///
/// # Variants
/// - `NonPositiveSpot`: S₀ ≤ 0
/// - `NonPositiveStrike`: K ≤ 0
/// - `NonPositiveMaturity`: T ≤ 0
/// - `NegativeRate`: r < 0
/// - `NonPositiveVolatility`: σ ≤ 0
/// - `NonFinite`: any parameter is NaN or infinite
///
/// # Examples
/// ```
/// use pricer_core::types::ParameterDomainError;
///
/// let err = ParameterDomainError::NonPositiveSpot { spot: -1.0 };
/// assert_eq!(format!("{}", err), "Initial price S0 must be positive, got -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterDomainError {
    /// Initial asset price is not strictly positive.
    #[error("Initial price S0 must be positive, got {spot}")]
    NonPositiveSpot {
        /// The rejected spot price
        spot: f64,
    },

    /// Strike is not strictly positive.
    #[error("Strike K must be positive, got {strike}")]
    NonPositiveStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Time to maturity is not strictly positive.
    #[error("Maturity T must be positive, got {maturity}")]
    NonPositiveMaturity {
        /// The rejected maturity in years
        maturity: f64,
    },

    /// Risk-free rate is negative.
    #[error("Risk-free rate r must be non-negative, got {rate}")]
    NegativeRate {
        /// The rejected rate
        rate: f64,
    },

    /// Volatility is not strictly positive.
    #[error("Volatility sigma must be positive, got {volatility}")]
    NonPositiveVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Parameter is NaN or infinite.
    #[error("Parameter '{name}' must be finite, got {value}")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}
