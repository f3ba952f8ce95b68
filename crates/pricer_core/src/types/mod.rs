//! Core parameter and error types.
//!
//! This module provides:
//! - `params`: [`PricingParameters`] and [`OptionType`]
//! - `error`: [`ParameterDomainError`]

pub mod error;
pub mod params;

pub use error::ParameterDomainError;
pub use params::{OptionType, PricingParameters};
