//! Black-Scholes closed-form prices for European options.
//!
//! Used as the reference oracle against which Monte Carlo estimates are
//! validated. Pure and stateless.
//!
//! ## Formulas
//!
//! **Call**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! where d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T) and d₂ = d₁ - σ√T.

use crate::math::distributions::norm_cdf;
use crate::types::{OptionType, PricingParameters};

/// Returns `(d1, d2)` for the given parameters.
///
/// Maturity and volatility are strictly positive by construction, so the
/// denominator σ√T never vanishes.
#[inline]
pub fn d1_d2(params: &PricingParameters) -> (f64, f64) {
    let vol_sqrt_t = params.volatility() * params.maturity().sqrt();
    let log_moneyness = (params.spot() / params.strike()).ln();
    let drift = (params.rate() + 0.5 * params.volatility() * params.volatility())
        * params.maturity();
    let d1 = (log_moneyness + drift) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes price of a European call, ignoring `params.option_type()`.
///
/// # Examples
/// ```
/// use pricer_core::analytical::black_scholes_call;
/// use pricer_core::types::PricingParameters;
///
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let price = black_scholes_call(&params);
/// assert!((price - 10.450_583_572_185_565).abs() < 1e-10);
/// ```
pub fn black_scholes_call(params: &PricingParameters) -> f64 {
    let (d1, d2) = d1_d2(params);
    params.spot() * norm_cdf(d1) - params.strike() * params.discount_factor() * norm_cdf(d2)
}

/// Black-Scholes price of a European put, ignoring `params.option_type()`.
///
/// # Examples
/// ```
/// use pricer_core::analytical::black_scholes_put;
/// use pricer_core::types::PricingParameters;
///
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert!((black_scholes_put(&params) - 5.573_526_022_256_971).abs() < 1e-10);
/// ```
pub fn black_scholes_put(params: &PricingParameters) -> f64 {
    let (d1, d2) = d1_d2(params);
    params.strike() * params.discount_factor() * norm_cdf(-d2) - params.spot() * norm_cdf(-d1)
}

/// Black-Scholes price for the option type carried by `params`.
pub fn black_scholes_price(params: &PricingParameters) -> f64 {
    match params.option_type() {
        OptionType::Call => black_scholes_call(params),
        OptionType::Put => black_scholes_put(params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm() -> PricingParameters {
        PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_atm_reference_prices() {
        let params = atm();
        assert_relative_eq!(black_scholes_call(&params), 10.450_583_572_185_565, epsilon = 1e-10);
        assert_relative_eq!(black_scholes_put(&params), 5.573_526_022_256_971, epsilon = 1e-10);
    }

    #[test]
    fn test_put_call_parity() {
        for (spot, strike) in [(80.0, 100.0), (100.0, 100.0), (120.0, 100.0)] {
            let params = PricingParameters::new(spot, strike, 0.75, 0.03, 0.35).unwrap();
            let parity = black_scholes_call(&params) - black_scholes_put(&params);
            let forward_gap = spot - strike * params.discount_factor();
            assert_relative_eq!(parity, forward_gap, epsilon = 1e-12, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_price_dispatches_on_option_type() {
        let call = atm();
        let put = PricingParameters::put(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert_eq!(black_scholes_price(&call), black_scholes_call(&call));
        assert_eq!(black_scholes_price(&put), black_scholes_put(&put));
    }

    #[test]
    fn test_itm_otm_ordering() {
        let itm = PricingParameters::new(100.0, 90.0, 1.0, 0.05, 0.2).unwrap();
        let otm = PricingParameters::new(100.0, 110.0, 1.0, 0.05, 0.2).unwrap();
        assert!(black_scholes_call(&itm) > black_scholes_call(&atm()));
        assert!(black_scholes_call(&atm()) > black_scholes_call(&otm));
    }

    #[test]
    fn test_d1_d2_gap() {
        let params = atm();
        let (d1, d2) = d1_d2(&params);
        assert_relative_eq!(d1 - d2, 0.2, epsilon = 1e-15);
        assert_relative_eq!(d1, 0.35, epsilon = 1e-15);
    }
}
