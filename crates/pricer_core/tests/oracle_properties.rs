//! Property-based tests for the Black-Scholes oracle.
//!
//! Verifies no-arbitrage bounds and put-call parity across a broad range of
//! valid parameters.

use pricer_core::analytical::{black_scholes_call, black_scholes_put};
use pricer_core::types::PricingParameters;
use proptest::prelude::*;

fn valid_params() -> impl Strategy<Value = PricingParameters> {
    // Moneyness and total volatility are bounded so that both N(d1) and N(d2)
    // stay well away from double-precision underflow.
    (
        10.0..500.0_f64,
        0.8..1.25_f64,
        0.25..3.0_f64,
        0.0..0.15_f64,
        0.1..0.8_f64,
    )
        .prop_map(|(spot, moneyness, maturity, rate, vol)| {
            PricingParameters::new(spot, spot * moneyness, maturity, rate, vol)
                .expect("strategy only yields valid parameters")
        })
}

proptest! {
    #[test]
    fn call_price_within_no_arbitrage_bounds(params in valid_params()) {
        let price = black_scholes_call(&params);
        let intrinsic = (params.spot() - params.strike() * params.discount_factor()).max(0.0);
        prop_assert!(price > 0.0, "call price {} not positive", price);
        prop_assert!(price < params.spot(), "call price {} not below spot {}", price, params.spot());
        prop_assert!(price >= intrinsic - 1e-9);
    }

    #[test]
    fn put_call_parity_holds(params in valid_params()) {
        let lhs = black_scholes_call(&params) - black_scholes_put(&params);
        let rhs = params.spot() - params.strike() * params.discount_factor();
        prop_assert!((lhs - rhs).abs() < 1e-9 * params.spot().max(params.strike()));
    }

    #[test]
    fn call_price_increases_with_volatility(params in valid_params()) {
        let bumped = PricingParameters::new(
            params.spot(),
            params.strike(),
            params.maturity(),
            params.rate(),
            params.volatility() + 0.05,
        ).unwrap();
        prop_assert!(black_scholes_call(&bumped) >= black_scholes_call(&params) - 1e-12);
    }
}
