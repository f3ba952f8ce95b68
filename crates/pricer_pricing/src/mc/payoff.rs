//! European payoffs.

use pricer_core::types::{OptionType, PricingParameters};

/// Positive part that keeps NaN instead of clamping it to zero.
#[inline]
fn positive_part(x: f64) -> f64 {
    if x > 0.0 || x.is_nan() {
        x
    } else {
        0.0
    }
}

/// European call payoff `max(S_T − K, 0)`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::call_payoff;
///
/// assert_eq!(call_payoff(110.0, 100.0), 10.0);
/// assert_eq!(call_payoff(90.0, 100.0), 0.0);
/// ```
#[inline]
pub fn call_payoff(terminal: f64, strike: f64) -> f64 {
    positive_part(terminal - strike)
}

/// European put payoff `max(K − S_T, 0)`.
#[inline]
pub fn put_payoff(terminal: f64, strike: f64) -> f64 {
    positive_part(strike - terminal)
}

/// Payoff of a European option with fixed type and strike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Payoff {
    option_type: OptionType,
    strike: f64,
}

impl Payoff {
    /// Payoff of the option described by `params`.
    pub fn new(params: &PricingParameters) -> Self {
        Self {
            option_type: params.option_type(),
            strike: params.strike(),
        }
    }

    /// Undiscounted payoff at the given terminal price.
    #[inline]
    pub fn evaluate(&self, terminal: f64) -> f64 {
        match self.option_type {
            OptionType::Call => call_payoff(terminal, self.strike),
            OptionType::Put => put_payoff(terminal, self.strike),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_payoff() {
        assert_eq!(call_payoff(120.0, 100.0), 20.0);
        assert_eq!(call_payoff(100.0, 100.0), 0.0);
        assert_eq!(call_payoff(50.0, 100.0), 0.0);
    }

    #[test]
    fn test_put_payoff() {
        assert_eq!(put_payoff(80.0, 100.0), 20.0);
        assert_eq!(put_payoff(100.0, 100.0), 0.0);
        assert_eq!(put_payoff(150.0, 100.0), 0.0);
    }

    #[test]
    fn test_payoff_is_never_negative_zero() {
        assert!(call_payoff(100.0, 100.0).is_sign_positive());
        assert!(put_payoff(100.0, 100.0).is_sign_positive());
    }

    #[test]
    fn test_non_finite_propagates() {
        assert!(call_payoff(f64::NAN, 100.0).is_nan());
        assert!(put_payoff(f64::NAN, 100.0).is_nan());
        assert_eq!(call_payoff(f64::INFINITY, 100.0), f64::INFINITY);
    }

    #[test]
    fn test_payoff_dispatch() {
        let call = PricingParameters::new(100.0, 105.0, 1.0, 0.05, 0.2).unwrap();
        let put = PricingParameters::put(100.0, 105.0, 1.0, 0.05, 0.2).unwrap();
        assert_eq!(Payoff::new(&call).evaluate(110.0), 5.0);
        assert_eq!(Payoff::new(&put).evaluate(100.0), 5.0);
        assert_eq!(Payoff::new(&put).evaluate(110.0), 0.0);
    }
}
