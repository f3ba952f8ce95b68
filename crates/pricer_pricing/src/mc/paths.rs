//! Terminal price transform under Geometric Brownian Motion.
//!
//! Under the risk-neutral measure the terminal price is sampled exactly, in
//! one step, from a standard normal variate `Z`:
//!
//! ```text
//! S_T = S_0 · exp((r − σ²/2)·T + σ·√T·Z)
//! ```
//!
//! Non-finite inputs propagate through the transform unchanged.

use pricer_core::types::PricingParameters;

/// Terminal price of a single GBM path.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::terminal_price;
///
/// // Z = 0 gives the median path S0 · exp((r − σ²/2)T)
/// let s_t = terminal_price(100.0, 1.0, 0.05, 0.2, 0.0);
/// assert!((s_t - 100.0 * 0.03_f64.exp()).abs() < 1e-12);
/// ```
#[inline]
pub fn terminal_price(spot: f64, maturity: f64, rate: f64, volatility: f64, z: f64) -> f64 {
    let drift = (rate - 0.5 * volatility * volatility) * maturity;
    let diffusion = volatility * maturity.sqrt();
    spot * (drift + diffusion * z).exp()
}

/// Terminal price transform with drift and diffusion precomputed.
///
/// Produces the same values as [`terminal_price`] for the same parameters
/// without recomputing `(r − σ²/2)T` and `σ√T` on every draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmTerminal {
    spot: f64,
    drift: f64,
    diffusion: f64,
}

impl GbmTerminal {
    /// Precomputes the transform for validated parameters.
    pub fn new(params: &PricingParameters) -> Self {
        let volatility = params.volatility();
        Self {
            spot: params.spot(),
            drift: (params.rate() - 0.5 * volatility * volatility) * params.maturity(),
            diffusion: volatility * params.maturity().sqrt(),
        }
    }

    /// Maps a standard normal variate to a terminal price.
    #[inline]
    pub fn terminal(&self, z: f64) -> f64 {
        self.spot * (self.drift + self.diffusion * z).exp()
    }
}
