//! # Random Number Generation Infrastructure
//!
//! Seeded standard normal draws for Monte Carlo estimation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Every stream is fully determined by its 64-bit seed
//! - **Lazy generation**: [`NormalDraws`] yields variates on demand, so a
//!   shard of any size is simulated without materialising its draws
//! - **Restartability**: A stream is restarted by constructing it again from
//!   the same seed; nothing is shared between streams
//!
//! ## Module Structure
//!
//! - [`PricerRng`]: Seeded PRNG wrapper with single and batch normal generation
//! - [`NormalDraws`]: Finite iterator of standard normal variates
//! - [`antithetic_normals`]: Paired streams `(Z, -Z)` for antithetic sampling
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{NormalDraws, PricerRng};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let first = rng.gen_normal();
//!
//! // A fresh stream with the same seed replays the same variates
//! let replay: Vec<f64> = NormalDraws::new(12345, 3).collect();
//! assert_eq!(replay[0], first);
//! ```

mod prng;
mod sampler;

pub use prng::PricerRng;
pub use sampler::{antithetic_normals, NormalDraws};

#[cfg(test)]
mod tests;
