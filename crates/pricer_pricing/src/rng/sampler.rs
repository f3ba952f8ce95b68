//! Lazy standard normal streams.

use super::PricerRng;

/// Finite, lazily generated stream of standard normal variates.
///
/// Owns its generator, so two streams never share state. Consuming the
/// iterator is the only way to advance it; to replay a stream construct a
/// new one from the same seed.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::NormalDraws;
///
/// let draws = NormalDraws::new(7, 1_000);
/// assert_eq!(draws.len(), 1_000);
///
/// let a: Vec<f64> = NormalDraws::new(7, 10).collect();
/// let b: Vec<f64> = NormalDraws::new(7, 10).collect();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug)]
pub struct NormalDraws {
    rng: PricerRng,
    remaining: usize,
}

impl NormalDraws {
    /// Creates a stream of `len` variates seeded with `seed`.
    pub fn new(seed: u64, len: usize) -> Self {
        Self {
            rng: PricerRng::from_seed(seed),
            remaining: len,
        }
    }

    /// Seed the stream was created from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl Iterator for NormalDraws {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.rng.gen_normal())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for NormalDraws {}

impl std::iter::FusedIterator for NormalDraws {}

/// Generates `n_pairs` antithetic pairs from a single seeded stream.
///
/// Returns `(Z+, Z-)` where `Z+` holds `n_pairs` standard normal variates and
/// `Z-[i] == -Z+[i]` for every `i`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::antithetic_normals;
///
/// let (plus, minus) = antithetic_normals(4, 42);
/// assert_eq!(plus.len(), 4);
/// assert!(plus.iter().zip(&minus).all(|(p, m)| *m == -*p));
/// ```
pub fn antithetic_normals(n_pairs: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut plus = vec![0.0; n_pairs];
    PricerRng::from_seed(seed).fill_normal(&mut plus);
    let minus = plus.iter().map(|z| -z).collect();
    (plus, minus)
}
