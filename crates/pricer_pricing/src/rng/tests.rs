//! Statistical and reproducibility tests for the RNG module.

use super::*;

#[test]
fn test_same_seed_same_sequence() {
    let a: Vec<f64> = NormalDraws::new(42, 256).collect();
    let b: Vec<f64> = NormalDraws::new(42, 256).collect();
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let a: Vec<f64> = NormalDraws::new(42, 16).collect();
    let b: Vec<f64> = NormalDraws::new(43, 16).collect();
    assert_ne!(a, b);
}

#[test]
fn test_draws_match_fill_normal() {
    let mut buffer = vec![0.0; 64];
    PricerRng::from_seed(9).fill_normal(&mut buffer);
    let draws: Vec<f64> = NormalDraws::new(9, 64).collect();
    assert_eq!(buffer, draws);
}

#[test]
fn test_draws_exact_length() {
    let mut draws = NormalDraws::new(1, 3);
    assert_eq!(draws.len(), 3);
    draws.next();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws.by_ref().count(), 2);
    assert_eq!(draws.next(), None);
}

#[test]
fn test_empty_stream() {
    assert_eq!(NormalDraws::new(5, 0).count(), 0);
    let (plus, minus) = antithetic_normals(0, 5);
    assert!(plus.is_empty() && minus.is_empty());
}

#[test]
fn test_seed_reported() {
    assert_eq!(NormalDraws::new(77, 1).seed(), 77);
    assert_eq!(PricerRng::from_seed(77).seed(), 77);
}

#[test]
fn test_normal_moments() {
    let n = 200_000;
    let draws: Vec<f64> = NormalDraws::new(2024, n).collect();
    let mean = draws.iter().sum::<f64>() / n as f64;
    let var = draws.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n as f64;

    // 5 standard errors of the sample mean and variance respectively
    assert!(mean.abs() < 5.0 / (n as f64).sqrt(), "mean = {}", mean);
    assert!((var - 1.0).abs() < 5.0 * (2.0 / n as f64).sqrt(), "var = {}", var);
}

#[test]
fn test_antithetic_pairs_negate_and_anticorrelate() {
    let (plus, minus) = antithetic_normals(10_000, 42);
    assert_eq!(plus.len(), minus.len());
    for (p, m) in plus.iter().zip(&minus) {
        assert_eq!(*m, -*p);
    }

    let n = plus.len() as f64;
    let mean_p = plus.iter().sum::<f64>() / n;
    let mean_m = minus.iter().sum::<f64>() / n;
    let cov: f64 = plus
        .iter()
        .zip(&minus)
        .map(|(p, m)| (p - mean_p) * (m - mean_m))
        .sum();
    let var_p: f64 = plus.iter().map(|p| (p - mean_p).powi(2)).sum();
    let var_m: f64 = minus.iter().map(|m| (m - mean_m).powi(2)).sum();
    assert_eq!(cov / (var_p * var_m).sqrt(), -1.0);
}
