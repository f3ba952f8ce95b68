//! Comparison of a Monte Carlo estimate against the analytical price.

/// Relative error (in percent) below which an estimate is considered validated.
pub const RELATIVE_ERROR_THRESHOLD_PCT: f64 = 1.0;

/// z-score of the two-sided 95% confidence interval.
pub const Z_95: f64 = 1.96;

/// Outcome of checking an estimate against a reference price.
///
/// # Examples
/// ```
/// use pricer_core::analytical::ValidationReport;
///
/// let report = ValidationReport::new(10.46, 0.0147, 10.4506);
/// assert!(report.within_ci_95);
/// assert!(report.passed());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationReport {
    /// Monte Carlo estimate.
    pub estimate: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Analytical reference price.
    pub reference: f64,
    /// |estimate - reference|
    pub abs_error: f64,
    /// abs_error / reference, in percent.
    pub rel_error_pct: f64,
    /// Whether the reference lies within 1.96 standard errors of the estimate.
    pub within_ci_95: bool,
}

impl ValidationReport {
    /// Builds a report for `estimate ± std_error` against `reference`.
    ///
    /// A zero reference yields an infinite (or NaN) relative error, which
    /// never passes.
    pub fn new(estimate: f64, std_error: f64, reference: f64) -> Self {
        let abs_error = (estimate - reference).abs();
        Self {
            estimate,
            std_error,
            reference,
            abs_error,
            rel_error_pct: abs_error / reference * 100.0,
            within_ci_95: abs_error <= Z_95 * std_error,
        }
    }

    /// True when the relative error is below [`RELATIVE_ERROR_THRESHOLD_PCT`].
    #[inline]
    pub fn passed(&self) -> bool {
        self.rel_error_pct < RELATIVE_ERROR_THRESHOLD_PCT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_errors() {
        let report = ValidationReport::new(10.5, 0.01, 10.0);
        assert_relative_eq!(report.abs_error, 0.5);
        assert_relative_eq!(report.rel_error_pct, 5.0);
        assert!(!report.within_ci_95);
        assert!(!report.passed());
    }

    #[test]
    fn test_zero_reference_never_passes() {
        let report = ValidationReport::new(0.1, 0.01, 0.0);
        assert!(report.rel_error_pct.is_infinite());
        assert!(!report.passed());
    }

    #[test]
    fn test_exact_match() {
        let report = ValidationReport::new(10.0, 0.0, 10.0);
        assert_eq!(report.abs_error, 0.0);
        assert!(report.within_ci_95);
        assert!(report.passed());
    }
}
