//! Ordinary least-squares fits used by convergence diagnostics.

/// Result of a straight-line least-squares fit `y = intercept + slope * x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Coefficient of determination R².
    pub r_squared: f64,
}

/// Fits `y = a + b x` by ordinary least squares.
///
/// Returns `None` when fewer than two points are given, the slices differ in
/// length, or all `x` values coincide.
///
/// # Examples
/// ```
/// use pricer_core::math::regression::linear_fit;
///
/// let fit = linear_fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// ```
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r_squared,
    })
}

/// Slope of `ln(y)` against `ln(x)`.
///
/// For Monte Carlo standard errors against sample counts the expected slope
/// is -0.5. Points with a non-positive coordinate are skipped.
pub fn log_log_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let (log_x, log_y): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter(|&(&x, &y)| x > 0.0 && y > 0.0)
        .map(|(&x, &y)| (x.ln(), y.ln()))
        .unzip();

    linear_fit(&log_x, &log_y).map(|fit| fit.slope)
}
