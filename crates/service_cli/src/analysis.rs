//! Parallel scaling metrics.

/// Serial time over parallel time; infinite when the parallel run took no time.
pub fn speedup(serial_secs: f64, parallel_secs: f64) -> f64 {
    if parallel_secs > 0.0 {
        serial_secs / parallel_secs
    } else {
        f64::INFINITY
    }
}

/// Speedup per worker; zero for an empty group.
pub fn efficiency(speedup: f64, workers: usize) -> f64 {
    if workers == 0 {
        0.0
    } else {
        speedup / workers as f64
    }
}

/// One row of a scaling study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingPoint {
    pub workers: usize,
    pub elapsed_secs: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

impl ScalingPoint {
    /// Relates a run on `workers` workers to the single-worker baseline.
    pub fn new(workers: usize, elapsed_secs: f64, baseline_secs: f64) -> Self {
        let speedup = speedup(baseline_secs, elapsed_secs);
        Self {
            workers,
            elapsed_secs,
            speedup,
            efficiency: efficiency(speedup, workers),
        }
    }
}

/// Parses a comma-separated worker list such as `1,2,4,8`.
pub fn parse_worker_list(list: &str) -> Option<Vec<usize>> {
    let workers = list
        .split(',')
        .map(|s| s.trim().parse::<usize>().ok().filter(|&p| p > 0))
        .collect::<Option<Vec<_>>>()?;
    (!workers.is_empty()).then_some(workers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_speedup_and_efficiency() {
        assert_relative_eq!(speedup(8.0, 2.0), 4.0);
        assert_eq!(speedup(1.0, 0.0), f64::INFINITY);
        assert_relative_eq!(efficiency(4.0, 8), 0.5);
        assert_eq!(efficiency(4.0, 0), 0.0);
    }

    #[test]
    fn test_scaling_point() {
        let point = ScalingPoint::new(4, 2.5, 8.0);
        assert_relative_eq!(point.speedup, 3.2);
        assert_relative_eq!(point.efficiency, 0.8);
    }

    #[test]
    fn test_parse_worker_list() {
        assert_eq!(parse_worker_list("1, 2,4"), Some(vec![1, 2, 4]));
        assert_eq!(parse_worker_list("1,0"), None);
        assert_eq!(parse_worker_list("two"), None);
    }
}
