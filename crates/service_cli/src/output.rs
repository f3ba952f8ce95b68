//! Console formatting for command summaries.

use pricer_core::analytical::ValidationReport;
use pricer_core::types::PricingParameters;
use pricer_pricing::mc::EstimationResult;

const SEPARATOR_WIDTH: usize = 70;

/// Prints a line of `=` across the summary width.
pub fn print_separator() {
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
}

/// Prints a title framed by separators.
pub fn print_banner(title: &str) {
    print_separator();
    println!("{}", title);
    print_separator();
}

/// Formats an integer with comma thousands separators.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats seconds as `1m 23.45s`, `45.67s` or `12.34ms`.
pub fn format_duration(seconds: f64) -> String {
    if seconds >= 60.0 {
        let minutes = (seconds / 60.0).floor();
        format!("{}m {:.2}s", minutes as u64, seconds - minutes * 60.0)
    } else if seconds >= 1.0 {
        format!("{:.2}s", seconds)
    } else {
        format!("{:.2}ms", seconds * 1e3)
    }
}

/// Prints the option contract.
pub fn print_parameters(params: &PricingParameters) {
    println!("Option:     European {}", params.option_type());
    println!("  S0 = {:.4}, K = {:.4}", params.spot(), params.strike());
    println!(
        "  T = {:.4}, r = {:.4}, sigma = {:.4}",
        params.maturity(),
        params.rate(),
        params.volatility()
    );
}

/// Prints an estimate with its confidence interval and timing.
pub fn print_estimate(result: &EstimationResult) {
    let (lo, hi) = result.confidence_95();
    println!("MC price:   {:.6} ± {:.6}", result.price, result.std_error);
    println!("95% CI:     [{:.6}, {:.6}]", lo, hi);
    println!("Samples:    {}", format_count(result.sample_count));
    println!("Elapsed:    {}", format_duration(result.elapsed_secs()));
    println!("Throughput: {:.0} samples/s", result.throughput());
}

/// Prints the comparison against the analytical price.
pub fn print_validation(report: &ValidationReport) {
    println!("BS price:   {:.6}", report.reference);
    println!("Abs error:  {:.6}", report.abs_error);
    println!("Rel error:  {:.4}%", report.rel_error_pct);
    println!(
        "Within 95% CI: {}",
        if report.within_ci_95 { "yes" } else { "no" }
    );
    println!(
        "Status:     {}",
        if report.passed() { "PASSED" } else { "FAILED" }
    );
}
