//! Numerical building blocks.
//!
//! - [`distributions`]: standard normal CDF/PDF
//! - [`regression`]: least-squares line fits for convergence diagnostics

pub mod distributions;
pub mod regression;

pub use distributions::{norm_cdf, norm_pdf};
pub use regression::{linear_fit, log_log_slope, LinearFit};
