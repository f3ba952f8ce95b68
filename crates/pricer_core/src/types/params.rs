//! Validated option and market parameters.
//!
//! [`PricingParameters`] is the single input shared by the Monte Carlo engine
//! and the analytical oracle. It is validated once at construction and is
//! immutable afterwards, so downstream code never re-checks it.

use super::error::ParameterDomainError;

/// European option type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptionType {
    /// Call: max(S_T - K, 0)
    #[default]
    Call,
    /// Put: max(K - S_T, 0)
    Put,
}

impl OptionType {
    /// Lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a European option on a GBM underlying.
///
/// # Invariants
///
/// - `spot > 0`, `strike > 0`, `maturity > 0`, `volatility > 0`
/// - `rate >= 0`
/// - all values finite
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, PricingParameters};
///
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert_eq!(params.option_type(), OptionType::Call);
/// assert!((params.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
///
/// assert!(PricingParameters::new(100.0, 100.0, 1.0, -0.01, 0.2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingParameters {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
}

impl PricingParameters {
    /// Creates validated call option parameters.
    ///
    /// # Arguments
    ///
    /// * `spot` - Initial asset price S₀
    /// * `strike` - Strike K
    /// * `maturity` - Time to maturity T in years
    /// * `rate` - Continuously compounded risk-free rate r
    /// * `volatility` - Annualised volatility σ
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ParameterDomainError`].
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, ParameterDomainError> {
        Self::with_option_type(spot, strike, maturity, rate, volatility, OptionType::Call)
    }

    /// Creates validated put option parameters.
    ///
    /// # Errors
    ///
    /// Same as [`PricingParameters::new`].
    pub fn put(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, ParameterDomainError> {
        Self::with_option_type(spot, strike, maturity, rate, volatility, OptionType::Put)
    }

    /// Creates validated parameters for the given option type.
    ///
    /// # Errors
    ///
    /// Same as [`PricingParameters::new`].
    pub fn with_option_type(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Result<Self, ParameterDomainError> {
        for (name, value) in [
            ("spot", spot),
            ("strike", strike),
            ("maturity", maturity),
            ("rate", rate),
            ("volatility", volatility),
        ] {
            if !value.is_finite() {
                return Err(ParameterDomainError::NonFinite { name, value });
            }
        }

        if spot <= 0.0 {
            return Err(ParameterDomainError::NonPositiveSpot { spot });
        }
        if strike <= 0.0 {
            return Err(ParameterDomainError::NonPositiveStrike { strike });
        }
        if maturity <= 0.0 {
            return Err(ParameterDomainError::NonPositiveMaturity { maturity });
        }
        if rate < 0.0 {
            return Err(ParameterDomainError::NegativeRate { rate });
        }
        if volatility <= 0.0 {
            return Err(ParameterDomainError::NonPositiveVolatility { volatility });
        }

        Ok(Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            option_type,
        })
    }

    /// Initial asset price S₀.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity T in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Present-value discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}
