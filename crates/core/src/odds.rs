//! Implied probability and bookmaker margin for two-way decimal odds.
//!
//! All figures are expressed as percentages. The functions are pure and only
//! defined for decimal odds strictly greater than 1.0; anything else is an
//! [`OddsError::OutOfDomain`].
//!
//! ```text
//! Bookmaker A: Djokovic @ 1.50, Alcaraz @ 2.60
//!
//! implied(1.50) = 66.67%
//! implied(2.60) = 38.46%
//! margin        = 66.67 + 38.46 - 100 = 5.13%
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Errors raised when the calculator is called outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    /// Decimal odds must be strictly greater than 1.0.
    #[error("decimal odds out of domain: {odds} (must be > 1.0)")]
    OutOfDomain {
        /// The offending odds value.
        odds: Decimal,
    },
}

/// Checks that decimal odds are inside the calculator's domain.
///
/// # Errors
/// Returns [`OddsError::OutOfDomain`] when `odds <= 1.0`.
pub fn ensure_in_domain(odds: Decimal) -> Result<Decimal, OddsError> {
    if odds > Decimal::ONE {
        Ok(odds)
    } else {
        Err(OddsError::OutOfDomain { odds })
    }
}

/// Implied probability of decimal odds, as a percentage.
///
/// `implied_probability(odds) = (1 / odds) * 100`
///
/// # Errors
/// Returns [`OddsError::OutOfDomain`] when `odds <= 1.0`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tennis_odds_core::odds::implied_probability;
///
/// assert_eq!(implied_probability(dec!(2.0)).unwrap(), dec!(50));
/// assert!(implied_probability(dec!(0.9)).is_err());
/// ```
pub fn implied_probability(odds: Decimal) -> Result<Decimal, OddsError> {
    let odds = ensure_in_domain(odds)?;
    Ok(Decimal::ONE / odds * dec!(100))
}

/// Two-way overround of a bookmaker's prices, as a percentage.
///
/// `bookmaker_margin(o1, o2) = ((1/o1 + 1/o2) - 1) * 100`
///
/// Zero means a fair book, a positive value is the book's built-in edge and a
/// negative value means backing both sides at these prices is an arbitrage.
///
/// # Errors
/// Returns [`OddsError::OutOfDomain`] when either price is `<= 1.0`.
pub fn bookmaker_margin(odds1: Decimal, odds2: Decimal) -> Result<Decimal, OddsError> {
    let odds1 = ensure_in_domain(odds1)?;
    let odds2 = ensure_in_domain(odds2)?;
    Ok(margin_unchecked(odds1, odds2))
}

/// Margin of prices already known to be in domain.
pub(crate) fn margin_unchecked(odds1: Decimal, odds2: Decimal) -> Decimal {
    (Decimal::ONE / odds1 + Decimal::ONE / odds2 - Decimal::ONE) * dec!(100)
}

/// Sum of the inverse prices, `1/o1 + 1/o2`.
///
/// Below 1.0 the two prices form an arbitrage.
///
/// # Errors
/// Returns [`OddsError::OutOfDomain`] when either price is `<= 1.0`.
pub fn inverse_sum(odds1: Decimal, odds2: Decimal) -> Result<Decimal, OddsError> {
    let odds1 = ensure_in_domain(odds1)?;
    let odds2 = ensure_in_domain(odds2)?;
    Ok(Decimal::ONE / odds1 + Decimal::ONE / odds2)
}
