//! Odds Arithmetic
//!
//! Conversions between decimal, American and fractional odds, settlement and
//! the synthetic double-chance price.
//!
//! Decimal odds `d` pay `d` per unit staked (stake included):
//!     American   = +100(d - 1)        when d >= 2.0
//!                = -100 / (d - 1)     when d <  2.0
//!     Fractional = n/g : 100/g        with n = round(100(d - 1)), g = gcd(n, 100)
//!     Implied    = 100 / d            (percent, no margin removal)

use crate::models::RiskLevel;

/// Greatest common divisor by the Euclidean algorithm
///
/// # Examples
/// ```
/// use bet_evaluator::core::odds::gcd;
/// assert_eq!(gcd(48, 18), 6);
/// assert_eq!(gcd(7, 0), 7);
/// ```
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Convert decimal odds to an American odds string ("+150", "-125")
///
/// Returns None when the odds carry no payout (d <= 1).
pub fn decimal_to_american(odds: f64) -> Option<String> {
    if !odds.is_finite() || odds <= 1.0 {
        return None;
    }

    if odds >= 2.0 {
        Some(format!("+{:.0}", (odds - 1.0) * 100.0))
    } else {
        Some(format!("{:.0}", -100.0 / (odds - 1.0)))
    }
}

/// Convert decimal odds to a simplified fractional string ("4/5", "3/2")
pub fn decimal_to_fractional(odds: f64) -> Option<String> {
    if !odds.is_finite() || odds < 1.0 {
        return None;
    }

    let numerator = ((odds - 1.0) * 100.0).round() as u64;
    let denominator = 100u64;
    let divisor = gcd(numerator, denominator);

    Some(format!("{}/{}", numerator / divisor, denominator / divisor))
}

/// Break-even win probability in percent
pub fn implied_probability(odds: f64) -> f64 {
    if odds <= 0.0 {
        return 0.0;
    }
    100.0 / odds
}

/// Combined price for backing both sides of a two-way market
///
/// `1 / (1/home + 1/away)`, truncated (not rounded) to two decimals.
///
/// # Examples
/// ```
/// use bet_evaluator::core::odds::double_chance_odds;
/// assert_eq!(double_chance_odds(2.0, 1.5), Some(0.85));
/// ```
pub fn double_chance_odds(home_odds: f64, away_odds: f64) -> Option<f64> {
    if home_odds <= 0.0 || away_odds <= 0.0 {
        return None;
    }

    let home_probability = 1.0 / home_odds;
    let away_probability = 1.0 / away_odds;
    let combined = 1.0 / (home_probability + away_probability);

    Some((combined * 100.0).trunc() / 100.0)
}

/// Profit/loss and return for a settled stake
pub fn settle(stake: f64, odds: f64, won: bool) -> (f64, f64) {
    if won {
        (stake * (odds - 1.0), stake * odds)
    } else {
        (-stake, 0.0)
    }
}

pub fn risk_level(odds: f64) -> RiskLevel {
    if odds < 1.5 {
        RiskLevel::Low
    } else if odds < 3.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}
