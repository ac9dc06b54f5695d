//! Core betting arithmetic and selection policy

pub mod handicap;
pub mod odds;
pub mod strategy;

// Re-export commonly used types
pub use handicap::{parse_spread, TotalDirection, TotalLine};
pub use odds::{decimal_to_american, decimal_to_fractional, double_chance_odds, gcd};
pub use strategy::{Favorite, FixedPolicy, Longshot, OutcomeRule, SelectionStrategy, StrategyKind};
