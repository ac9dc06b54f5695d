//! Bet Evaluator - Pre-match selection and post-match settlement
//!
//! This library provides:
//! - Odds extraction from cricket and volleyball pre-match documents
//! - Match fact derivation from result documents
//! - Per-market settlement with profit/loss and implied probability
//! - Aggregation into win rate, ROI and per-market breakdowns
//!
//! # Example
//!
//! ```no_run
//! use bet_evaluator::pipeline::{EvaluationConfig, Evaluator};
//!
//! let evaluator = Evaluator::new(EvaluationConfig::default());
//! let report = evaluator
//!     .run_cricket_files("data/cricket_prematch.json", "data/cricket_result.json")
//!     .unwrap();
//! println!("ROI: {:.2}%", report.summary.roi);
//! ```

pub mod core;
pub mod cricket;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod summary;
pub mod volleyball;

// Re-export commonly used types
pub use crate::core::strategy::{FixedPolicy, OutcomeRule, SelectionStrategy, StrategyKind};
pub use error::{EvaluatorError, FormatError};
pub use models::{
    CricketMarket, EvaluationResult, Market, OddsQuote, Selection, TeamSide, VolleyballMarket,
};
pub use pipeline::{EvaluationConfig, Evaluator, Sport, SportReport};
pub use summary::{summarize, SummaryTotals};
