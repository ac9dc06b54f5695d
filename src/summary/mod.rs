//! Aggregation of settled selections

pub mod metrics;

pub use metrics::{
    analyze_by_market, analyze_by_odds_range, odds_range, summarize, DimensionAnalysis,
    SummaryTotals,
};
