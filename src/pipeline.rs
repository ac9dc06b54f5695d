//! Evaluation Pipeline
//!
//! Run one sport end to end: derive facts from the result document, extract
//! selections from the pre-match document, settle each selection and
//! summarize the lot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::core::strategy::{SelectionStrategy, StrategyKind};
use crate::cricket::{
    self, CricketFacts, CricketPrematchDocument, CricketResultDocument, SimulatedStats,
};
use crate::data::loader::load_document;
use crate::error::{validate_stake, EvaluatorError};
use crate::models::EvaluationResult;
use crate::summary::{
    analyze_by_market, analyze_by_odds_range, summarize, DimensionAnalysis, SummaryTotals,
};
use crate::volleyball::{
    self, VolleyballFacts, VolleyballPrematchDocument, VolleyballResultDocument,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sport {
    Cricket,
    Volleyball,
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Cricket => write!(f, "cricket"),
            Sport::Volleyball => write!(f, "volleyball"),
        }
    }
}

/// Evaluation configuration
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Stake placed on every selection
    pub stake: f64,
    pub strategy: StrategyKind,
    /// Attach simulated player statistics to cricket facts
    pub use_sample_stats: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            stake: 100.0,
            strategy: StrategyKind::Fixed,
            use_sample_stats: true,
        }
    }
}

/// Everything produced by one sport's run
#[derive(Debug, Clone, Serialize)]
pub struct SportReport<F> {
    pub sport: Sport,
    pub facts: F,
    pub evaluations: Vec<EvaluationResult>,
    pub summary: SummaryTotals,
    pub by_market: Vec<DimensionAnalysis>,
    pub by_odds_range: Vec<DimensionAnalysis>,
}

impl<F> SportReport<F> {
    fn new(
        sport: Sport,
        facts: F,
        evaluations: Vec<EvaluationResult>,
        stake_override: Option<f64>,
    ) -> Self {
        let summary = summarize(&evaluations, stake_override);
        info!(
            "{}: {} bets, {} won, P/L {:.2}, ROI {:.2}%",
            sport, summary.total_bets, summary.winning_bets, summary.profit_loss, summary.roi
        );

        Self {
            sport,
            by_market: analyze_by_market(&evaluations),
            by_odds_range: analyze_by_odds_range(&evaluations),
            facts,
            evaluations,
            summary,
        }
    }
}

/// Runs the per-sport pipelines with a shared configuration
pub struct Evaluator {
    pub config: EvaluationConfig,
    cricket_strategy: Box<dyn SelectionStrategy>,
    volleyball_strategy: Box<dyn SelectionStrategy>,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            cricket_strategy: config.strategy.cricket(),
            volleyball_strategy: config.strategy.volleyball(),
            config,
        }
    }

    /// Replace the cricket strategy chosen by the configuration
    pub fn with_cricket_strategy(mut self, strategy: Box<dyn SelectionStrategy>) -> Self {
        self.cricket_strategy = strategy;
        self
    }

    /// Replace the volleyball strategy chosen by the configuration
    pub fn with_volleyball_strategy(mut self, strategy: Box<dyn SelectionStrategy>) -> Self {
        self.volleyball_strategy = strategy;
        self
    }

    pub fn run_cricket(
        &self,
        prematch: &CricketPrematchDocument,
        result: &CricketResultDocument,
    ) -> Result<SportReport<CricketFacts>, EvaluatorError> {
        validate_stake(self.config.stake)?;
        if prematch.results.is_empty() {
            return Err(EvaluatorError::NoResults {
                kind: "cricket pre-match",
            });
        }

        let mut facts = cricket::derive_facts(result)?;
        if self.config.use_sample_stats {
            facts = facts.with_player_stats(SimulatedStats::new().generate());
        }

        let selections = cricket::extract_selections(
            prematch,
            &facts,
            self.cricket_strategy.as_ref(),
            self.config.stake,
        );
        info!(
            "Extracted {} cricket selections using {} strategy",
            selections.len(),
            self.cricket_strategy.name()
        );

        let evaluations = selections
            .iter()
            .map(|s| cricket::evaluate(s, &facts))
            .collect();

        // Cricket reports a flat stake per market
        Ok(SportReport::new(
            Sport::Cricket,
            facts,
            evaluations,
            Some(self.config.stake),
        ))
    }

    pub fn run_cricket_files<P: AsRef<Path>>(
        &self,
        prematch_path: P,
        result_path: P,
    ) -> Result<SportReport<CricketFacts>, EvaluatorError> {
        let prematch: CricketPrematchDocument = load_document(prematch_path)?;
        let result: CricketResultDocument = load_document(result_path)?;
        self.run_cricket(&prematch, &result)
    }

    pub fn run_volleyball(
        &self,
        prematch: &VolleyballPrematchDocument,
        result: &VolleyballResultDocument,
    ) -> Result<SportReport<VolleyballFacts>, EvaluatorError> {
        validate_stake(self.config.stake)?;
        if prematch.results.is_empty() {
            return Err(EvaluatorError::NoResults {
                kind: "volleyball pre-match",
            });
        }

        let facts = volleyball::derive_facts(result)?;
        let selections = volleyball::extract_selections(
            prematch,
            &facts,
            self.volleyball_strategy.as_ref(),
            self.config.stake,
        );
        info!(
            "Extracted {} volleyball selections using {} strategy",
            selections.len(),
            self.volleyball_strategy.name()
        );

        let evaluations = selections
            .iter()
            .map(|s| volleyball::evaluate(s, &facts))
            .collect();

        Ok(SportReport::new(Sport::Volleyball, facts, evaluations, None))
    }

    pub fn run_volleyball_files<P: AsRef<Path>>(
        &self,
        prematch_path: P,
        result_path: P,
    ) -> Result<SportReport<VolleyballFacts>, EvaluatorError> {
        let prematch: VolleyballPrematchDocument = load_document(prematch_path)?;
        let result: VolleyballResultDocument = load_document(result_path)?;
        self.run_volleyball(&prematch, &result)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}
