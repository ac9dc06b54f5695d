//! Evaluation Summary
//!
//! Fold settled selections into totals: win rate, stake, returns, profit/loss,
//! ROI and drawdown, plus breakdowns by market and odds range.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::EvaluationResult;

/// Aggregate over a sequence of evaluation results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub total_bets: usize,
    pub winning_bets: usize,
    /// Percentage of winning bets
    pub win_rate: f64,
    pub avg_odds: f64,

    pub total_stake: f64,
    pub total_returns: f64,
    pub profit_loss: f64,
    /// Profit/loss as a percentage of stake
    pub roi: f64,

    pub gross_profit: f64,
    pub gross_loss: f64,
    /// Largest fall of cumulative profit/loss from its running peak
    pub max_drawdown: f64,
}

/// Stake and return of one bet, with an optional flat stake replacing the selection's own
fn stake_and_return(result: &EvaluationResult, stake_override: Option<f64>) -> (f64, f64) {
    let stake = stake_override.unwrap_or(result.selection.stake);
    let returns = if result.won {
        stake * result.selection.odds
    } else {
        0.0
    };
    (stake, returns)
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Summarize evaluation results
///
/// # Arguments
/// * `results` - Settled selections, in evaluation order
/// * `stake_override` - Flat stake per bet used instead of each selection's stake
///
/// # Examples
/// ```
/// use bet_evaluator::summary::summarize;
///
/// let totals = summarize(&[], None);
/// assert_eq!(totals.total_bets, 0);
/// assert_eq!(totals.roi, 0.0);
/// ```
pub fn summarize(results: &[EvaluationResult], stake_override: Option<f64>) -> SummaryTotals {
    if results.is_empty() {
        return SummaryTotals::default();
    }

    let total_bets = results.len();
    let winning_bets = results.iter().filter(|r| r.won).count();
    let avg_odds = results.iter().map(|r| r.selection.odds).sum::<f64>() / total_bets as f64;

    let profits: Vec<f64> = results
        .iter()
        .map(|r| {
            let (stake, returns) = stake_and_return(r, stake_override);
            returns - stake
        })
        .collect();

    let (total_stake, total_returns) = results
        .iter()
        .map(|r| stake_and_return(r, stake_override))
        .fold((0.0, 0.0), |(s, t), (stake, returns)| (s + stake, t + returns));
    let profit_loss = total_returns - total_stake;

    let gross_profit: f64 = profits.iter().filter(|&&p| p > 0.0).sum();
    let gross_loss: f64 = profits.iter().filter(|&&p| p < 0.0).map(|p| p.abs()).sum();

    // Drawdown over the running profit/loss, starting from zero
    let mut cumulative = 0.0;
    let mut peak = 0.0_f64;
    let mut max_drawdown = 0.0_f64;
    for p in &profits {
        cumulative += p;
        peak = peak.max(cumulative);
        max_drawdown = max_drawdown.max(peak - cumulative);
    }

    SummaryTotals {
        total_bets,
        winning_bets,
        win_rate: percentage(winning_bets as f64, total_bets as f64),
        avg_odds,
        total_stake,
        total_returns,
        profit_loss,
        roi: percentage(profit_loss, total_stake),
        gross_profit,
        gross_loss,
        max_drawdown,
    }
}

/// Analysis results by dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAnalysis {
    pub key: String,
    pub bets: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub stake: f64,
    pub profit: f64,
    pub roi: f64,
}

fn analyze_by<F>(results: &[EvaluationResult], key_of: F) -> Vec<DimensionAnalysis>
where
    F: Fn(&EvaluationResult) -> String,
{
    let mut grouped: HashMap<String, Vec<&EvaluationResult>> = HashMap::new();
    for result in results {
        grouped.entry(key_of(result)).or_default().push(result);
    }

    let mut analysis: Vec<DimensionAnalysis> = grouped
        .into_iter()
        .map(|(key, group)| {
            let bets = group.len();
            let wins = group.iter().filter(|r| r.won).count();
            let stake: f64 = group.iter().map(|r| r.selection.stake).sum();
            let profit: f64 = group.iter().map(|r| r.profit_loss).sum();

            DimensionAnalysis {
                key,
                bets,
                wins,
                win_rate: percentage(wins as f64, bets as f64),
                stake,
                profit,
                roi: percentage(profit, stake),
            }
        })
        .collect();

    analysis.sort_by(|a, b| a.key.cmp(&b.key));
    analysis
}

/// Analyze results by market name
pub fn analyze_by_market(results: &[EvaluationResult]) -> Vec<DimensionAnalysis> {
    analyze_by(results, |r| r.selection.market.name())
}

/// Odds bucket matching the risk levels
pub fn odds_range(odds: f64) -> &'static str {
    if odds < 1.5 {
        "short (<1.5)"
    } else if odds < 3.0 {
        "mid (1.5-3)"
    } else {
        "long (>=3)"
    }
}

/// Analyze results by odds range
pub fn analyze_by_odds_range(results: &[EvaluationResult]) -> Vec<DimensionAnalysis> {
    analyze_by(results, |r| odds_range(r.selection.odds).to_string())
}
