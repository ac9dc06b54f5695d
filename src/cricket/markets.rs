//! Cricket odds extraction
//!
//! Walks the eight cricket markets of a pre-match document and asks the
//! selection strategy for one outcome in each.

use tracing::{debug, warn};

use super::document::{CricketPrematch, CricketPrematchDocument};
use super::facts::CricketFacts;
use crate::core::handicap::{TotalDirection, TotalLine};
use crate::core::strategy::SelectionStrategy;
use crate::models::{CricketMarket, Market, OddsQuote, Selection, TeamSide};

/// Extract at most one selection per cricket market
///
/// # Arguments
/// * `doc` - Pre-match document; only the first result is used
/// * `facts` - Match facts, used for team names in labels
/// * `strategy` - Picks the outcome to back in each market
/// * `stake` - Stake attached to every selection
pub fn extract_selections(
    doc: &CricketPrematchDocument,
    facts: &CricketFacts,
    strategy: &dyn SelectionStrategy,
    stake: f64,
) -> Vec<Selection> {
    let Some(prematch) = doc.results.first() else {
        warn!("Cricket pre-match document contains no results");
        return Vec::new();
    };

    CricketMarket::ALL
        .iter()
        .filter_map(|&market| extract_market(prematch, market, facts, strategy, stake))
        .collect()
}

fn extract_market(
    prematch: &CricketPrematch,
    market: CricketMarket,
    facts: &CricketFacts,
    strategy: &dyn SelectionStrategy,
    stake: f64,
) -> Option<Selection> {
    let Some(odds_market) = prematch.market(market) else {
        debug!("Market {} not offered", market.name());
        return None;
    };

    let candidates: Vec<&OddsQuote> = odds_market.odds.iter().collect();
    let available_options = candidates
        .iter()
        .filter_map(|quote| {
            let odds = quote.decimal_odds()?;
            Some(format!("{} @ {:.2}", option_label(market, quote, facts), odds))
        })
        .collect();

    let Some(chosen) = strategy.choose(&Market::Cricket(market), &candidates) else {
        debug!(
            "Strategy {} found no outcome in {}",
            strategy.name(),
            market.name()
        );
        return None;
    };
    let odds = chosen.decimal_odds()?;

    let (label, handicap) = match total_direction(chosen) {
        Some(direction) => (
            direction.to_string(),
            TotalLine::format(direction, &chosen.name),
        ),
        None => (chosen.name.clone(), chosen.handicap().to_string()),
    };

    Some(Selection {
        market: Market::Cricket(market),
        market_id: odds_market.id.clone(),
        description: describe(market, chosen, facts),
        label,
        selection_id: chosen.id.clone(),
        odds,
        handicap,
        stake,
        available_options,
    })
}

/// Over/Under quotes carry the direction in the header and the threshold in the name
fn total_direction(quote: &OddsQuote) -> Option<TotalDirection> {
    match quote.header() {
        "Over" => Some(TotalDirection::Over),
        "Under" => Some(TotalDirection::Under),
        _ => None,
    }
}

fn is_team_market(market: CricketMarket) -> bool {
    matches!(
        market,
        CricketMarket::MatchWinner | CricketMarket::MostSixes | CricketMarket::MostFours
    )
}

fn option_label(market: CricketMarket, quote: &OddsQuote, facts: &CricketFacts) -> String {
    if is_team_market(market) {
        return match TeamSide::from_code(&quote.name) {
            Some(side) if market == CricketMarket::MatchWinner => {
                format!("{} to win", facts.team_name(side))
            }
            Some(side) => facts.team_name(side).to_string(),
            None if market == CricketMarket::MatchWinner => "Draw/Tie".to_string(),
            None => "Tie".to_string(),
        };
    }

    if quote.header().is_empty() {
        quote.name.clone()
    } else {
        format!("{} {}", quote.header(), quote.name)
    }
}

fn describe(market: CricketMarket, quote: &OddsQuote, facts: &CricketFacts) -> String {
    let yes = quote.name.eq_ignore_ascii_case("yes");
    match market {
        CricketMarket::MatchWinner => option_label(market, quote, facts),
        CricketMarket::FirstOverTotalRuns => {
            format!("{} {} runs in first over", quote.header(), quote.name)
        }
        CricketMarket::FirstInningsScore => {
            format!("{} {} runs in first innings", quote.header(), quote.name)
        }
        CricketMarket::FiftyToBeScored if yes => "Yes - A fifty will be scored".to_string(),
        CricketMarket::FiftyToBeScored => "No - A fifty will not be scored".to_string(),
        CricketMarket::SuperOver if yes => "Yes - The match will go to a super over".to_string(),
        CricketMarket::SuperOver => "No - The match will not go to a super over".to_string(),
        CricketMarket::MostSixes => match TeamSide::from_code(&quote.name) {
            Some(side) => format!("{} to hit most sixes", facts.team_name(side)),
            None => "Tie on sixes".to_string(),
        },
        CricketMarket::MostFours => match TeamSide::from_code(&quote.name) {
            Some(side) => format!("{} to hit most fours", facts.team_name(side)),
            None => "Tie on fours".to_string(),
        },
        CricketMarket::HundredToBeScored if yes => "Yes - A hundred will be scored".to_string(),
        CricketMarket::HundredToBeScored => "No - A hundred will not be scored".to_string(),
    }
}
