//! Volleyball odds extraction
//!
//! `game_lines` in `main` holds three markets (winner, handicap, total points)
//! told apart by the shape of each quote. Set markets live in the `others`
//! blocks under `set_<n>_*` keys. Double chance is synthesized from the two
//! match-winner prices.

use tracing::{debug, warn};

use super::document::{VolleyballPrematch, VolleyballPrematchDocument};
use super::facts::{VolleyballFacts, SET_COUNT};
use crate::core::handicap::{is_spread, is_total_line, TotalLine};
use crate::core::odds::double_chance_odds;
use crate::core::strategy::{has_total_line, SelectionStrategy};
use crate::models::{Market, OddsMarket, OddsQuote, Selection, TeamSide, VolleyballMarket};

pub const DOUBLE_CHANCE_MARKET_ID: &str = "custom_double_chance";
pub const DOUBLE_CHANCE_SELECTION_ID: &str = "custom_dc_1";
pub const DOUBLE_CHANCE_LABEL: &str = "1-2";

/// Extract at most one selection per volleyball market
pub fn extract_selections(
    doc: &VolleyballPrematchDocument,
    facts: &VolleyballFacts,
    strategy: &dyn SelectionStrategy,
    stake: f64,
) -> Vec<Selection> {
    let Some(prematch) = doc.results.first() else {
        warn!("Volleyball pre-match document contains no results");
        return Vec::new();
    };

    let extractor = Extractor {
        facts,
        strategy,
        stake,
    };
    let mut selections = Vec::new();

    if let Some(lines) = prematch.main_market("game_lines") {
        selections.extend(extractor.pick(VolleyballMarket::MatchWinner, lines, is_outright));
        selections.extend(extractor.pick(VolleyballMarket::Handicap, lines, |q| {
            !q.header().is_empty() && is_spread(q.handicap()) && !has_total_line(q)
        }));
        selections.extend(extractor.pick(VolleyballMarket::TotalPoints, lines, has_total_line));
    } else {
        debug!("Market game_lines not offered");
    }

    if let Some(market) = prematch.main_market("correct_set_score") {
        selections.extend(extractor.pick(VolleyballMarket::CorrectSetScore, market, |_| true));
    }

    for set in 1..=SET_COUNT {
        if let Some(lines) = prematch.other_market(&format!("set_{}_lines", set)) {
            selections.extend(extractor.pick(VolleyballMarket::SetWinner(set), lines, |q| {
                is_outright(q) && q.name == "Winner"
            }));
            selections.extend(extractor.pick(
                VolleyballMarket::SetTotalPoints(set),
                lines,
                has_total_line,
            ));
        }
        let extra_key = format!("set_{}_to_go_to_extra_points", set);
        if let Some(market) = prematch.other_market(&extra_key) {
            selections.extend(extractor.pick(
                VolleyballMarket::SetExtraPoints(set),
                market,
                |_| true,
            ));
        }
        let parity_key = format!("set_{}_total_odd_even", set);
        if let Some(market) = prematch.other_market(&parity_key) {
            selections.extend(extractor.pick(
                VolleyballMarket::SetTotalOddEven(set),
                market,
                |_| true,
            ));
        }
    }

    let odd_even = prematch
        .other_market("match_total_odd_even")
        .or_else(|| prematch.main_market("match_total_odd_even"));
    if let Some(market) = odd_even {
        selections.extend(extractor.pick(VolleyballMarket::MatchTotalOddEven, market, |_| true));
    }

    selections.extend(extractor.double_chance(prematch));

    selections
}

/// A side pick without a line: header carries the team code
fn is_outright(quote: &OddsQuote) -> bool {
    !quote.header().is_empty() && quote.handicap().is_empty()
}

struct Extractor<'a> {
    facts: &'a VolleyballFacts,
    strategy: &'a dyn SelectionStrategy,
    stake: f64,
}

impl Extractor<'_> {
    fn pick<F>(
        &self,
        market: VolleyballMarket,
        odds_market: &OddsMarket,
        filter: F,
    ) -> Option<Selection>
    where
        F: Fn(&OddsQuote) -> bool,
    {
        let candidates: Vec<&OddsQuote> = odds_market.odds.iter().filter(|q| filter(*q)).collect();
        self.select(market, &odds_market.id, &candidates)
    }

    fn select(
        &self,
        market: VolleyballMarket,
        market_id: &str,
        candidates: &[&OddsQuote],
    ) -> Option<Selection> {
        if candidates.is_empty() {
            debug!("No candidate outcomes for {}", market.name());
            return None;
        }

        let available_options = candidates
            .iter()
            .filter_map(|quote| {
                let odds = quote.decimal_odds()?;
                Some(format!("{} @ {:.2}", label(market, quote), odds))
            })
            .collect();

        let Some(chosen) = self.strategy.choose(&Market::Volleyball(market), candidates) else {
            debug!(
                "Strategy {} found no outcome in {}",
                self.strategy.name(),
                market.name()
            );
            return None;
        };
        let odds = chosen.decimal_odds()?;

        Some(Selection {
            market: Market::Volleyball(market),
            market_id: market_id.to_string(),
            label: label(market, chosen),
            description: self.describe(market, chosen),
            selection_id: chosen.id.clone(),
            odds,
            handicap: chosen.handicap().to_string(),
            stake: self.stake,
            available_options,
        })
    }

    fn double_chance(&self, prematch: &VolleyballPrematch) -> Option<Selection> {
        let lines = prematch.main_market("game_lines")?;
        let price = |side: TeamSide| {
            lines
                .odds
                .iter()
                .find(|q| is_outright(q) && q.header() == side.code())
                .and_then(OddsQuote::decimal_odds)
        };

        let combined = double_chance_odds(price(TeamSide::Home)?, price(TeamSide::Away)?)?;
        let quote = OddsQuote {
            id: DOUBLE_CHANCE_SELECTION_ID.to_string(),
            odds: format!("{:.2}", combined),
            name: DOUBLE_CHANCE_LABEL.to_string(),
            ..Default::default()
        };

        self.select(
            VolleyballMarket::DoubleChance,
            DOUBLE_CHANCE_MARKET_ID,
            &[&quote],
        )
    }

    fn team(&self, code: &str) -> String {
        match TeamSide::from_code(code) {
            Some(side) => self.facts.team_name(side).to_string(),
            None => code.to_string(),
        }
    }

    fn describe(&self, market: VolleyballMarket, quote: &OddsQuote) -> String {
        let total = || match TotalLine::parse(quote.handicap()) {
            Ok(line) => line.to_string(),
            Err(_) => quote.handicap().to_string(),
        };

        match market {
            VolleyballMarket::MatchWinner => format!("{} to win", self.team(quote.header())),
            VolleyballMarket::Handicap => {
                format!("{} {}", self.team(quote.header()), quote.handicap())
            }
            VolleyballMarket::TotalPoints => format!("{} match points", total()),
            VolleyballMarket::CorrectSetScore => {
                format!("{} to win {}", self.team(quote.header()), quote.name)
            }
            VolleyballMarket::SetWinner(set) => {
                format!("{} to win set {}", self.team(quote.header()), set)
            }
            VolleyballMarket::SetTotalPoints(set) => format!("{} points in set {}", total(), set),
            VolleyballMarket::MatchTotalOddEven => format!("{} total match points", quote.name),
            VolleyballMarket::SetExtraPoints(set) => {
                format!("{} - set {} goes to extra points", quote.name, set)
            }
            VolleyballMarket::SetTotalOddEven(set) => {
                format!("{} total points in set {}", quote.name, set)
            }
            VolleyballMarket::DoubleChance => "Either team to win".to_string(),
        }
    }
}

/// Outcome key the evaluator settles against
fn label(market: VolleyballMarket, quote: &OddsQuote) -> String {
    match market {
        VolleyballMarket::MatchWinner
        | VolleyballMarket::Handicap
        | VolleyballMarket::SetWinner(_) => quote.header().to_string(),
        VolleyballMarket::TotalPoints | VolleyballMarket::SetTotalPoints(_)
            if is_total_line(quote.handicap()) =>
        {
            quote.handicap().to_string()
        }
        VolleyballMarket::CorrectSetScore => format!("{} {}", quote.header(), quote.name),
        _ => quote.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::strategy::{FixedPolicy, Longshot};

    const PREMATCH: &str = r#"{
        "success": 1,
        "results": [{
            "FI": "160000001",
            "main": {"sp": {
                "game_lines": {"id": "gl", "odds": [
                    {"id": "w1", "odds": "2.00", "header": "1", "name": "Winner"},
                    {"id": "w2", "odds": "1.50", "header": "2", "name": "Winner"},
                    {"id": "h1", "odds": "1.90", "header": "1", "name": "Handicap", "handicap": "+1.5"},
                    {"id": "h2", "odds": "1.90", "header": "2", "name": "Handicap", "handicap": "-1.5"},
                    {"id": "t1", "odds": "1.85", "header": "1", "name": "Total", "handicap": "O 180.5"},
                    {"id": "t2", "odds": "1.85", "header": "2", "name": "Total", "handicap": "U 180.5"}
                ]},
                "correct_set_score": {"id": "cs", "odds": [
                    {"id": "c1", "odds": "4.50", "header": "1", "name": "3-0"},
                    {"id": "c2", "odds": "4.00", "header": "2", "name": "3-1"},
                    {"id": "c3", "odds": "5.00", "header": "2", "name": "3-2"}
                ]}
            }},
            "others": [
                {"sp": {
                    "set_1_lines": {"id": "s1", "odds": [
                        {"id": "s1w1", "odds": "1.90", "header": "1", "name": "Winner"},
                        {"id": "s1w2", "odds": "1.90", "header": "2", "name": "Winner"},
                        {"id": "s1t1", "odds": "1.83", "header": "1", "name": "Total", "handicap": "O 45.5"},
                        {"id": "s1t2", "odds": "1.83", "header": "2", "name": "Total", "handicap": "U 45.5"}
                    ]},
                    "set_1_to_go_to_extra_points": {"id": "x1", "odds": [
                        {"id": "x1y", "odds": "3.20", "name": "Yes"},
                        {"id": "x1n", "odds": "1.30", "name": "No"}
                    ]},
                    "set_1_total_odd_even": {"id": "p1", "odds": [
                        {"id": "p1o", "odds": "1.90", "name": "Odd"},
                        {"id": "p1e", "odds": "1.90", "name": "Even"}
                    ]},
                    "match_total_odd_even": {"id": "mp", "odds": [
                        {"id": "mpo", "odds": "1.90", "name": "Odd"},
                        {"id": "mpe", "odds": "1.90", "name": "Even"}
                    ]}
                }},
                {"sp": {
                    "set_2_lines": {"id": "s2", "odds": [
                        {"id": "s2w2", "odds": "1.70", "header": "2", "name": "Winner"}
                    ]}
                }}
            ]
        }]
    }"#;

    fn doc() -> VolleyballPrematchDocument {
        serde_json::from_str(PREMATCH).unwrap()
    }

    fn facts() -> VolleyballFacts {
        VolleyballFacts {
            home_team: "Trentino".to_string(),
            away_team: "Perugia".to_string(),
            league_name: String::new(),
            start_time: None,
            final_score: "1-3".to_string(),
            sets: Vec::new(),
            total_points: 0,
            home_sets: 1,
            away_sets: 3,
            match_winner: TeamSide::Away,
            correct_set_score: "2 3-1".to_string(),
            total_sets: 4,
            max_sets: 5,
        }
    }

    fn find(selections: &[Selection], market: VolleyballMarket) -> Option<&Selection> {
        selections
            .iter()
            .find(|s| s.market == Market::Volleyball(market))
    }

    #[test]
    fn test_game_lines_split() {
        let selections = extract_selections(&doc(), &facts(), &FixedPolicy::volleyball(), 100.0);

        let winner = find(&selections, VolleyballMarket::MatchWinner).unwrap();
        assert_eq!(winner.label, "2");
        assert_eq!(winner.odds, 1.50);
        assert_eq!(winner.handicap, "");
        assert_eq!(winner.description, "Perugia to win");
        assert_eq!(winner.available_options, vec!["1 @ 2.00", "2 @ 1.50"]);

        let handicap = find(&selections, VolleyballMarket::Handicap).unwrap();
        assert_eq!(handicap.label, "2");
        assert_eq!(handicap.handicap, "-1.5");

        let total = find(&selections, VolleyballMarket::TotalPoints).unwrap();
        assert_eq!(total.label, "O 180.5");
        assert_eq!(total.handicap, "O 180.5");
        assert_eq!(total.description, "Over 180.5 match points");
    }

    #[test]
    fn test_correct_set_score_and_sets() {
        let selections = extract_selections(&doc(), &facts(), &FixedPolicy::volleyball(), 100.0);

        let correct = find(&selections, VolleyballMarket::CorrectSetScore).unwrap();
        assert_eq!(correct.label, "2 3-1");
        assert_eq!(correct.selection_id, "c2");

        let set1 = find(&selections, VolleyballMarket::SetWinner(1)).unwrap();
        assert_eq!(set1.selection_id, "s1w2");
        let set2 = find(&selections, VolleyballMarket::SetWinner(2)).unwrap();
        assert_eq!(set2.market_id, "s2");
        assert!(find(&selections, VolleyballMarket::SetWinner(3)).is_none());

        let set1_total = find(&selections, VolleyballMarket::SetTotalPoints(1)).unwrap();
        assert_eq!(set1_total.handicap, "O 45.5");

        let extra = find(&selections, VolleyballMarket::SetExtraPoints(1)).unwrap();
        assert_eq!(extra.label, "No");
        let parity = find(&selections, VolleyballMarket::SetTotalOddEven(1)).unwrap();
        assert_eq!(parity.label, "Odd");
        let match_parity = find(&selections, VolleyballMarket::MatchTotalOddEven).unwrap();
        assert_eq!(match_parity.market_id, "mp");
    }

    #[test]
    fn test_double_chance() {
        let selections = extract_selections(&doc(), &facts(), &FixedPolicy::volleyball(), 100.0);

        let dc = find(&selections, VolleyballMarket::DoubleChance).unwrap();
        assert_eq!(dc.market_id, DOUBLE_CHANCE_MARKET_ID);
        assert_eq!(dc.selection_id, DOUBLE_CHANCE_SELECTION_ID);
        assert_eq!(dc.label, "1-2");
        assert!((dc.odds - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_one_selection_per_market() {
        let selections = extract_selections(&doc(), &facts(), &Longshot, 10.0);

        // winner, handicap, total, correct score, set 1 x4, set 2 winner,
        // match parity, double chance
        assert_eq!(selections.len(), 11);
        let correct = find(&selections, VolleyballMarket::CorrectSetScore).unwrap();
        assert_eq!(correct.label, "2 3-2");
        assert!(selections.iter().all(|s| s.stake == 10.0));
    }

    #[test]
    fn test_empty_document() {
        let selections = extract_selections(
            &VolleyballPrematchDocument::default(),
            &facts(),
            &FixedPolicy::volleyball(),
            100.0,
        );
        assert!(selections.is_empty());
    }
}
