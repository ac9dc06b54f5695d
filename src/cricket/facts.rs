//! Cricket match facts derived from a result document plus player statistics

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::document::CricketResultDocument;
use crate::error::{EvaluatorError, FormatError};
use crate::models::TeamSide;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingStats {
    pub runs: u32,
    pub balls: u32,
    pub strike_rate: f64,
    /// Fours hit
    pub boundaries: u32,
    pub sixes: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BowlingStats {
    pub overs: f64,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub economy: f64,
}

/// Player-level data that the result document does not carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub batting: BTreeMap<String, BattingStats>,
    pub bowling: BTreeMap<String, BowlingStats>,
    /// Explicit player -> side assignment
    pub rosters: BTreeMap<String, TeamSide>,
    pub first_over_runs: Option<u32>,
    pub first_innings_score: Option<u32>,
    pub went_to_super_over: bool,
}

/// Ground truth for settling cricket selections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CricketFacts {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub stadium: String,
    pub city: String,
    pub country: String,
    pub capacity: String,
    pub league_name: String,
    pub match_date: Option<NaiveDate>,
    pub stats: PlayerStats,
}

impl CricketFacts {
    /// Attach player statistics from an external source
    pub fn with_player_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn team_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home_team,
            TeamSide::Away => &self.away_team,
        }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    /// Side a player batted for; players missing from the roster count as away
    pub fn team_of(&self, player: &str) -> TeamSide {
        match self.stats.rosters.get(player) {
            Some(side) => *side,
            None => {
                debug!("No roster entry for {}, counting as away", player);
                TeamSide::Away
            }
        }
    }

    /// Sum a batting statistic per side, returned as (home, away)
    pub fn team_totals<F>(&self, stat: F) -> (u32, u32)
    where
        F: Fn(&BattingStats) -> u32,
    {
        self.stats
            .batting
            .iter()
            .fold((0, 0), |(home, away), (player, batting)| {
                match self.team_of(player) {
                    TeamSide::Home => (home + stat(batting), away),
                    TeamSide::Away => (home, away + stat(batting)),
                }
            })
    }

    /// Batters reaching `runs`, in name order
    pub fn batters_with_at_least(&self, runs: u32) -> Vec<(&str, u32)> {
        self.stats
            .batting
            .iter()
            .filter(|(_, b)| b.runs >= runs)
            .map(|(name, b)| (name.as_str(), b.runs))
            .collect()
    }

    /// Highest individual score; ties resolve to the first name in order
    pub fn top_scorer(&self) -> Option<(&str, u32)> {
        self.stats
            .batting
            .iter()
            .map(|(name, b)| (name.as_str(), b.runs))
            .fold(None, |best, (name, runs)| match best {
                Some((_, best_runs)) if best_runs >= runs => best,
                _ => Some((name, runs)),
            })
    }
}

/// Parse a cricket final score of exactly two dash-separated integers, "home-away"
pub fn parse_score(score: &str) -> Result<(u32, u32), FormatError> {
    let parts: Vec<&str> = score.split('-').collect();
    if parts.len() != 2 {
        return Err(FormatError::InvalidScore(score.to_string()));
    }

    let home: u32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidNumber {
            field: "home score",
            value: parts[0].to_string(),
        })?;
    let away: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidNumber {
            field: "away score",
            value: parts[1].to_string(),
        })?;

    Ok((home, away))
}

/// Parse an RFC3339 timestamp to its calendar date
pub fn parse_match_date(timestamp: &str) -> Result<NaiveDate, FormatError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.date_naive())
        .map_err(|_| FormatError::InvalidTimestamp(timestamp.to_string()))
}

/// Derive match facts from the first result of a cricket result document
///
/// Unparseable scores and timestamps are logged and left at zero / None.
pub fn derive_facts(doc: &CricketResultDocument) -> Result<CricketFacts, EvaluatorError> {
    let result = doc.results.first().ok_or(EvaluatorError::NoResults {
        kind: "cricket result",
    })?;

    let mut facts = CricketFacts {
        home_team: result.home.name.clone(),
        away_team: result.away.name.clone(),
        stadium: result.extra.stadium_data.name.clone(),
        city: result.extra.stadium_data.city.clone(),
        country: result.extra.stadium_data.country.clone(),
        capacity: result.extra.stadium_data.capacity.clone(),
        league_name: result.league.name.clone(),
        ..Default::default()
    };

    if !result.confirmed_at.is_empty() {
        match parse_match_date(&result.confirmed_at) {
            Ok(date) => facts.match_date = Some(date),
            Err(e) => warn!("Error parsing match date: {}", e),
        }
    }

    match parse_score(&result.ss) {
        Ok((home, away)) => {
            facts.home_score = home;
            facts.away_score = away;
        }
        Err(e) => warn!("Failed to parse score: {}", e),
    }

    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cricket::document::CricketResult;
    use crate::models::Team;

    fn result_doc(ss: &str, confirmed_at: &str) -> CricketResultDocument {
        CricketResultDocument {
            success: 1,
            results: vec![CricketResult {
                home: Team {
                    name: "Rajasthan Royals".to_string(),
                    ..Default::default()
                },
                away: Team {
                    name: "Mumbai Indians".to_string(),
                    ..Default::default()
                },
                ss: ss.to_string(),
                confirmed_at: confirmed_at.to_string(),
                ..Default::default()
            }],
        }
    }

    fn batting(runs: u32, boundaries: u32, sixes: u32) -> BattingStats {
        BattingStats {
            runs,
            boundaries,
            sixes,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("160-165"), Ok((160, 165)));
        assert_eq!(parse_score("0-0"), Ok((0, 0)));
        assert!(matches!(
            parse_score("160"),
            Err(FormatError::InvalidScore(_))
        ));
        assert!(matches!(
            parse_score("160-165-1"),
            Err(FormatError::InvalidScore(_))
        ));
        assert!(matches!(
            parse_score("abc-165"),
            Err(FormatError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_derive_facts() {
        let facts = derive_facts(&result_doc("160-165", "2024-04-22T18:00:00Z")).unwrap();
        assert_eq!(facts.home_team, "Rajasthan Royals");
        assert_eq!(facts.home_score, 160);
        assert_eq!(facts.away_score, 165);
        assert_eq!(facts.match_date, NaiveDate::from_ymd_opt(2024, 4, 22));
    }

    #[test]
    fn test_derive_facts_bad_score_is_not_fatal() {
        let facts = derive_facts(&result_doc("160/8", "not a date")).unwrap();
        assert_eq!(facts.home_score, 0);
        assert_eq!(facts.away_score, 0);
        assert_eq!(facts.match_date, None);
        assert_eq!(facts.away_team, "Mumbai Indians");
    }

    #[test]
    fn test_derive_facts_empty_document() {
        let err = derive_facts(&CricketResultDocument::default()).unwrap_err();
        assert!(matches!(err, EvaluatorError::NoResults { .. }));
    }

    #[test]
    fn test_team_totals_use_roster() {
        let mut stats = PlayerStats::default();
        stats.batting.insert("A Home".to_string(), batting(30, 3, 2));
        stats.batting.insert("B Away".to_string(), batting(40, 5, 1));
        stats.batting.insert("C Unknown".to_string(), batting(10, 1, 1));
        stats.rosters.insert("A Home".to_string(), TeamSide::Home);
        stats.rosters.insert("B Away".to_string(), TeamSide::Away);

        let facts = CricketFacts::default().with_player_stats(stats);
        assert_eq!(facts.team_totals(|b| b.sixes), (2, 2));
        assert_eq!(facts.team_totals(|b| b.boundaries), (3, 6));
    }

    #[test]
    fn test_batters_with_at_least() {
        let mut stats = PlayerStats::default();
        stats.batting.insert("Rohit Sharma".to_string(), batting(67, 6, 4));
        stats.batting.insert("Ishan Kishan".to_string(), batting(54, 5, 3));
        stats.batting.insert("Jos Buttler".to_string(), batting(26, 3, 1));

        let facts = CricketFacts::default().with_player_stats(stats);
        let fifties = facts.batters_with_at_least(50);
        assert_eq!(fifties, vec![("Ishan Kishan", 54), ("Rohit Sharma", 67)]);
        assert!(facts.batters_with_at_least(100).is_empty());
        assert_eq!(facts.top_scorer(), Some(("Rohit Sharma", 67)));
    }

    #[test]
    fn test_top_scorer_empty() {
        assert_eq!(CricketFacts::default().top_scorer(), None);
    }
}
