//! Volleyball match facts derived from a result document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::document::{VolleyballResult, VolleyballResultDocument};
use crate::error::{EvaluatorError, FormatError};
use crate::models::TeamSide;

/// Sets carried by a result document
pub const SET_COUNT: u8 = 5;

/// Points beyond which a regular set has gone to extra points
const REGULAR_SET_POINTS: u32 = 25;
/// Points beyond which the deciding fifth set has gone to extra points
const DECIDING_SET_POINTS: u32 = 15;

const DEFAULT_BEST_OF: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetFacts {
    /// 1-based set number
    pub number: u8,
    pub home_points: u32,
    pub away_points: u32,
    pub total_points: u32,
    /// None for a tied or unplayed set
    pub winner: Option<TeamSide>,
    pub extra_points: bool,
}

impl SetFacts {
    pub fn new(number: u8, home_points: u32, away_points: u32) -> Self {
        Self {
            number,
            home_points,
            away_points,
            total_points: home_points + away_points,
            winner: set_winner(home_points, away_points),
            extra_points: went_to_extra_points(number, home_points, away_points),
        }
    }

    pub fn is_played(&self) -> bool {
        self.total_points > 0
    }
}

/// Ground truth for settling volleyball selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolleyballFacts {
    pub home_team: String,
    pub away_team: String,
    pub league_name: String,
    pub start_time: Option<DateTime<Utc>>,
    /// Final score as published, "home_sets-away_sets"
    pub final_score: String,
    /// Always `SET_COUNT` entries, set 1 first
    pub sets: Vec<SetFacts>,
    pub total_points: u32,
    pub home_sets: u32,
    pub away_sets: u32,
    pub match_winner: TeamSide,
    /// "<winner code> <max sets>-<min sets>", e.g. "2 3-1"
    pub correct_set_score: String,
    pub total_sets: u32,
    pub max_sets: u32,
}

impl VolleyballFacts {
    /// Facts of a set (1-based)
    pub fn set(&self, number: u8) -> Option<&SetFacts> {
        self.sets.get(usize::from(number).checked_sub(1)?)
    }

    pub fn team_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home_team,
            TeamSide::Away => &self.away_team,
        }
    }

    /// Sets won by the winner and by the loser
    pub fn set_margin(&self) -> (u32, u32) {
        (
            self.home_sets.max(self.away_sets),
            self.home_sets.min(self.away_sets),
        )
    }

    pub fn played_sets(&self) -> impl Iterator<Item = &SetFacts> {
        self.sets.iter().filter(|s| s.is_played())
    }
}

/// Non-numeric point strings count as zero
pub fn parse_points(points: &str) -> u32 {
    points.trim().parse().unwrap_or(0)
}

/// Higher points wins the set; equal points leaves it undecided
pub fn set_winner(home_points: u32, away_points: u32) -> Option<TeamSide> {
    if home_points > away_points {
        Some(TeamSide::Home)
    } else if away_points > home_points {
        Some(TeamSide::Away)
    } else {
        None
    }
}

/// Either side beyond 25 points (15 in the fifth set)
pub fn went_to_extra_points(set: u8, home_points: u32, away_points: u32) -> bool {
    let limit = if set == SET_COUNT {
        DECIDING_SET_POINTS
    } else {
        REGULAR_SET_POINTS
    };
    home_points > limit || away_points > limit
}

/// Split "home_sets-away_sets"; a part that is not a number counts as zero
pub fn parse_set_counts(ss: &str) -> Result<(u32, u32), FormatError> {
    let parts: Vec<&str> = ss.split('-').collect();
    if parts.len() != 2 {
        return Err(FormatError::InvalidScore(ss.to_string()));
    }
    Ok((parse_points(parts[0]), parse_points(parts[1])))
}

/// Parse a unix-epoch string
pub fn parse_start_time(time: &str) -> Result<DateTime<Utc>, FormatError> {
    time.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| FormatError::InvalidTimestamp(time.to_string()))
}

fn collect_sets(result: &VolleyballResult) -> Vec<SetFacts> {
    (1..=SET_COUNT)
        .map(|number| match result.set_score(number) {
            Some(score) => SetFacts::new(
                number,
                parse_points(&score.home),
                parse_points(&score.away),
            ),
            None => SetFacts::new(number, 0, 0),
        })
        .collect()
}

/// Derive match facts from the first result of a volleyball result document
///
/// A malformed final score leaves both set counts at zero, which settles the
/// match winner as the away team.
pub fn derive_facts(doc: &VolleyballResultDocument) -> Result<VolleyballFacts, EvaluatorError> {
    let result = doc.results.first().ok_or(EvaluatorError::NoResults {
        kind: "volleyball result",
    })?;

    let sets = collect_sets(result);
    let total_points = sets.iter().map(|s| s.total_points).sum();

    let (home_sets, away_sets) = parse_set_counts(&result.ss).unwrap_or_else(|e| {
        warn!("Failed to parse set score: {}", e);
        (0, 0)
    });
    let match_winner = if home_sets > away_sets {
        TeamSide::Home
    } else {
        TeamSide::Away
    };

    let max_sets = result.extra.bestofsets.trim().parse().unwrap_or_else(|_| {
        debug!(
            "bestofsets {:?} not a number, assuming {}",
            result.extra.bestofsets, DEFAULT_BEST_OF
        );
        DEFAULT_BEST_OF
    });

    let start_time = if result.time.is_empty() {
        None
    } else {
        parse_start_time(&result.time)
            .map_err(|e| warn!("Error parsing match time: {}", e))
            .ok()
    };

    Ok(VolleyballFacts {
        home_team: result.home.name.clone(),
        away_team: result.away.name.clone(),
        league_name: result.league.name.clone(),
        start_time,
        final_score: result.ss.clone(),
        sets,
        total_points,
        home_sets,
        away_sets,
        match_winner,
        correct_set_score: format!(
            "{} {}-{}",
            match_winner.code(),
            home_sets.max(away_sets),
            home_sets.min(away_sets)
        ),
        total_sets: home_sets + away_sets,
        max_sets,
    })
}
