//! Volleyball document shapes (pre-match odds and match result)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{League, OddsMarket, OddsSection, ScheduleSection, Team};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolleyballResultDocument {
    pub success: i64,
    pub results: Vec<VolleyballResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolleyballResult {
    pub id: String,
    pub sport_id: String,
    /// Unix epoch seconds, string-encoded
    pub time: String,
    pub time_status: String,
    pub league: League,
    pub home: Team,
    pub away: Team,
    /// Sets won, "home-away"
    pub ss: String,
    /// Per-set points keyed "1".."5"
    pub scores: BTreeMap<String, SetScore>,
    pub stats: MatchStats,
    pub events: Vec<MatchEvent>,
    pub extra: VolleyballExtra,
    pub inplay_created_at: String,
    pub inplay_updated_at: String,
    pub confirmed_at: String,
    pub bet365_id: String,
}

impl VolleyballResult {
    /// Raw points of a set, if the set appears in the document
    pub fn set_score(&self, set: u8) -> Option<&SetScore> {
        self.scores.get(&set.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetScore {
    pub home: String,
    pub away: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchStats {
    pub points_won_on_serve: Vec<String>,
    pub longest_streak: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchEvent {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolleyballExtra {
    pub home_pos: String,
    pub away_pos: String,
    pub bestofsets: String,
    pub round: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolleyballPrematchDocument {
    pub success: i64,
    pub results: Vec<VolleyballPrematch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolleyballPrematch {
    #[serde(rename = "FI")]
    pub fi: String,
    pub event_id: String,
    pub main: OddsSection,
    pub others: Vec<OddsSection>,
    pub schedule: ScheduleSection,
}

impl VolleyballPrematch {
    /// First non-empty market with this key in `main`
    pub fn main_market(&self, key: &str) -> Option<&OddsMarket> {
        self.main.market(key).filter(|m| !m.odds.is_empty())
    }

    /// First non-empty market with this key across the `others` blocks
    pub fn other_market(&self, key: &str) -> Option<&OddsMarket> {
        self.others
            .iter()
            .filter_map(|section| section.market(key))
            .find(|m| !m.odds.is_empty())
    }
}
