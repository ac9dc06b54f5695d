//! Cricket document shapes (pre-match odds and match result)

use serde::{Deserialize, Serialize};

use crate::models::{CricketMarket, League, OddsMarket, OddsSection, ScheduleSection, Team};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CricketResultDocument {
    pub success: i64,
    pub results: Vec<CricketResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CricketResult {
    pub id: String,
    pub sport_id: String,
    pub time_status: String,
    pub league: League,
    pub home: Team,
    pub away: Team,
    /// Final score, "home-away"
    pub ss: String,
    pub extra: CricketExtra,
    pub has_lineup: i64,
    pub inplay_created_at: String,
    pub inplay_updated_at: String,
    /// RFC3339 confirmation timestamp
    pub confirmed_at: String,
    pub bet365_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CricketExtra {
    pub stadium_data: StadiumData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StadiumData {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub capacity: String,
    pub googlecoords: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CricketPrematchDocument {
    pub success: i64,
    pub results: Vec<CricketPrematch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CricketPrematch {
    #[serde(rename = "FI")]
    pub fi: String,
    pub event_id: String,
    #[serde(rename = "1st_over")]
    pub first_over: OddsSection,
    pub innings_1: OddsSection,
    pub main: OddsSection,
    #[serde(rename = "match")]
    pub match_markets: OddsSection,
    pub player: OddsSection,
    pub schedule: ScheduleSection,
}

impl CricketPrematch {
    pub fn section(&self, key: &str) -> Option<&OddsSection> {
        match key {
            "1st_over" => Some(&self.first_over),
            "innings_1" => Some(&self.innings_1),
            "main" => Some(&self.main),
            "match" => Some(&self.match_markets),
            "player" => Some(&self.player),
            _ => None,
        }
    }

    /// Locate a market in its period block
    pub fn market(&self, market: CricketMarket) -> Option<&OddsMarket> {
        self.section(market.section())?
            .market(market.document_key())
            .filter(|m| !m.odds.is_empty())
    }
}
