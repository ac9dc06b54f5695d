use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::core::odds;
use crate::error::validate_odds;

/// One priced outcome within a market, as found in a pre-match document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsQuote {
    pub id: String,
    /// Decimal odds, string-encoded by the feed
    pub odds: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handicap: Option<String>,
}

impl OddsQuote {
    /// Decimal odds if the quote carries a positive, parseable price
    pub fn decimal_odds(&self) -> Option<f64> {
        let value: f64 = self.odds.trim().parse().ok()?;
        validate_odds(value).ok()?;
        Some(value)
    }

    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or("")
    }

    pub fn handicap(&self) -> &str {
        self.handicap.as_deref().unwrap_or("")
    }
}

/// A named market with its priced outcomes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsMarket {
    pub id: String,
    pub name: String,
    pub odds: Vec<OddsQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<i64>,
}

/// A period block of a pre-match document (`main`, `1st_over`, `others[i]`, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsSection {
    pub updated_at: String,
    pub key: String,
    pub sp: HashMap<String, OddsMarket>,
}

impl OddsSection {
    pub fn market(&self, key: &str) -> Option<&OddsMarket> {
        self.sp.get(key)
    }
}

/// Schedule block: a flat list of headline prices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSection {
    pub updated_at: String,
    pub key: String,
    pub sp: ScheduleOdds,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOdds {
    pub main: Vec<OddsQuote>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct League {
    pub id: String,
    pub name: String,
    pub cc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub image_id: String,
    pub cc: String,
}

/// Home or away side, coded "1" / "2" by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn code(&self) -> &'static str {
        match self {
            TeamSide::Home => "1",
            TeamSide::Away => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(TeamSide::Home),
            "2" => Some(TeamSide::Away),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamSide::Home => "Home team",
            TeamSide::Away => "Away team",
        }
    }
}

/// Static confidence tag attached to each cricket market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// Risk bucket derived from the decimal odds of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low Risk"),
            RiskLevel::Medium => write!(f, "Medium Risk"),
            RiskLevel::High => write!(f, "High Risk"),
        }
    }
}

/// Cricket markets evaluated per match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CricketMarket {
    MatchWinner,
    FirstOverTotalRuns,
    FirstInningsScore,
    FiftyToBeScored,
    SuperOver,
    MostSixes,
    MostFours,
    HundredToBeScored,
}

impl CricketMarket {
    pub const ALL: [CricketMarket; 8] = [
        CricketMarket::MatchWinner,
        CricketMarket::FirstOverTotalRuns,
        CricketMarket::FirstInningsScore,
        CricketMarket::FiftyToBeScored,
        CricketMarket::SuperOver,
        CricketMarket::MostSixes,
        CricketMarket::MostFours,
        CricketMarket::HundredToBeScored,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CricketMarket::MatchWinner => "To Win the Match",
            CricketMarket::FirstOverTotalRuns => "1st Over Total Runs",
            CricketMarket::FirstInningsScore => "1st Innings Score",
            CricketMarket::FiftyToBeScored => "A Fifty to be Scored",
            CricketMarket::SuperOver => "To Go to Super Over",
            CricketMarket::MostSixes => "Most Match Sixes",
            CricketMarket::MostFours => "Most Match Fours",
            CricketMarket::HundredToBeScored => "A Hundred to be Scored",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CricketMarket::MatchWinner => "Bet on which team will win the match",
            CricketMarket::FirstOverTotalRuns => {
                "Bet on the total number of runs scored in the first over"
            }
            CricketMarket::FirstInningsScore => {
                "Bet on whether the first innings score will be over or under a specific value"
            }
            CricketMarket::FiftyToBeScored => {
                "Bet on whether any player will score fifty or more runs in the match"
            }
            CricketMarket::SuperOver => "Bet on whether the match will go to a super over",
            CricketMarket::MostSixes => "Bet on which team will hit the most sixes in the match",
            CricketMarket::MostFours => "Bet on which team will hit the most fours in the match",
            CricketMarket::HundredToBeScored => {
                "Bet on whether any player will score a century in the match"
            }
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            CricketMarket::MatchWinner | CricketMarket::FiftyToBeScored => Confidence::High,
            CricketMarket::SuperOver | CricketMarket::HundredToBeScored => Confidence::Low,
            _ => Confidence::Medium,
        }
    }

    /// Period block of the pre-match document holding this market
    pub fn section(&self) -> &'static str {
        match self {
            CricketMarket::FirstOverTotalRuns => "1st_over",
            CricketMarket::FirstInningsScore => "innings_1",
            CricketMarket::MatchWinner => "main",
            _ => "match",
        }
    }

    /// Key of this market inside the section's `sp` map
    pub fn document_key(&self) -> &'static str {
        match self {
            CricketMarket::MatchWinner => "to_win_the_match",
            CricketMarket::FirstOverTotalRuns => "1st_over_total_runs",
            CricketMarket::FirstInningsScore => "1st_innings_score",
            CricketMarket::FiftyToBeScored => "a_fifty_to_be_scored",
            CricketMarket::SuperOver => "to_go_to_super_over?",
            CricketMarket::MostSixes => "most_match_sixes",
            CricketMarket::MostFours => "most_match_fours",
            CricketMarket::HundredToBeScored => "a_hundred_to_be_scored_in_the_match",
        }
    }
}

/// Volleyball markets; set-scoped markets carry the set number (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolleyballMarket {
    MatchWinner,
    Handicap,
    TotalPoints,
    CorrectSetScore,
    SetWinner(u8),
    SetTotalPoints(u8),
    MatchTotalOddEven,
    SetExtraPoints(u8),
    SetTotalOddEven(u8),
    DoubleChance,
}

impl VolleyballMarket {
    pub fn name(&self) -> String {
        match self {
            VolleyballMarket::MatchWinner => "Match Winner".to_string(),
            VolleyballMarket::Handicap => "Handicap".to_string(),
            VolleyballMarket::TotalPoints => "Total Points".to_string(),
            VolleyballMarket::CorrectSetScore => "Correct Set Score".to_string(),
            VolleyballMarket::SetWinner(n) => format!("Set {} Winner", n),
            VolleyballMarket::SetTotalPoints(n) => format!("Set {} Total Points", n),
            VolleyballMarket::MatchTotalOddEven => "Match Total Odd/Even".to_string(),
            VolleyballMarket::SetExtraPoints(n) => format!("Set {} Extra Points", n),
            VolleyballMarket::SetTotalOddEven(n) => format!("Set {} Total Odd/Even", n),
            VolleyballMarket::DoubleChance => "Double Chance".to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            VolleyballMarket::MatchWinner => "Bet on which team will win the match".to_string(),
            VolleyballMarket::Handicap => {
                "Bet on a team after applying a set handicap".to_string()
            }
            VolleyballMarket::TotalPoints => {
                "Bet on total match points over or under a line".to_string()
            }
            VolleyballMarket::CorrectSetScore => "Bet on the exact final set score".to_string(),
            VolleyballMarket::SetWinner(n) => format!("Bet on which team will win set {}", n),
            VolleyballMarket::SetTotalPoints(n) => {
                format!("Bet on set {} points over or under a line", n)
            }
            VolleyballMarket::MatchTotalOddEven => {
                "Bet on whether total match points are odd or even".to_string()
            }
            VolleyballMarket::SetExtraPoints(n) => {
                format!("Bet on whether set {} goes beyond the standard winning score", n)
            }
            VolleyballMarket::SetTotalOddEven(n) => {
                format!("Bet on whether set {} points are odd or even", n)
            }
            VolleyballMarket::DoubleChance => {
                "Synthetic market backing both teams to win".to_string()
            }
        }
    }
}

/// A market of either sport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    Cricket(CricketMarket),
    Volleyball(VolleyballMarket),
}

impl Market {
    pub fn name(&self) -> String {
        match self {
            Market::Cricket(m) => m.name().to_string(),
            Market::Volleyball(m) => m.name(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Market::Cricket(m) => m.description().to_string(),
            Market::Volleyball(m) => m.description(),
        }
    }

    /// Confidence tag; only cricket markets carry one
    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            Market::Cricket(m) => Some(m.confidence()),
            Market::Volleyball(_) => None,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The bet chosen for one market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub market: Market,
    pub market_id: String,
    /// Outcome key the evaluator settles against ("2", "Over", "Yes", "1 3-0", ...)
    pub label: String,
    /// Human-readable form of the outcome
    pub description: String,
    pub selection_id: String,
    pub odds: f64,
    /// Line attached to the outcome ("O 170.5", "-1.5"); empty when none
    pub handicap: String,
    pub stake: f64,
    /// Every outcome quoted for the market, rendered "<label> @ <odds>"
    pub available_options: Vec<String>,
}

impl Selection {
    pub fn american_odds(&self) -> Option<String> {
        odds::decimal_to_american(self.odds)
    }

    pub fn fractional_odds(&self) -> Option<String> {
        odds::decimal_to_fractional(self.odds)
    }

    pub fn potential_profit(&self) -> f64 {
        self.stake * (self.odds - 1.0)
    }

    pub fn implied_probability(&self) -> f64 {
        odds::implied_probability(self.odds)
    }

    pub fn risk_level(&self) -> RiskLevel {
        odds::risk_level(self.odds)
    }
}

/// Outcome of judging one selection against the match facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub selection: Selection,
    pub won: bool,
    pub explanation: String,
    pub profit_loss: f64,
    pub return_amount: f64,
    pub implied_probability: f64,
}

impl EvaluationResult {
    /// Settle a selection: stake x (odds - 1) profit on a win, the stake lost otherwise
    pub fn settle(selection: &Selection, won: bool, explanation: String) -> Self {
        let (profit_loss, return_amount) = odds::settle(selection.stake, selection.odds, won);
        Self {
            implied_probability: selection.implied_probability(),
            selection: selection.clone(),
            won,
            explanation,
            profit_loss,
            return_amount,
        }
    }
}

/// "WIN" / "LOSS" text used in explanations
pub fn result_text(won: bool) -> &'static str {
    if won {
        "WIN"
    } else {
        "LOSS"
    }
}
