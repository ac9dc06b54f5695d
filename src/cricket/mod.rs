//! Cricket pipeline: document shapes, fact derivation, odds extraction and settlement

pub mod document;
pub mod evaluate;
pub mod facts;
pub mod markets;
pub mod sample;

pub use document::{CricketPrematch, CricketPrematchDocument, CricketResult, CricketResultDocument};
pub use evaluate::evaluate;
pub use facts::{derive_facts, parse_score, BattingStats, BowlingStats, CricketFacts, PlayerStats};
pub use markets::extract_selections;
pub use sample::SimulatedStats;
