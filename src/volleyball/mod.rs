//! Volleyball pipeline: document shapes, fact derivation, odds extraction and settlement

pub mod document;
pub mod evaluate;
pub mod facts;
pub mod markets;

pub use document::{
    SetScore, VolleyballPrematch, VolleyballPrematchDocument, VolleyballResult,
    VolleyballResultDocument,
};
pub use evaluate::evaluate;
pub use facts::{derive_facts, set_winner, went_to_extra_points, SetFacts, VolleyballFacts};
pub use markets::extract_selections;
