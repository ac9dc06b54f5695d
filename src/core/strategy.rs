//! Outcome selection strategies
//!
//! The extractors gather the candidate quotes of a market; a strategy picks
//! the one outcome to back. `FixedPolicy` reproduces the house defaults
//! ("always the away team", "always Over 6.5", ...); `Favorite` and
//! `Longshot` pick by price.

use crate::core::handicap::is_total_line;
use crate::models::{CricketMarket, Market, OddsQuote, VolleyballMarket};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Picks at most one outcome per market
pub trait SelectionStrategy {
    fn name(&self) -> &'static str;

    fn choose<'q>(&self, market: &Market, candidates: &[&'q OddsQuote]) -> Option<&'q OddsQuote>;
}

/// Predicate identifying an outcome inside a market
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeRule {
    Name(String),
    Header(String),
    HeaderAndName { header: String, name: String },
    /// Handicap starting with the given prefix ("O ", "U ")
    HandicapPrefix(String),
}

impl OutcomeRule {
    pub fn name(name: &str) -> Self {
        OutcomeRule::Name(name.to_string())
    }

    pub fn header(header: &str) -> Self {
        OutcomeRule::Header(header.to_string())
    }

    pub fn header_and_name(header: &str, name: &str) -> Self {
        OutcomeRule::HeaderAndName {
            header: header.to_string(),
            name: name.to_string(),
        }
    }

    pub fn handicap_prefix(prefix: &str) -> Self {
        OutcomeRule::HandicapPrefix(prefix.to_string())
    }

    pub fn matches(&self, quote: &OddsQuote) -> bool {
        match self {
            OutcomeRule::Name(name) => quote.name == *name,
            OutcomeRule::Header(header) => quote.header() == header,
            OutcomeRule::HeaderAndName { header, name } => {
                quote.header() == header && quote.name == *name
            }
            OutcomeRule::HandicapPrefix(prefix) => quote.handicap().starts_with(prefix.as_str()),
        }
    }
}

/// One fixed outcome per market
#[derive(Debug, Clone, Default)]
pub struct FixedPolicy {
    rules: HashMap<Market, OutcomeRule>,
}

impl FixedPolicy {
    /// Empty policy; markets without a rule produce no selection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, market: Market, rule: OutcomeRule) -> Self {
        self.rules.insert(market, rule);
        self
    }

    pub fn rule(&self, market: &Market) -> Option<&OutcomeRule> {
        self.rules.get(market)
    }

    /// Away team, Over 6.5 first-over runs, Under 170.5 first innings, fifty yes,
    /// super over yes, away most sixes/fours, no hundred
    pub fn cricket() -> Self {
        use CricketMarket::*;
        Self::new()
            .with_rule(Market::Cricket(MatchWinner), OutcomeRule::name("2"))
            .with_rule(
                Market::Cricket(FirstOverTotalRuns),
                OutcomeRule::header_and_name("Over", "6.5"),
            )
            .with_rule(
                Market::Cricket(FirstInningsScore),
                OutcomeRule::header_and_name("Under", "170.5"),
            )
            .with_rule(Market::Cricket(FiftyToBeScored), OutcomeRule::name("Yes"))
            .with_rule(Market::Cricket(SuperOver), OutcomeRule::name("Yes"))
            .with_rule(Market::Cricket(MostSixes), OutcomeRule::name("2"))
            .with_rule(Market::Cricket(MostFours), OutcomeRule::name("2"))
            .with_rule(Market::Cricket(HundredToBeScored), OutcomeRule::name("No"))
    }

    /// Away team everywhere a side is picked, Over on totals, Odd on parity,
    /// No on extra points, and the synthetic double chance
    pub fn volleyball() -> Self {
        use VolleyballMarket::*;
        let mut policy = Self::new()
            .with_rule(Market::Volleyball(MatchWinner), OutcomeRule::header("2"))
            .with_rule(Market::Volleyball(Handicap), OutcomeRule::header("2"))
            .with_rule(
                Market::Volleyball(TotalPoints),
                OutcomeRule::handicap_prefix("O "),
            )
            .with_rule(Market::Volleyball(CorrectSetScore), OutcomeRule::header("2"))
            .with_rule(
                Market::Volleyball(MatchTotalOddEven),
                OutcomeRule::name("Odd"),
            )
            .with_rule(Market::Volleyball(DoubleChance), OutcomeRule::name("1-2"));

        for set in 1..=5u8 {
            policy = policy
                .with_rule(Market::Volleyball(SetWinner(set)), OutcomeRule::header("2"))
                .with_rule(
                    Market::Volleyball(SetTotalPoints(set)),
                    OutcomeRule::handicap_prefix("O "),
                )
                .with_rule(
                    Market::Volleyball(SetExtraPoints(set)),
                    OutcomeRule::name("No"),
                )
                .with_rule(
                    Market::Volleyball(SetTotalOddEven(set)),
                    OutcomeRule::name("Odd"),
                );
        }

        policy
    }
}

impl SelectionStrategy for FixedPolicy {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn choose<'q>(&self, market: &Market, candidates: &[&'q OddsQuote]) -> Option<&'q OddsQuote> {
        let rule = self.rules.get(market)?;
        candidates
            .iter()
            .copied()
            .find(|quote| rule.matches(quote) && quote.decimal_odds().is_some())
    }
}

/// Back the shortest price in each market
#[derive(Debug, Clone, Copy, Default)]
pub struct Favorite;

impl SelectionStrategy for Favorite {
    fn name(&self) -> &'static str {
        "favorite"
    }

    fn choose<'q>(&self, _market: &Market, candidates: &[&'q OddsQuote]) -> Option<&'q OddsQuote> {
        priced(candidates)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(quote, _)| quote)
    }
}

/// Back the longest price in each market
#[derive(Debug, Clone, Copy, Default)]
pub struct Longshot;

impl SelectionStrategy for Longshot {
    fn name(&self) -> &'static str {
        "longshot"
    }

    fn choose<'q>(&self, _market: &Market, candidates: &[&'q OddsQuote]) -> Option<&'q OddsQuote> {
        // max_by keeps the last maximum; reverse so ties go to the first quote
        priced(candidates)
            .rev()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(quote, _)| quote)
    }
}

fn priced<'a, 'q>(
    candidates: &'a [&'q OddsQuote],
) -> impl DoubleEndedIterator<Item = (&'q OddsQuote, f64)> + 'a {
    candidates
        .iter()
        .filter_map(|quote| quote.decimal_odds().map(|odds| (*quote, odds)))
}

/// Strategy selector used by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Fixed,
    Favorite,
    Longshot,
}

impl StrategyKind {
    pub fn cricket(&self) -> Box<dyn SelectionStrategy> {
        match self {
            StrategyKind::Fixed => Box::new(FixedPolicy::cricket()),
            StrategyKind::Favorite => Box::new(Favorite),
            StrategyKind::Longshot => Box::new(Longshot),
        }
    }

    pub fn volleyball(&self) -> Box<dyn SelectionStrategy> {
        match self {
            StrategyKind::Fixed => Box::new(FixedPolicy::volleyball()),
            StrategyKind::Favorite => Box::new(Favorite),
            StrategyKind::Longshot => Box::new(Longshot),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(StrategyKind::Fixed),
            "favorite" | "favourite" => Ok(StrategyKind::Favorite),
            "longshot" => Ok(StrategyKind::Longshot),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Fixed => write!(f, "fixed"),
            StrategyKind::Favorite => write!(f, "favorite"),
            StrategyKind::Longshot => write!(f, "longshot"),
        }
    }
}

/// True for quotes carrying an over/under line
pub fn has_total_line(quote: &OddsQuote) -> bool {
    is_total_line(quote.handicap())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, name: &str, header: Option<&str>, odds: &str) -> OddsQuote {
        OddsQuote {
            id: id.to_string(),
            odds: odds.to_string(),
            name: name.to_string(),
            header: header.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_policy_picks_away() {
        let home = quote("a", "1", None, "2.10");
        let away = quote("b", "2", None, "1.80");
        let candidates = vec![&home, &away];

        let market = Market::Cricket(CricketMarket::MatchWinner);
        let chosen = FixedPolicy::cricket().choose(&market, &candidates).unwrap();
        assert_eq!(chosen.id, "b");
    }

    #[test]
    fn test_fixed_policy_header_and_name() {
        let over_55 = quote("a", "5.5", Some("Over"), "1.60");
        let over_65 = quote("b", "6.5", Some("Over"), "1.95");
        let under_65 = quote("c", "6.5", Some("Under"), "1.85");
        let candidates = vec![&over_55, &over_65, &under_65];

        let market = Market::Cricket(CricketMarket::FirstOverTotalRuns);
        let chosen = FixedPolicy::cricket().choose(&market, &candidates).unwrap();
        assert_eq!(chosen.id, "b");
    }

    #[test]
    fn test_fixed_policy_missing_outcome() {
        let home = quote("a", "1", None, "2.10");
        let candidates = vec![&home];

        let market = Market::Cricket(CricketMarket::MatchWinner);
        assert!(FixedPolicy::cricket().choose(&market, &candidates).is_none());
    }

    #[test]
    fn test_fixed_policy_skips_unpriced_outcome() {
        let away = quote("b", "2", None, "");
        let candidates = vec![&away];

        let market = Market::Cricket(CricketMarket::MatchWinner);
        assert!(FixedPolicy::cricket().choose(&market, &candidates).is_none());
    }

    #[test]
    fn test_fixed_policy_without_rule() {
        let yes = quote("a", "Yes", None, "1.5");
        let candidates = vec![&yes];

        let market = Market::Volleyball(VolleyballMarket::DoubleChance);
        assert!(FixedPolicy::new().choose(&market, &candidates).is_none());
        assert!(FixedPolicy::volleyball().choose(&market, &candidates).is_none());

        let both = quote("b", "1-2", None, "0.85");
        let candidates = vec![&both];
        assert_eq!(
            FixedPolicy::volleyball()
                .choose(&market, &candidates)
                .unwrap()
                .id,
            "b"
        );
    }

    #[test]
    fn test_volleyball_policy_covers_every_set() {
        let policy = FixedPolicy::volleyball();
        for set in 1..=5u8 {
            assert!(policy
                .rule(&Market::Volleyball(VolleyballMarket::SetWinner(set)))
                .is_some());
            assert!(policy
                .rule(&Market::Volleyball(VolleyballMarket::SetExtraPoints(set)))
                .is_some());
        }
    }

    #[test]
    fn test_user_rule_overrides_default() {
        let home = quote("a", "1", None, "2.10");
        let away = quote("b", "2", None, "1.80");
        let candidates = vec![&home, &away];

        let market = Market::Cricket(CricketMarket::MatchWinner);
        let policy = FixedPolicy::cricket().with_rule(market, OutcomeRule::name("1"));
        assert_eq!(policy.choose(&market, &candidates).unwrap().id, "a");
    }

    #[test]
    fn test_favorite_and_longshot() {
        let a = quote("a", "1", None, "2.10");
        let b = quote("b", "2", None, "1.80");
        let c = quote("c", "X", None, "15.0");
        let broken = quote("d", "Y", None, "n/a");
        let candidates = vec![&a, &b, &c, &broken];
        let market = Market::Cricket(CricketMarket::MatchWinner);

        assert_eq!(Favorite.choose(&market, &candidates).unwrap().id, "b");
        assert_eq!(Longshot.choose(&market, &candidates).unwrap().id, "c");
    }

    #[test]
    fn test_longshot_tie_keeps_first() {
        let a = quote("a", "1", None, "1.90");
        let b = quote("b", "2", None, "1.90");
        let candidates = vec![&a, &b];
        let market = Market::Cricket(CricketMarket::MatchWinner);

        assert_eq!(Longshot.choose(&market, &candidates).unwrap().id, "a");
        assert_eq!(Favorite.choose(&market, &candidates).unwrap().id, "a");
    }

    #[test]
    fn test_strategy_kind_from_str() {
        assert_eq!("fixed".parse::<StrategyKind>(), Ok(StrategyKind::Fixed));
        assert_eq!("Favourite".parse::<StrategyKind>(), Ok(StrategyKind::Favorite));
        assert_eq!("longshot".parse::<StrategyKind>(), Ok(StrategyKind::Longshot));
        assert!("random".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_strategy_kind_builds_named_strategy() {
        assert_eq!(StrategyKind::Fixed.cricket().name(), "fixed");
        assert_eq!(StrategyKind::Favorite.volleyball().name(), "favorite");
    }
}
