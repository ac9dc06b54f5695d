//! Cricket settlement rules

use tracing::debug;

use super::facts::{BattingStats, CricketFacts};
use crate::core::handicap::TotalLine;
use crate::models::{CricketMarket, EvaluationResult, Market, Selection, TeamSide};

/// Settle a cricket selection against match facts
///
/// Pure: identical inputs give identical results.
pub fn evaluate(selection: &Selection, facts: &CricketFacts) -> EvaluationResult {
    let (won, explanation) = match selection.market {
        Market::Cricket(market) => judge(market, selection, facts),
        other => {
            debug!("{} is not a cricket market", other);
            (false, format!("{} cannot be settled as a cricket bet", other))
        }
    };

    EvaluationResult::settle(selection, won, explanation)
}

fn judge(market: CricketMarket, selection: &Selection, facts: &CricketFacts) -> (bool, String) {
    match market {
        CricketMarket::MatchWinner => match_winner(selection, facts),
        CricketMarket::FirstOverTotalRuns => total(
            selection,
            facts.stats.first_over_runs,
            "First over",
            "runs",
        ),
        CricketMarket::FirstInningsScore => total(
            selection,
            facts.stats.first_innings_score,
            "First innings score",
            "",
        ),
        CricketMarket::FiftyToBeScored => milestone(selection, facts, 50, "fifty"),
        CricketMarket::HundredToBeScored => milestone(selection, facts, 100, "hundred"),
        CricketMarket::SuperOver => super_over(selection, facts),
        CricketMarket::MostSixes => most(selection, facts, "sixes", |b| b.sixes),
        CricketMarket::MostFours => most(selection, facts, "fours", |b| b.boundaries),
    }
}

/// Win/loss for a pick of one side ("1"/"2") or a tie (anything else)
fn side_wins(label: &str, home: u32, away: u32) -> bool {
    match TeamSide::from_code(label) {
        Some(TeamSide::Home) => home > away,
        Some(TeamSide::Away) => away > home,
        None => home == away,
    }
}

fn match_winner(selection: &Selection, facts: &CricketFacts) -> (bool, String) {
    let (home, away) = (facts.home_score, facts.away_score);
    let won = side_wins(&selection.label, home, away);

    let explanation = if home == away {
        format!("Match tied with both teams on {} runs", home)
    } else {
        let winner = if home > away {
            TeamSide::Home
        } else {
            TeamSide::Away
        };
        format!(
            "{} won with score {} vs {} (margin: {} runs)",
            facts.team_name(winner),
            facts.score(winner),
            facts.score(winner.opponent()),
            home.abs_diff(away)
        )
    };

    (won, explanation)
}

fn total(selection: &Selection, actual: Option<u32>, what: &str, unit: &str) -> (bool, String) {
    let line = match TotalLine::parse(&selection.handicap) {
        Ok(line) => line,
        Err(e) => return (false, format!("Cannot settle {}: {}", what.to_lowercase(), e)),
    };

    let Some(actual) = actual else {
        return (false, format!("{} total is unavailable", what));
    };

    let value = f64::from(actual);
    let cmp = if value > line.threshold {
        ">"
    } else if value < line.threshold {
        "<"
    } else {
        "="
    };
    let explanation = if unit.is_empty() {
        format!("{} was {} ({} {:.1})", what, actual, cmp, line.threshold)
    } else {
        format!(
            "{} had {} {} ({} {:.1})",
            what, actual, unit, cmp, line.threshold
        )
    };

    (line.is_won_by(value), explanation)
}

fn yes_no(label: &str) -> Option<bool> {
    if label.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if label.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

fn milestone(
    selection: &Selection,
    facts: &CricketFacts,
    runs: u32,
    name: &str,
) -> (bool, String) {
    let scorers = facts.batters_with_at_least(runs);
    let happened = !scorers.is_empty();
    let won = yes_no(&selection.label) == Some(happened);

    let explanation = if happened {
        let names: Vec<String> = scorers
            .iter()
            .map(|(player, r)| format!("{} ({})", player, r))
            .collect();
        format!(
            "A {} was scored. Players with {}+ runs: {}",
            name,
            runs,
            names.join(", ")
        )
    } else {
        match facts.top_scorer() {
            Some((player, r)) => format!(
                "No player scored a {} in the match. Highest score was by {} ({} runs)",
                name, player, r
            ),
            None => format!("No player scored a {} in the match", name),
        }
    };

    (won, explanation)
}

fn super_over(selection: &Selection, facts: &CricketFacts) -> (bool, String) {
    let went = facts.stats.went_to_super_over;
    let won = yes_no(&selection.label) == Some(went);

    let explanation = if went {
        "The match went to a super over as the scores were tied".to_string()
    } else if facts.home_score == facts.away_score {
        "The match did not go to a super over".to_string()
    } else {
        let winner = if facts.home_score > facts.away_score {
            TeamSide::Home
        } else {
            TeamSide::Away
        };
        format!(
            "The match did not go to a super over. {} won by {} runs",
            facts.team_name(winner),
            facts.home_score.abs_diff(facts.away_score)
        )
    };

    (won, explanation)
}

fn most<F>(selection: &Selection, facts: &CricketFacts, what: &str, stat: F) -> (bool, String)
where
    F: Fn(&BattingStats) -> u32,
{
    let (home, away) = facts.team_totals(stat);
    let won = side_wins(&selection.label, home, away);

    let explanation = if home == away {
        format!("Both teams hit the same number of {} ({})", what, home)
    } else {
        let (leader, lead, trail) = if home > away {
            (TeamSide::Home, home, away)
        } else {
            (TeamSide::Away, away, home)
        };
        format!(
            "{} hit more {} ({}) than {} ({})",
            facts.team_name(leader),
            what,
            lead,
            facts.team_name(leader.opponent()),
            trail
        )
    };

    (won, explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cricket::sample::SimulatedStats;
    use crate::models::VolleyballMarket;

    fn facts(home: u32, away: u32) -> CricketFacts {
        CricketFacts {
            home_team: "Rajasthan Royals".to_string(),
            away_team: "Mumbai Indians".to_string(),
            home_score: home,
            away_score: away,
            ..Default::default()
        }
        .with_player_stats(SimulatedStats::new().generate())
    }

    fn selection(market: CricketMarket, label: &str, handicap: &str, odds: f64) -> Selection {
        Selection {
            market: Market::Cricket(market),
            market_id: "m".to_string(),
            label: label.to_string(),
            description: String::new(),
            selection_id: "s".to_string(),
            odds,
            handicap: handicap.to_string(),
            stake: 100.0,
            available_options: Vec::new(),
        }
    }

    #[test]
    fn test_away_match_winner() {
        let sel = selection(CricketMarket::MatchWinner, "2", "", 1.80);
        let result = evaluate(&sel, &facts(160, 165));

        assert!(result.won);
        assert!((result.profit_loss - 80.0).abs() < 1e-9);
        assert!((sel.potential_profit() - 80.0).abs() < 1e-9);
        assert_eq!(
            result.explanation,
            "Mumbai Indians won with score 165 vs 160 (margin: 5 runs)"
        );

        let home = selection(CricketMarket::MatchWinner, "1", "", 2.10);
        assert!(!evaluate(&home, &facts(160, 165)).won);
    }

    #[test]
    fn test_tie_pick() {
        let tie = selection(CricketMarket::MatchWinner, "Tie", "", 30.0);
        assert!(evaluate(&tie, &facts(150, 150)).won);
        assert!(!evaluate(&tie, &facts(150, 151)).won);
    }

    #[test]
    fn test_first_over_total() {
        let over = selection(CricketMarket::FirstOverTotalRuns, "Over", "O 6.5", 1.83);
        let result = evaluate(&over, &facts(160, 165));
        assert!(result.won);
        assert_eq!(result.explanation, "First over had 8 runs (> 6.5)");

        let under = selection(CricketMarket::FirstOverTotalRuns, "Under", "U 6.5", 1.83);
        assert!(!evaluate(&under, &facts(160, 165)).won);
    }

    #[test]
    fn test_first_innings_under() {
        let under = selection(CricketMarket::FirstInningsScore, "Under", "U 170.5", 1.90);
        let result = evaluate(&under, &facts(160, 165));
        assert!(result.won);
        assert_eq!(result.explanation, "First innings score was 168 (< 170.5)");
    }

    #[test]
    fn test_missing_auxiliary_fact_loses() {
        let over = selection(CricketMarket::FirstOverTotalRuns, "Over", "O 6.5", 1.83);
        let bare = CricketFacts::default();
        let result = evaluate(&over, &bare);
        assert!(!result.won);
        assert_eq!(result.profit_loss, -100.0);
    }

    #[test]
    fn test_unparseable_line_loses() {
        let over = selection(CricketMarket::FirstOverTotalRuns, "Over", "6.5", 1.83);
        assert!(!evaluate(&over, &facts(160, 165)).won);
    }

    #[test]
    fn test_fifty_and_hundred() {
        let fifty = selection(CricketMarket::FiftyToBeScored, "Yes", "", 1.20);
        let result = evaluate(&fifty, &facts(160, 165));
        assert!(result.won);
        assert!(result.explanation.contains("Rohit Sharma (67)"));
        assert!(result.explanation.contains("Ishan Kishan (54)"));

        let no_hundred = selection(CricketMarket::HundredToBeScored, "No", "", 1.25);
        let result = evaluate(&no_hundred, &facts(160, 165));
        assert!(result.won);
        assert!(result.explanation.ends_with("Rohit Sharma (67 runs)"));

        let yes_hundred = selection(CricketMarket::HundredToBeScored, "Yes", "", 4.0);
        assert!(!evaluate(&yes_hundred, &facts(160, 165)).won);
    }

    #[test]
    fn test_fifty_without_stats() {
        let fifty = selection(CricketMarket::FiftyToBeScored, "Yes", "", 1.20);
        let result = evaluate(&fifty, &CricketFacts::default());
        assert!(!result.won);
        assert_eq!(
            result.explanation,
            "No player scored a fifty in the match"
        );
    }

    #[test]
    fn test_super_over() {
        let yes = selection(CricketMarket::SuperOver, "Yes", "", 15.0);
        let result = evaluate(&yes, &facts(160, 165));
        assert!(!result.won);
        assert_eq!(
            result.explanation,
            "The match did not go to a super over. Mumbai Indians won by 5 runs"
        );

        let no = selection(CricketMarket::SuperOver, "No", "", 1.02);
        assert!(evaluate(&no, &facts(160, 165)).won);
    }

    #[test]
    fn test_most_sixes_and_fours() {
        // home: 2 + 1 + 1 = 4 sixes, away: 4 + 3 + 2 = 9 sixes
        let sixes = selection(CricketMarket::MostSixes, "2", "", 2.0);
        let result = evaluate(&sixes, &facts(160, 165));
        assert!(result.won);
        assert_eq!(
            result.explanation,
            "Mumbai Indians hit more sixes (9) than Rajasthan Royals (4)"
        );

        // home: 5 + 3 + 2 = 10 fours, away: 6 + 5 + 4 = 15 fours
        let fours = selection(CricketMarket::MostFours, "1", "", 1.9);
        assert!(!evaluate(&fours, &facts(160, 165)).won);
    }

    #[test]
    fn test_non_cricket_market_loses() {
        let mut sel = selection(CricketMarket::MatchWinner, "2", "", 1.80);
        sel.market = Market::Volleyball(VolleyballMarket::MatchWinner);
        assert!(!evaluate(&sel, &facts(160, 165)).won);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let sel = selection(CricketMarket::MostFours, "2", "", 1.9);
        let f = facts(160, 165);
        assert_eq!(evaluate(&sel, &f), evaluate(&sel, &f));
    }
}
