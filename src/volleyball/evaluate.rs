//! Volleyball settlement rules

use tracing::debug;

use super::facts::{SetFacts, VolleyballFacts};
use crate::core::handicap::{parse_spread, TotalLine};
use crate::models::{result_text, EvaluationResult, Market, Selection, TeamSide, VolleyballMarket};

/// Settle a volleyball selection against match facts
pub fn evaluate(selection: &Selection, facts: &VolleyballFacts) -> EvaluationResult {
    let (won, explanation) = match selection.market {
        Market::Volleyball(market) => judge(market, selection, facts),
        other => {
            debug!("{} is not a volleyball market", other);
            (false, format!("{} cannot be settled as a volleyball bet", other))
        }
    };

    EvaluationResult::settle(selection, won, explanation)
}

fn judge(
    market: VolleyballMarket,
    selection: &Selection,
    facts: &VolleyballFacts,
) -> (bool, String) {
    match market {
        VolleyballMarket::MatchWinner => match_winner(selection, facts),
        VolleyballMarket::Handicap => handicap(selection, facts),
        VolleyballMarket::TotalPoints => total(selection, facts.total_points, "Total match points"),
        VolleyballMarket::CorrectSetScore => correct_set_score(selection, facts),
        VolleyballMarket::MatchTotalOddEven => {
            parity(selection, facts.total_points, "Total match points")
        }
        VolleyballMarket::SetWinner(n) => {
            with_set(facts, n, |set| set_winner(selection, facts, set))
        }
        VolleyballMarket::SetTotalPoints(n) => with_set(facts, n, |set| {
            total(
                selection,
                set.total_points,
                &format!("Set {} total points", set.number),
            )
        }),
        VolleyballMarket::SetExtraPoints(n) => {
            with_set(facts, n, |set| extra_points(selection, set))
        }
        VolleyballMarket::SetTotalOddEven(n) => with_set(facts, n, |set| {
            parity(
                selection,
                set.total_points,
                &format!("Set {} total points", set.number),
            )
        }),
        VolleyballMarket::DoubleChance => (
            false,
            format!(
                "Double Chance is not applicable in volleyball as only one team can win. Bet: {}. Result: {}",
                selection.label,
                result_text(false)
            ),
        ),
    }
}

fn with_set<F>(facts: &VolleyballFacts, number: u8, judge: F) -> (bool, String)
where
    F: FnOnce(&SetFacts) -> (bool, String),
{
    match facts.set(number) {
        Some(set) if set.is_played() => judge(set),
        Some(_) => (
            false,
            format!("Set {} was not played. Result: {}", number, result_text(false)),
        ),
        None => (false, format!("Set {} is not part of the result", number)),
    }
}

fn side_name(facts: &VolleyballFacts, side: Option<TeamSide>) -> &str {
    match side {
        Some(side) => facts.team_name(side),
        None => "none",
    }
}

fn match_winner(selection: &Selection, facts: &VolleyballFacts) -> (bool, String) {
    let picked = TeamSide::from_code(&selection.label);
    let won = picked == Some(facts.match_winner);

    let explanation = format!(
        "Match result: {} sets. Winner: {} ({}). Bet: {} to win. Result: {}",
        facts.final_score,
        facts.match_winner.label(),
        facts.team_name(facts.match_winner),
        side_name(facts, picked),
        result_text(won)
    );
    (won, explanation)
}

fn handicap(selection: &Selection, facts: &VolleyballFacts) -> (bool, String) {
    let spread = match parse_spread(&selection.handicap) {
        Ok(spread) => spread,
        Err(e) => return (false, format!("Cannot settle handicap: {}", e)),
    };
    let Some(side) = TeamSide::from_code(&selection.label) else {
        return (false, format!("Unknown handicap side {:?}", selection.label));
    };

    let diff = i64::from(facts.home_sets) - i64::from(facts.away_sets);
    let adjusted = match side {
        TeamSide::Home => diff as f64 + spread,
        TeamSide::Away => -diff as f64 + spread,
    };
    let won = adjusted > 0.0;

    let explanation = format!(
        "Match result: {}-{} sets. Set difference: {}. Applied handicap {} to {}: adjusted difference {:.1}. Result: {}",
        facts.home_sets,
        facts.away_sets,
        diff,
        selection.handicap,
        facts.team_name(side),
        adjusted,
        result_text(won)
    );
    (won, explanation)
}

fn total(selection: &Selection, actual: u32, what: &str) -> (bool, String) {
    let line = match TotalLine::parse(&selection.handicap) {
        Ok(line) => line,
        Err(e) => return (false, format!("Cannot settle {}: {}", what.to_lowercase(), e)),
    };

    let won = line.is_won_by(f64::from(actual));
    let explanation = format!(
        "{}: {}. Bet: {} (threshold: {:.1}). Result: {}",
        what,
        actual,
        line.direction,
        line.threshold,
        result_text(won)
    );
    (won, explanation)
}

fn parity_text(value: u32) -> &'static str {
    if value % 2 == 1 {
        "Odd"
    } else {
        "Even"
    }
}

fn parity(selection: &Selection, value: u32, what: &str) -> (bool, String) {
    let actual = parity_text(value);
    let won = selection.label.eq_ignore_ascii_case(actual);

    let explanation = format!(
        "{}: {} ({}). Bet: {}. Result: {}",
        what,
        value,
        actual,
        selection.label,
        result_text(won)
    );
    (won, explanation)
}

/// Split a correct-score label "<team code> <winner sets>-<loser sets>"
fn parse_correct_score(label: &str) -> Option<(&str, u32, u32)> {
    let (team, score) = label.trim().split_once(' ')?;
    let (win, lose) = score.trim().split_once('-')?;
    Some((
        team,
        win.trim().parse().unwrap_or(0),
        lose.trim().parse().unwrap_or(0),
    ))
}

fn correct_set_score(selection: &Selection, facts: &VolleyballFacts) -> (bool, String) {
    let Some((team, win_sets, lose_sets)) = parse_correct_score(&selection.label) else {
        return (false, format!("Invalid selection format {:?}", selection.label));
    };

    let (max, min) = facts.set_margin();
    let won = team == facts.match_winner.code() && win_sets == max && lose_sets == min;

    let explanation = format!(
        "Match result: {}-{}. Bet: {} to win {}-{}. Actual winner: {} ({}) with score {}-{}. Result: {}",
        facts.home_sets,
        facts.away_sets,
        side_name(facts, TeamSide::from_code(team)),
        win_sets,
        lose_sets,
        facts.match_winner.label(),
        facts.team_name(facts.match_winner),
        max,
        min,
        result_text(won)
    );
    (won, explanation)
}

fn set_winner(selection: &Selection, facts: &VolleyballFacts, set: &SetFacts) -> (bool, String) {
    let picked = TeamSide::from_code(&selection.label);
    let won = picked.is_some() && picked == set.winner;

    let explanation = format!(
        "Set {} result: {}-{}. Winner: {}. Bet: {} to win set {}. Result: {}",
        set.number,
        set.home_points,
        set.away_points,
        side_name(facts, set.winner),
        side_name(facts, picked),
        set.number,
        result_text(won)
    );
    (won, explanation)
}

fn extra_points(selection: &Selection, set: &SetFacts) -> (bool, String) {
    let won = if selection.label.eq_ignore_ascii_case("yes") {
        set.extra_points
    } else if selection.label.eq_ignore_ascii_case("no") {
        !set.extra_points
    } else {
        false
    };

    let explanation = format!(
        "Set {} had extra points: {}. Bet: {}. Result: {}",
        set.number,
        if set.extra_points { "Yes" } else { "No" },
        selection.label,
        result_text(won)
    );
    (won, explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CricketMarket;

    fn facts() -> VolleyballFacts {
        // 1-3: 25-23, 20-25, 22-25, 27-29
        let sets = vec![
            SetFacts::new(1, 25, 23),
            SetFacts::new(2, 20, 25),
            SetFacts::new(3, 22, 25),
            SetFacts::new(4, 27, 29),
            SetFacts::new(5, 0, 0),
        ];
        VolleyballFacts {
            home_team: "Trentino".to_string(),
            away_team: "Perugia".to_string(),
            league_name: "Serie A1".to_string(),
            start_time: None,
            final_score: "1-3".to_string(),
            total_points: sets.iter().map(|s| s.total_points).sum(),
            sets,
            home_sets: 1,
            away_sets: 3,
            match_winner: TeamSide::Away,
            correct_set_score: "2 3-1".to_string(),
            total_sets: 4,
            max_sets: 5,
        }
    }

    fn selection(market: VolleyballMarket, label: &str, handicap: &str, odds: f64) -> Selection {
        Selection {
            market: Market::Volleyball(market),
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
    fn test_match_winner() {
        let away = selection(VolleyballMarket::MatchWinner, "2", "", 1.5);
        let result = evaluate(&away, &facts());
        assert!(result.won);
        assert!((result.profit_loss - 50.0).abs() < 1e-9);
        assert!(result.explanation.contains("Winner: Away team (Perugia)"));

        let home = selection(VolleyballMarket::MatchWinner, "1", "", 2.0);
        assert!(!evaluate(&home, &facts()).won);
    }

    #[test]
    fn test_handicap() {
        // away: -(1 - 3) - 1.5 = 0.5
        let away = selection(VolleyballMarket::Handicap, "2", "-1.5", 1.9);
        assert!(evaluate(&away, &facts()).won);

        // home: (1 - 3) + 1.5 = -0.5
        let home = selection(VolleyballMarket::Handicap, "1", "+1.5", 1.9);
        assert!(!evaluate(&home, &facts()).won);

        let home_big = selection(VolleyballMarket::Handicap, "1", "+2.5", 3.0);
        assert!(evaluate(&home_big, &facts()).won);

        let broken = selection(VolleyballMarket::Handicap, "2", "1.5", 1.9);
        assert!(!evaluate(&broken, &facts()).won);
    }

    #[test]
    fn test_total_points() {
        // 48 + 45 + 47 + 56 = 196
        let over = selection(VolleyballMarket::TotalPoints, "O 180.5", "O 180.5", 1.85);
        let result = evaluate(&over, &facts());
        assert!(result.won);
        assert_eq!(
            result.explanation,
            "Total match points: 196. Bet: Over (threshold: 180.5). Result: WIN"
        );

        let under = selection(VolleyballMarket::TotalPoints, "U 180.5", "U 180.5", 1.85);
        assert!(!evaluate(&under, &facts()).won);
    }

    #[test]
    fn test_total_points_96() {
        let mut f = facts();
        f.total_points = 96;
        let over = selection(VolleyballMarket::TotalPoints, "O 50.5", "O 50.5", 1.85);
        let under = selection(VolleyballMarket::TotalPoints, "U 50.5", "U 50.5", 1.85);
        assert!(evaluate(&over, &f).won);
        assert!(!evaluate(&under, &f).won);
    }

    #[test]
    fn test_correct_set_score() {
        let right = selection(VolleyballMarket::CorrectSetScore, "2 3-1", "", 4.0);
        assert!(evaluate(&right, &facts()).won);

        let wrong_margin = selection(VolleyballMarket::CorrectSetScore, "2 3-2", "", 5.0);
        assert!(!evaluate(&wrong_margin, &facts()).won);

        let wrong_team = selection(VolleyballMarket::CorrectSetScore, "1 3-1", "", 6.0);
        assert!(!evaluate(&wrong_team, &facts()).won);

        let garbage = selection(VolleyballMarket::CorrectSetScore, "2", "", 6.0);
        let result = evaluate(&garbage, &facts());
        assert!(!result.won);
        assert!(result.explanation.starts_with("Invalid selection format"));
    }

    #[test]
    fn test_set_markets() {
        let set1 = selection(VolleyballMarket::SetWinner(1), "1", "", 1.9);
        assert!(evaluate(&set1, &facts()).won);
        let set2 = selection(VolleyballMarket::SetWinner(2), "1", "", 1.9);
        assert!(!evaluate(&set2, &facts()).won);

        let set1_total = selection(VolleyballMarket::SetTotalPoints(1), "O 45.5", "O 45.5", 1.83);
        assert!(evaluate(&set1_total, &facts()).won);

        let extra_no = selection(VolleyballMarket::SetExtraPoints(1), "No", "", 1.3);
        assert!(evaluate(&extra_no, &facts()).won);
        let extra_yes = selection(VolleyballMarket::SetExtraPoints(4), "Yes", "", 3.2);
        assert!(evaluate(&extra_yes, &facts()).won);

        // set 1: 48 points
        let odd = selection(VolleyballMarket::SetTotalOddEven(1), "Odd", "", 1.9);
        assert!(!evaluate(&odd, &facts()).won);
        let even = selection(VolleyballMarket::SetTotalOddEven(1), "Even", "", 1.9);
        assert!(evaluate(&even, &facts()).won);
    }

    #[test]
    fn test_unplayed_set_loses_both_sides() {
        let home = selection(VolleyballMarket::SetWinner(5), "1", "", 1.9);
        let away = selection(VolleyballMarket::SetWinner(5), "2", "", 1.9);
        assert!(!evaluate(&home, &facts()).won);
        assert!(!evaluate(&away, &facts()).won);

        let missing = selection(VolleyballMarket::SetWinner(7), "2", "", 1.9);
        assert!(!evaluate(&missing, &facts()).won);
    }

    #[test]
    fn test_unplayed_set_markets_lose() {
        // 3-0: 25-20, 25-18, 25-22, sets 4 and 5 never started
        let mut f = facts();
        f.sets = vec![
            SetFacts::new(1, 25, 20),
            SetFacts::new(2, 25, 18),
            SetFacts::new(3, 25, 22),
            SetFacts::new(4, 0, 0),
            SetFacts::new(5, 0, 0),
        ];
        f.total_points = 135;
        f.home_sets = 3;
        f.away_sets = 0;
        f.final_score = "3-0".to_string();
        f.match_winner = TeamSide::Home;

        let bets = [
            selection(VolleyballMarket::SetExtraPoints(5), "No", "", 1.3),
            selection(VolleyballMarket::SetExtraPoints(4), "No", "", 1.3),
            selection(VolleyballMarket::SetTotalOddEven(5), "Even", "", 1.9),
            selection(VolleyballMarket::SetTotalOddEven(4), "Odd", "", 1.9),
            selection(VolleyballMarket::SetTotalPoints(4), "U 40.5", "U 40.5", 1.83),
            selection(VolleyballMarket::SetTotalPoints(5), "O 14.5", "O 14.5", 1.83),
        ];
        for bet in &bets {
            let result = evaluate(bet, &f);
            assert!(!result.won, "{} settled as a win", bet.market);
            assert!((result.profit_loss + 100.0).abs() < 1e-9);
            assert!(result.explanation.contains("was not played"));
        }

        // played sets still settle normally
        let set3_no = selection(VolleyballMarket::SetExtraPoints(3), "No", "", 1.3);
        assert!(evaluate(&set3_no, &f).won);
    }

    #[test]
    fn test_match_parity() {
        let even = selection(VolleyballMarket::MatchTotalOddEven, "Even", "", 1.9);
        let result = evaluate(&even, &facts());
        assert!(result.won);
        assert_eq!(
            result.explanation,
            "Total match points: 196 (Even). Bet: Even. Result: WIN"
        );
    }

    #[test]
    fn test_double_chance_always_loses() {
        let dc = selection(VolleyballMarket::DoubleChance, "1-2", "", 0.85);
        let result = evaluate(&dc, &facts());
        assert!(!result.won);
        assert_eq!(result.profit_loss, -100.0);
        assert_eq!(result.return_amount, 0.0);
    }

    #[test]
    fn test_non_volleyball_market_loses() {
        let mut sel = selection(VolleyballMarket::MatchWinner, "2", "", 1.5);
        sel.market = Market::Cricket(CricketMarket::MatchWinner);
        assert!(!evaluate(&sel, &facts()).won);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let sel = selection(VolleyballMarket::Handicap, "2", "-1.5", 1.9);
        let f = facts();
        assert_eq!(evaluate(&sel, &f), evaluate(&sel, &f));
    }
}
