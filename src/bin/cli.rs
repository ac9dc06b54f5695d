//! Bet Evaluator CLI - Evaluate pre-match selections against match results

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use bet_evaluator::cricket::CricketFacts;
use bet_evaluator::data::{
    documents_exist, CRICKET_PREMATCH_FILE, CRICKET_RESULT_FILE, VOLLEYBALL_PREMATCH_FILE,
    VOLLEYBALL_RESULT_FILE,
};
use bet_evaluator::models::{result_text, EvaluationResult};
use bet_evaluator::summary::{DimensionAnalysis, SummaryTotals};
use bet_evaluator::volleyball::VolleyballFacts;
use bet_evaluator::{EvaluationConfig, Evaluator, SportReport, StrategyKind};

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser)]
#[command(name = "bet-evaluator")]
#[command(author, version, about = "Cricket and volleyball bet evaluation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Directory holding the pre-match and result documents
    #[arg(long, env = "BET_EVAL_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    data_dir: PathBuf,

    /// Stake placed on every selection
    #[arg(long, default_value = "100", global = true)]
    stake: f64,

    /// Selection strategy (fixed, favorite, longshot)
    #[arg(long, default_value = "fixed", global = true)]
    strategy: StrategyKind,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the cricket match
    Cricket {
        /// Pre-match odds document (defaults to <data-dir>/cricket_prematch.json)
        #[arg(long)]
        prematch: Option<PathBuf>,

        /// Result document (defaults to <data-dir>/cricket_result.json)
        #[arg(long)]
        result: Option<PathBuf>,

        /// Do not attach simulated player statistics
        #[arg(long)]
        no_sample_stats: bool,
    },
    /// Evaluate the volleyball match
    Volleyball {
        /// Pre-match odds document (defaults to <data-dir>/volleyball_prematch.json)
        #[arg(long)]
        prematch: Option<PathBuf>,

        /// Result document (defaults to <data-dir>/volleyball_result.json)
        #[arg(long)]
        result: Option<PathBuf>,
    },
    /// Evaluate both sports
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if !cli.json {
        println!("{}", "Bet Evaluator v0.1.0".cyan().bold());
        println!();
    }

    let config = EvaluationConfig {
        stake: cli.stake,
        strategy: cli.strategy,
        ..Default::default()
    };

    if cli.interactive {
        return run_interactive(&cli.data_dir, config);
    }

    match cli.command.unwrap_or(Commands::All) {
        Commands::Cricket {
            prematch,
            result,
            no_sample_stats,
        } => {
            let config = EvaluationConfig {
                use_sample_stats: !no_sample_stats,
                ..config
            };
            let prematch = prematch.unwrap_or_else(|| cli.data_dir.join(CRICKET_PREMATCH_FILE));
            let result = result.unwrap_or_else(|| cli.data_dir.join(CRICKET_RESULT_FILE));
            run_cricket(&Evaluator::new(config), &prematch, &result, cli.json)
        }
        Commands::Volleyball { prematch, result } => {
            let prematch =
                prematch.unwrap_or_else(|| cli.data_dir.join(VOLLEYBALL_PREMATCH_FILE));
            let result = result.unwrap_or_else(|| cli.data_dir.join(VOLLEYBALL_RESULT_FILE));
            run_volleyball(&Evaluator::new(config), &prematch, &result, cli.json)
        }
        Commands::All => run_all(&cli.data_dir, config, cli.json),
    }
}

/// Run both sports; a failure in one does not stop the other
fn run_all(data_dir: &Path, config: EvaluationConfig, json: bool) -> Result<()> {
    let evaluator = Evaluator::new(config);
    let mut failures = Vec::new();

    let cricket = run_cricket(
        &evaluator,
        &data_dir.join(CRICKET_PREMATCH_FILE),
        &data_dir.join(CRICKET_RESULT_FILE),
        json,
    );
    if let Err(e) = cricket {
        eprintln!("{}: {:#}", "Cricket evaluation failed".red(), e);
        failures.push("cricket");
    }

    if !json {
        println!();
    }

    let volleyball = run_volleyball(
        &evaluator,
        &data_dir.join(VOLLEYBALL_PREMATCH_FILE),
        &data_dir.join(VOLLEYBALL_RESULT_FILE),
        json,
    );
    if let Err(e) = volleyball {
        eprintln!("{}: {:#}", "Volleyball evaluation failed".red(), e);
        failures.push("volleyball");
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("evaluation failed for {}", failures.join(", ")))
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

fn ensure_documents(prematch: &Path, result: &Path) -> Result<()> {
    if !documents_exist(&[prematch, result]) {
        eprintln!(
            "{}",
            format!("Documents not found: {:?} / {:?}", prematch, result).red()
        );
        eprintln!("Use --data-dir or BET_EVAL_DATA_DIR to point at the match documents.");
        return Err(anyhow!("missing match documents"));
    }
    Ok(())
}

fn run_cricket(evaluator: &Evaluator, prematch: &Path, result: &Path, json: bool) -> Result<()> {
    ensure_documents(prematch, result)?;
    let pb = spinner("Evaluating cricket selections...");
    let report = evaluator
        .run_cricket_files(prematch, result)
        .with_context(|| format!("Cricket evaluation of {:?} / {:?} failed", prematch, result));
    pb.finish_and_clear();
    let report = report?;

    if json {
        return print_json(&report);
    }

    render_cricket_header(&report.facts);
    render_bets(&report.evaluations);
    render_summary(&report.summary);
    render_breakdown("Analysis by Market:", &report.by_market);
    render_breakdown("Analysis by Odds Range:", &report.by_odds_range);
    Ok(())
}

fn run_volleyball(evaluator: &Evaluator, prematch: &Path, result: &Path, json: bool) -> Result<()> {
    ensure_documents(prematch, result)?;
    let pb = spinner("Evaluating volleyball selections...");
    let report = evaluator
        .run_volleyball_files(prematch, result)
        .with_context(|| {
            format!(
                "Volleyball evaluation of {:?} / {:?} failed",
                prematch, result
            )
        });
    pb.finish_and_clear();
    let report = report?;

    if json {
        return print_json(&report);
    }

    render_volleyball_header(&report.facts);
    render_bets(&report.evaluations);
    render_summary(&report.summary);
    render_breakdown("Analysis by Market:", &report.by_market);
    render_breakdown("Analysis by Odds Range:", &report.by_odds_range);
    Ok(())
}

fn print_json<F: Serialize>(report: &SportReport<F>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{}", title.yellow().bold());
    println!("{}", "=".repeat(60));
}

fn render_cricket_header(facts: &CricketFacts) {
    banner("CRICKET MATCH ANALYSIS");
    println!("Match: {} vs {}", facts.home_team, facts.away_team);
    if let Some(date) = facts.match_date {
        println!("Date: {}", date.format("%A, %B %-d, %Y"));
    }
    println!(
        "Venue: {}, {}, {} (Capacity: {})",
        facts.stadium, facts.city, facts.country, facts.capacity
    );
    println!("League: {}", facts.league_name);
    println!(
        "Final Score: {} {} - {} {}",
        facts.home_team, facts.home_score, facts.away_score, facts.away_team
    );

    if !facts.stats.batting.is_empty() {
        println!("\n{}", "Batting:".yellow().bold());
        println!(
            "{:<20} {:>6} {:>6} {:>8} {:>6} {:>6}",
            "Player", "Runs", "Balls", "SR", "4s", "6s"
        );
        println!("{}", "-".repeat(57));
        for (player, b) in &facts.stats.batting {
            println!(
                "{:<20} {:>6} {:>6} {:>8.1} {:>6} {:>6}",
                truncate_name(player, 20),
                b.runs,
                b.balls,
                b.strike_rate,
                b.boundaries,
                b.sixes
            );
        }
    }

    if !facts.stats.bowling.is_empty() {
        println!("\n{}", "Bowling:".yellow().bold());
        println!(
            "{:<20} {:>6} {:>6} {:>8} {:>8}",
            "Player", "Overs", "Runs", "Wickets", "Economy"
        );
        println!("{}", "-".repeat(52));
        for (player, b) in &facts.stats.bowling {
            println!(
                "{:<20} {:>6.1} {:>6} {:>8} {:>8.1}",
                truncate_name(player, 20),
                b.overs,
                b.runs_conceded,
                b.wickets,
                b.economy
            );
        }
    }
}

fn render_volleyball_header(facts: &VolleyballFacts) {
    banner("VOLLEYBALL MATCH SUMMARY");
    println!("Match: {} vs {}", facts.home_team, facts.away_team);
    println!("League: {}", facts.league_name);
    if let Some(start) = facts.start_time {
        println!("Date: {}", start.format("%B %-d, %Y %H:%M:%S"));
    }
    println!("Final Score: {}", facts.final_score);

    println!("\nSet scores:");
    for set in facts.played_sets() {
        println!("  Set {}: {}-{}", set.number, set.home_points, set.away_points);
    }

    println!("\n{}", "Key Statistics:".yellow().bold());
    println!("Total Match Points: {}", facts.total_points);
    if let Some(set1) = facts.set(1) {
        println!(
            "Set 1 Points: {} ({})",
            set1.total_points,
            odd_even(set1.total_points)
        );
        println!("Set 1 Extra Points: {}", set1.extra_points);
    }
    println!(
        "Total Match Points Odd/Even: {}",
        odd_even(facts.total_points)
    );
    println!(
        "Match Winner: {} ({})",
        facts.match_winner.label(),
        facts.team_name(facts.match_winner)
    );
    let (won, lost) = facts.set_margin();
    println!("Correct Set Score: {}-{}", won, lost);
}

fn render_bets(evaluations: &[EvaluationResult]) {
    println!("\n{}", "Bet Results:".yellow().bold());

    for (i, eval) in evaluations.iter().enumerate() {
        let sel = &eval.selection;
        println!("\n{} {}", format!("#{}", i + 1).dimmed(), sel.market.name().bold());
        println!("   Description: {}", sel.market.description());
        if let Some(confidence) = sel.market.confidence() {
            println!("   Confidence Level: {}", confidence);
        }
        println!(
            "   Selection: {} @ {:.2} ({} / {})",
            sel.description,
            sel.odds,
            sel.american_odds().unwrap_or_else(|| "-".to_string()),
            sel.fractional_odds().unwrap_or_else(|| "-".to_string())
        );
        if !sel.available_options.is_empty() {
            println!("   Options: {}", sel.available_options.join(", "));
        }
        println!(
            "   Stake: ${:.2}  Potential Profit: ${:.2}  Risk: {}",
            sel.stake,
            sel.potential_profit(),
            sel.risk_level()
        );
        println!(
            "   Result: {}  P/L: {}",
            colored_result(eval.won),
            colored_amount(eval.profit_loss)
        );
        println!(
            "   Implied Probability: {:.2}%",
            eval.implied_probability
        );
        println!("   Explanation: {}", eval.explanation);
    }
}

fn render_summary(summary: &SummaryTotals) {
    println!();
    banner("BETTING SUMMARY");
    println!("Total Bets: {}", summary.total_bets);
    println!(
        "Winning Bets: {} ({:.2}%)",
        summary.winning_bets, summary.win_rate
    );
    println!("Average Odds: {:.2}", summary.avg_odds);
    println!("Total Stake: ${:.2}", summary.total_stake);
    println!("Total Returns: ${:.2}", summary.total_returns);
    println!("Profit/Loss: {}", colored_amount(summary.profit_loss));
    println!("ROI: {:.2}%", summary.roi);
    println!("Max Drawdown: ${:.2}", summary.max_drawdown);
}

fn render_breakdown(title: &str, analysis: &[DimensionAnalysis]) {
    if analysis.is_empty() {
        return;
    }

    println!("\n{}", title.yellow().bold());
    println!(
        "{:<26} {:>6} {:>6} {:>10} {:>10} {:>9}",
        "Key", "Bets", "Wins", "Win Rate", "Profit", "ROI"
    );
    println!("{}", "-".repeat(72));
    for a in analysis {
        println!(
            "{:<26} {:>6} {:>6} {:>9.1}% {:>10.2} {:>8.1}%",
            truncate_name(&a.key, 26),
            a.bets,
            a.wins,
            a.win_rate,
            a.profit,
            a.roi
        );
    }
}

fn run_interactive(data_dir: &Path, config: EvaluationConfig) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!();

    let theme = ColorfulTheme::default();

    loop {
        let options = ["Cricket", "Volleyball", "Both", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("Which match would you like to evaluate?")
            .items(&options)
            .default(2)
            .interact()?;

        if selection == 3 {
            println!("Goodbye!");
            break;
        }

        let stake: f64 = Input::with_theme(&theme)
            .with_prompt("Stake per selection")
            .default(config.stake)
            .interact_text()?;

        let config = EvaluationConfig {
            stake,
            ..config.clone()
        };

        println!();
        let outcome = match selection {
            0 => run_cricket(
                &Evaluator::new(config),
                &data_dir.join(CRICKET_PREMATCH_FILE),
                &data_dir.join(CRICKET_RESULT_FILE),
                false,
            ),
            1 => run_volleyball(
                &Evaluator::new(config),
                &data_dir.join(VOLLEYBALL_PREMATCH_FILE),
                &data_dir.join(VOLLEYBALL_RESULT_FILE),
                false,
            ),
            _ => run_all(data_dir, config, false),
        };
        if let Err(e) = outcome {
            eprintln!("{}: {:#}", "Error".red(), e);
        }
        println!();
    }

    Ok(())
}

fn colored_result(won: bool) -> ColoredString {
    if won {
        result_text(won).green().bold()
    } else {
        result_text(won).red().bold()
    }
}

fn colored_amount(amount: f64) -> ColoredString {
    let text = format!("${:.2}", amount);
    if amount >= 0.0 {
        text.green()
    } else {
        text.red()
    }
}

fn odd_even(value: u32) -> &'static str {
    if value % 2 == 0 {
        "Even"
    } else {
        "Odd"
    }
}

/// Truncate name to fit display width
fn truncate_name(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_len {
        name.to_string()
    } else {
        chars[..max_len - 1].iter().collect::<String>() + "…"
    }
}
