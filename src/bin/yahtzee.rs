//! Command-line front end.
//!
//! Usage:
//!   yahtzee simulate [--strategy random,rule-based,expected-value] [--games 10000] [--csv out.csv]
//!   yahtzee play [--seed 7]
//!   yahtzee summary report.bin
//!
//! Seed and thread count default to `YAHTZEE_SEED` / `YAHTZEE_THREADS`.
//! Log verbosity follows `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use yahtzee_sim::core::DICE_COUNT;
use yahtzee_sim::{
    Category, GameConfig, GameEngine, GameError, HoldMask, JokerRule,
    SimulationConfig, SimulationReport, Simulator, Strategy, StrategyKind, TurnPhase,
};

#[derive(Parser)]
#[command(name = "yahtzee", about = "Yahtzee engine and strategy simulator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate games and compare strategies
    Simulate(SimulateArgs),
    /// Play one game at the terminal
    Play(PlayArgs),
    /// Print the summary of a saved binary report
    Summary {
        /// Report written by `simulate --snapshot`
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct SimulateArgs {
    /// Strategies to run, comma separated
    #[arg(
        short,
        long = "strategy",
        value_delimiter = ',',
        default_values_t = StrategyKind::ALL
    )]
    strategies: Vec<StrategyKind>,

    /// Games per strategy
    #[arg(short = 'n', long, default_value_t = 10_000)]
    games: usize,

    /// Base seed (default: YAHTZEE_SEED or 0)
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (default: YAHTZEE_THREADS, RAYON_NUM_THREADS or all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Play all games on the main thread
    #[arg(long)]
    serial: bool,

    /// Joker rule for extra Yahtzees
    #[arg(long, value_enum, default_value_t = JokerArg::Hasbro)]
    joker: JokerArg,

    /// Write one row per game as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write per-strategy summaries as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write a binary snapshot of the full report
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(clap::Args)]
struct PlayArgs {
    /// Seed for the dice (default: YAHTZEE_SEED or 0)
    #[arg(long)]
    seed: Option<u64>,

    /// Joker rule for extra Yahtzees
    #[arg(long, value_enum, default_value_t = JokerArg::Hasbro)]
    joker: JokerArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum JokerArg {
    Hasbro,
    Disabled,
}

impl From<JokerArg> for JokerRule {
    fn from(arg: JokerArg) -> Self {
        match arg {
            JokerArg::Hasbro => JokerRule::Hasbro,
            JokerArg::Disabled => JokerRule::Disabled,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Simulate(args) => simulate(args),
        Command::Play(args) => play(args),
        Command::Summary { path } => summary(&path),
    }
}

// =============================================================================
// simulate
// =============================================================================

fn simulate(args: SimulateArgs) -> Result<()> {
    let mut config = SimulationConfig::from_env()
        .with_parallel(!args.serial)
        .with_game_config(GameConfig::new().with_joker_rule(args.joker.into()))
        .with_records(args.csv.is_some() || args.snapshot.is_some());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    let strategies: Vec<Arc<dyn Strategy>> = args.strategies.iter().map(|k| k.build()).collect();
    println!(
        "Simulating {} games per strategy (seed {}, {})",
        args.games,
        config.seed,
        if config.parallel { "parallel" } else { "serial" }
    );

    let report = SimulationReport::new(Simulator::new(config).run_many(&strategies, args.games));
    print_summary(&report);

    if let Some(path) = &args.csv {
        report.write_csv(BufWriter::new(create(path)?))?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &args.json {
        report.write_json(BufWriter::new(create(path)?))?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &args.snapshot {
        report.save(BufWriter::new(create(path)?))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn summary(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let report = SimulationReport::load(io::BufReader::new(file))
        .with_context(|| format!("reading report {}", path.display()))?;
    print_summary(&report);
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating {}", path.display()))
}

fn print_summary(report: &SimulationReport) {
    println!(
        "{:<16} {:>8} {:>8} {:>8} {:>6} {:>6} {:>7} {:>8} {:>10}",
        "strategy", "games", "mean", "std dev", "min", "max", "failed", "skipped", "games/s"
    );
    for result in report.results().values() {
        let stats = &result.stats;
        println!(
            "{:<16} {:>8} {:>8.2} {:>8.2} {:>6} {:>6} {:>7} {:>8} {:>10.0}",
            result.strategy,
            result.completed(),
            stats.mean(),
            stats.std_dev(),
            stats.min().map_or("-".to_string(), |v| v.to_string()),
            stats.max().map_or("-".to_string(), |v| v.to_string()),
            result.failed(),
            result.skipped,
            result.games_per_second()
        );
    }
}

// =============================================================================
// play
// =============================================================================

/// One line of user input during a turn.
enum Input {
    Hold(HoldMask),
    Stop,
    Fill(Category),
    Card,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty command, type `help`");
    };

    match verb.to_ascii_lowercase().as_str() {
        "hold" | "h" => {
            let mut indices = Vec::new();
            for word in words {
                let position: usize = word
                    .parse()
                    .with_context(|| format!("`{word}` is not a die position"))?;
                if !(1..=DICE_COUNT).contains(&position) {
                    bail!("die position {position} is out of range (1..={DICE_COUNT})");
                }
                indices.push(position - 1);
            }
            Ok(Input::Hold(HoldMask::from_indices(&indices)?))
        }
        "roll" | "r" => Ok(Input::Hold(HoldMask::none())),
        "stop" | "s" => Ok(Input::Stop),
        "fill" | "f" | "score" => {
            let name = words.collect::<Vec<_>>().join(" ");
            Ok(Input::Fill(name.parse()?))
        }
        "card" | "c" => Ok(Input::Card),
        "help" | "?" => Ok(Input::Help),
        "quit" | "q" => Ok(Input::Quit),
        other => bail!("unknown command `{other}`, type `help`"),
    }
}

fn print_help() {
    println!("  hold 1 3 5   keep dice 1, 3 and 5, reroll the rest");
    println!("  roll         reroll all dice");
    println!("  stop         stop rolling");
    println!("  fill <cat>   score the dice in a category, e.g. `fill full house`");
    println!("  card         show the scorecard");
    println!("  quit         leave the game");
}

fn print_card(engine: &GameEngine) {
    let state = engine.state();
    let card = state.scorecard();
    let rolled = !matches!(engine.phase(), TurnPhase::TurnStart | TurnPhase::GameOver);

    for category in Category::ALL {
        match card.get(category) {
            Some(points) => println!("  {:<16} {:>4}", category.name(), points),
            None if rolled => println!(
                "  {:<16}    - (now {})",
                category.name(),
                state.potential(category)
            ),
            None => println!("  {:<16}    -", category.name()),
        }
    }
    println!("  {:<16} {:>4}", "upper bonus", card.upper_bonus());
    println!("  {:<16} {:>4}", "yahtzee bonus", card.yahtzee_bonus());
    println!("  {:<16} {:>4}", "total", card.total());
}

fn show_dice(engine: &GameEngine) {
    let positions: Vec<String> = (1..=DICE_COUNT).map(|p| p.to_string()).collect();
    println!("  dice  {}", engine.state().dice());
    println!("  pos   [{}]  rolls left: {}", positions.join(" "), engine.state().rolls_left());
}

fn play(args: PlayArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| SimulationConfig::from_env().seed);
    let config = GameConfig::new().with_joker_rule(args.joker.into());
    let mut engine = GameEngine::new(&config, seed);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("Yahtzee (seed {seed}). Type `help` for commands.");

    while !engine.is_over() {
        if engine.phase() == TurnPhase::TurnStart {
            println!();
            println!("Turn {} of 13", engine.state().turn());
            engine.roll()?;
            show_dice(&engine);
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };

        let input = match parse_input(&line?) {
            Ok(input) => input,
            Err(e) => {
                println!("  {e}");
                continue;
            }
        };

        let outcome: Result<(), GameError> = match input {
            Input::Hold(mask) => {
                let rolled = engine.reroll(mask).map(|_| ());
                if rolled.is_ok() {
                    show_dice(&engine);
                }
                rolled
            }
            Input::Stop => engine.stop(),
            Input::Fill(category) => engine.fill(category).map(|fill| {
                print!("  {} scores {}", fill.category, fill.points);
                if fill.yahtzee_bonus > 0 {
                    print!(" (+{} Yahtzee bonus)", fill.yahtzee_bonus);
                }
                println!();
            }),
            Input::Card => {
                print_card(&engine);
                Ok(())
            }
            Input::Help => {
                print_help();
                Ok(())
            }
            Input::Quit => return Ok(()),
        };

        if let Err(e) = outcome {
            println!("  {e}");
        }
    }

    println!();
    print_card(&engine);
    match engine.final_score() {
        Some(score) => println!("Final score: {score}"),
        None => bail!("game ended without a final score"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_positions_are_one_based() {
        let Ok(Input::Hold(mask)) = parse_input("hold 1 3 5") else {
            panic!("expected a hold");
        };
        assert_eq!(mask, HoldMask::from_indices(&[0, 2, 4]).unwrap());
    }

    #[test]
    fn test_hold_reports_typed_position() {
        for (line, position) in [("hold 6", 6), ("h 2 0", 0)] {
            let Err(err) = parse_input(line) else {
                panic!("`{line}` should be rejected");
            };
            assert_eq!(
                err.to_string(),
                format!("die position {position} is out of range (1..=5)")
            );
        }
    }

    #[test]
    fn test_fill_parses_category_name() {
        assert!(matches!(
            parse_input("fill full house"),
            Ok(Input::Fill(Category::FullHouse))
        ));
        assert!(parse_input("dance").is_err());
    }
}
