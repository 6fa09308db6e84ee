use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use voxmine_core::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

mod config;
mod logger;
mod render;
mod store;

use store::JsonFileStore;

/// Volumetric minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// JSON file holding best times
    #[arg(long, global = true, default_value = "voxmine-scores.json")]
    scores: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play rounds interactively
    Play {
        /// easy, medium, hard or 1, 2, 3
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,
        /// Seed for trigger placement and cascades, defaults to the clock
        #[arg(long)]
        seed: Option<u64>,
        /// TOML file overriding trigger ratios and cascade chance
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Show best times
    Scores,
}

const HELP: &str = "\
commands:
  r X Y Z   reveal a cell
  m X Y Z   cycle the mark of a cell
  n [D]     new round, optionally with another difficulty
  give-up   end the round as lost
  q         quit";

enum Action {
    Reveal(Coord3),
    Mark(Coord3),
    NewRound(Option<Difficulty>),
    GiveUp,
    Quit,
    Help,
}

fn parse_coords<'a>(mut args: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord3> {
    let mut next = || -> anyhow::Result<Axis> {
        let arg = args.next().context("expected three coordinates")?;
        arg.parse().with_context(|| format!("invalid coordinate {arg:?}"))
    };
    let (x, y, z) = (next()?, next()?, next()?);
    Ok(Coord3::new(x, y, z))
}

fn parse_action(line: &str) -> anyhow::Result<Action> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Action::Help);
    };
    Ok(match command {
        "r" | "reveal" => Action::Reveal(parse_coords(words)?),
        "m" | "mark" => Action::Mark(parse_coords(words)?),
        "n" | "new" => Action::NewRound(words.next().map(str::parse::<Difficulty>).transpose()?),
        "give-up" => Action::GiveUp,
        "q" | "quit" => Action::Quit,
        "?" | "h" | "help" => Action::Help,
        other => bail!("unknown command {other:?}"),
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| since.as_nanos() as u64)
        .unwrap_or_default()
}

fn print_round<S: KeyValueStore>(round: &Round<S>) {
    if let Some(obs) = Observation::from_round(round) {
        print!("{}", render::render(&obs));
    }
}

fn report_end<S: KeyValueStore>(round: &Round<S>) {
    match round.state() {
        RoundState::Won => {
            if let Some(result) = round.last_result() {
                println!(
                    "cleared in {:.1}s, score {}{}",
                    result.elapsed.as_secs_f64(),
                    result.score,
                    if result.new_best { " (new best)" } else { "" }
                );
            }
        }
        RoundState::Lost => {
            if let Some(coords) = round.triggered_at() {
                println!("hit a trigger at {coords}");
            } else {
                println!("round lost");
            }
        }
        _ => return,
    }
    println!("type `n` for a new round or `q` to quit");
}

fn play(
    scores: JsonFileStore,
    difficulty: Difficulty,
    seed: u64,
    rules: RulesConfig,
) -> anyhow::Result<()> {
    log::info!("Seed {seed}, scores in {}", scores.path().display());
    let mut round = Round::new(rules, ScoreStore::new(scores), seed)?;
    let mut difficulty = difficulty;

    println!("best for {difficulty}: {}", round.scores().display_best(difficulty));
    round.start(difficulty)?;
    print_round(&round);
    println!("{HELP}");

    let stdin = io::stdin();
    let mut last_tick = Instant::now();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let now = Instant::now();
        round.tick(now - last_tick);
        last_tick = now;

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };

        let result = match action {
            Action::Reveal(coords) => round.reveal_at(coords).map(RevealOutcome::has_update),
            Action::Mark(coords) => round.toggle_mark(coords).map(MarkOutcome::has_update),
            Action::GiveUp => round.lose().map(|()| true),
            Action::NewRound(next) => {
                difficulty = next.unwrap_or(difficulty);
                round
                    .reset()
                    .and_then(|()| round.start(difficulty))
                    .map(|()| {
                        println!("best for {difficulty}: {}", round.scores().display_best(difficulty));
                        true
                    })
            }
            Action::Help => {
                println!("{HELP}");
                continue;
            }
            Action::Quit => break,
        };

        match result {
            Ok(true) => {
                print_round(&round);
                report_end(&round);
            }
            Ok(false) => println!("nothing changed"),
            Err(err) => println!("{err}"),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose.log_level_filter()).context("initializing logger")?;

    let scores = JsonFileStore::open(&cli.scores)?;

    match cli.command {
        Command::Play {
            difficulty,
            seed,
            rules,
        } => {
            let rules = config::load_rules(rules.as_deref())?;
            play(scores, difficulty, seed.unwrap_or_else(clock_seed), rules)
        }
        Command::Scores => {
            let scores = ScoreStore::new(scores);
            for difficulty in Difficulty::ALL {
                println!("{difficulty:>6}: {}", scores.display_best(difficulty));
            }
            Ok(())
        }
    }
}
