use std::fmt;

use chrono::{DateTime, Duration, Utc};
use quiz_core::Clock;
use quiz_core::model::{NewScore, PlayerName, QuestionBank};
use storage::repository::ScoreRepository;
use storage::sqlite::SqliteRepository;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    scores: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidScores { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidScores { raw } => write!(f, "invalid --scores value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| "sqlite:quiz.sqlite3?mode=rwc".into());
        let mut scores = std::env::var("QUIZ_SEED_SCORES")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(8);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--scores" => {
                    let value = require_value(&mut args, "--scores")?;
                    scores = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidScores { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            scores,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:quiz.sqlite3?mode=rwc)");
    eprintln!("  --scores <n>              Number of sample scores to add (default: 8)");
    eprintln!("  --now <rfc3339>           Timestamp of the newest sample score");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_DB_URL, QUIZ_SEED_SCORES");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let total = QuestionBank::synaptic().total();
    let newest = args.now.unwrap_or_else(Utc::now);
    let oldest = newest - Duration::hours(i64::from(args.scores));

    let repo = SqliteRepository::connect(&args.db_url).await?;
    repo.migrate().await?;

    let players = ["Ramón", "Camillo", "Rita", "Eric", "Santiago", "Donald", "Brenda", "Alan"];
    let mut clock = Clock::fixed(oldest);
    for i in 0..args.scores {
        let idx = usize::try_from(i).unwrap_or(0) % players.len();
        let name = PlayerName::parse(players[idx])?;
        let correct = i.saturating_mul(5).saturating_add(3) % (total + 1);
        let score = NewScore::new(name, correct, total)?;

        clock.advance(Duration::hours(1));
        repo.clone().with_clock(clock).create(&score).await?;
    }

    println!("Seeded {} sample scores into {}", args.scores, args.db_url);

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
