use std::fmt;
use std::io::{self, BufRead, Write};

use quiz_core::leaderboard::{EMPTY_LEADERBOARD_MESSAGE, Medal, RankedEntry};
use quiz_core::model::{Grade, OptionIndex, QuestionBank};
use quiz_core::quiz::{Advanced, OptionState, Phase, QuizSession};
use services::{AppServices, Backend, Clock, QuizLoopService};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    ConflictingBackends,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::ConflictingBackends => write!(f, "--db and --remote cannot be combined"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [play]      [--db <sqlite_url> | --remote]");
    eprintln!("  cargo run -p app -- leaderboard [--db <sqlite_url> | --remote]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_BACKEND=remote");
    eprintln!("  QUIZ_API_URL, QUIZ_API_KEY, QUIZ_ENTITY, QUIZ_API_TIMEOUT_SECS");
    eprintln!("  RUST_LOG (e.g. RUST_LOG=debug)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Leaderboard,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "leaderboard" | "scores" => Some(Self::Leaderboard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BackendChoice {
    FromEnv,
    Sqlite(String),
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    command: Command,
    backend: BackendChoice,
    help: bool,
}

impl Args {
    fn parse(argv: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();

        // Default behavior: play when no subcommand is provided.
        let command = match args.peek().map(String::as_str) {
            Some(first) if !first.starts_with('-') => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                args.next();
                command
            }
            _ => Command::Play,
        };

        let mut backend = BackendChoice::FromEnv;
        let mut help = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    if backend == BackendChoice::Remote {
                        return Err(ArgsError::ConflictingBackends);
                    }
                    backend = BackendChoice::Sqlite(normalize_sqlite_url(value));
                }
                "--remote" => {
                    if matches!(backend, BackendChoice::Sqlite(_)) {
                        return Err(ArgsError::ConflictingBackends);
                    }
                    backend = BackendChoice::Remote;
                }
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            command,
            backend,
            help,
        })
    }

    fn resolve_backend(&self) -> Result<Backend, Box<dyn std::error::Error>> {
        let backend = match &self.backend {
            BackendChoice::Sqlite(url) => Backend::Sqlite { url: url.clone() },
            BackendChoice::Remote => Backend::remote_from_env()?,
            BackendChoice::FromEnv => match Backend::from_env(DEFAULT_DB_URL)? {
                Backend::Sqlite { url } => Backend::Sqlite {
                    url: normalize_sqlite_url(url),
                },
                remote => remote,
            },
        };
        Ok(backend)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Line-oriented prompt over stdin; `None` means end of input.
struct Prompt<R> {
    input: R,
}

impl<R: BufRead> Prompt<R> {
    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        print!("{message}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn parse_answer(raw: &str) -> Option<OptionIndex> {
    let mut chars = raw.trim().chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if let Some(option) = OptionIndex::from_letter(first) {
        return Some(option);
    }
    let digit = usize::try_from(first.to_digit(10)?).ok()?;
    OptionIndex::new(digit.checked_sub(1)?)
}

fn print_intro(bank: &QuestionBank) {
    println!();
    println!("Synaptic Transmission & Plasticity Quiz");
    println!("=======================================");
    println!(
        "{} questions on neurotransmitters, receptors, and learning at the synapse.",
        bank.len()
    );
    println!("Answer with A-D. Type q to quit.");
    println!();
}

fn option_marker(state: OptionState) -> &'static str {
    match state {
        OptionState::Selectable | OptionState::Dimmed => "  ",
        OptionState::Correct => "✓ ",
        OptionState::Incorrect => "✗ ",
    }
}

fn print_question(session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let progress = session.progress();
    println!();
    println!(
        "Question {} of {}    Score: {}/{}",
        progress.question_number, progress.total, progress.score, progress.answered
    );
    println!("{}", question.text());
    let states = session.option_states();
    for option in OptionIndex::ALL {
        let marker = states.map_or("  ", |s| option_marker(s[option.value()]));
        println!("  {marker}{option}) {}", question.option(option));
    }
}

/// Play every question of the current attempt. Returns `false` if the player quit.
fn play_questions<R: BufRead>(
    session: &mut QuizSession,
    prompt: &mut Prompt<R>,
) -> Result<bool, Box<dyn std::error::Error>> {
    loop {
        print_question(session);
        let option = loop {
            let Some(raw) = prompt.ask("Your answer: ")? else {
                return Ok(false);
            };
            if raw.eq_ignore_ascii_case("q") {
                return Ok(false);
            }
            match parse_answer(&raw) {
                Some(option) => break option,
                None => println!("Please answer with A, B, C or D."),
            }
        };

        let feedback = session.select_option(option)?;
        print_question(session);
        if feedback.is_correct {
            println!("Correct!");
        } else {
            println!("Incorrect. The answer is {}.", feedback.correct);
        }

        let label = if session.is_last_question() {
            "[Enter] See results "
        } else {
            "[Enter] Next question "
        };
        if prompt.ask(label)?.is_none() {
            return Ok(false);
        }
        if session.advance()? == Advanced::Finished {
            return Ok(true);
        }
    }
}

fn headline(grade: Grade) -> String {
    if grade.is_high() {
        format!("🏆 {}", grade.headline())
    } else {
        grade.headline().to_string()
    }
}

fn print_results(session: &QuizSession) {
    let Some(results) = session.results() else {
        return;
    };
    println!();
    println!("{}", headline(results.grade));
    println!("{}", results.percentage);
    println!(
        "{} correct, {} incorrect, {} total",
        results.score, results.incorrect, results.total
    );
}

/// What to do once the results screen is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextStep {
    ShowLeaderboard,
    PlayAgain,
}

/// Offer to save the result. The save runs in the background, so the player
/// may restart while it is pending; its completion is then dropped.
async fn offer_save<R: BufRead>(
    quiz: &QuizLoopService,
    session: &mut QuizSession,
    prompt: &mut Prompt<R>,
) -> Result<NextStep, Box<dyn std::error::Error>> {
    while session.can_save() {
        let Some(name) = prompt.ask("Enter your name to save your score (blank to skip): ")?
        else {
            return Ok(NextStep::ShowLeaderboard);
        };
        if name.is_empty() {
            return Ok(NextStep::ShowLeaderboard);
        }
        let submission = match session.begin_save(&name) {
            Ok(submission) => submission,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let pending = tokio::spawn(quiz.save_task(submission));
        println!("Saving your score...");
        let restart = prompt
            .ask("[Enter] Leaderboard  [r] Play again ")?
            .is_some_and(|choice| choice.eq_ignore_ascii_case("r"));
        if restart {
            session.start()?;
        }

        let outcome = pending.await?;
        match outcome.apply(session) {
            Ok(true) => println!("Score saved!"),
            Ok(false) => log::debug!("save finished after the player restarted"),
            Err(err) if restart => log::warn!("previous attempt was not saved: {err}"),
            Err(err) => println!("Could not save your score ({err}). Try again."),
        }
        if restart {
            return Ok(NextStep::PlayAgain);
        }
    }
    Ok(NextStep::ShowLeaderboard)
}

fn medal_label(medal: Option<Medal>) -> &'static str {
    match medal {
        Some(Medal::Gold) => "🥇",
        Some(Medal::Silver) => "🥈",
        Some(Medal::Bronze) => "🥉",
        None => "  ",
    }
}

fn print_leaderboard(entries: &[RankedEntry]) {
    println!();
    println!("Leaderboard");
    println!("-----------");
    if entries.is_empty() {
        println!("{EMPTY_LEADERBOARD_MESSAGE}");
        return;
    }
    for entry in entries {
        let you = if entry.is_current { "  <- you" } else { "" };
        println!(
            "{} {:>2}. {:<30} {:>4}  ({}/{}){you}",
            medal_label(entry.medal()),
            entry.position,
            entry.record.player_name().as_str(),
            entry.record.percentage().to_string(),
            entry.record.score(),
            entry.record.total_questions(),
        );
    }
}

async fn show_leaderboard(quiz: &QuizLoopService, session: Option<&QuizSession>) {
    let current = session.and_then(QuizSession::saved_record);
    match quiz.leaderboard(current).await {
        Ok(entries) => print_leaderboard(&entries),
        Err(err) => println!("Could not load the leaderboard: {err}"),
    }
}

async fn play(quiz: &QuizLoopService) -> Result<(), Box<dyn std::error::Error>> {
    let mut prompt = Prompt {
        input: io::stdin().lock(),
    };
    let mut session = quiz.new_session();

    print_intro(quiz.bank());
    if prompt.ask("[Enter] Start quiz ")?.is_none() {
        return Ok(());
    }

    loop {
        if session.phase() != Phase::Playing {
            session.start()?;
        }
        if !play_questions(&mut session, &mut prompt)? {
            println!("Bye!");
            return Ok(());
        }
        print_results(&session);
        if offer_save(quiz, &mut session, &mut prompt).await? == NextStep::PlayAgain {
            continue;
        }
        show_leaderboard(quiz, Some(&session)).await;

        let again = prompt.ask("\nPlay again? [y/N] ")?;
        if !again.is_some_and(|answer| answer.eq_ignore_ascii_case("y")) {
            return Ok(());
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let backend = args.resolve_backend()?;
    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    if let Backend::Sqlite { url } = &backend {
        prepare_sqlite_file(url)?;
    }
    let services = AppServices::connect(backend, Clock::default_clock()).await?;
    let quiz = services.quiz();

    match args.command {
        Command::Play => play(&quiz).await,
        Command::Leaderboard => {
            show_leaderboard(&quiz, None).await;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
