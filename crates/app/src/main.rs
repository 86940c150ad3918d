use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::Difficulty;
use services::{HttpTriviaApi, QuizOptions, TriviaApi, TriviaConfig};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_AMOUNT: NonZeroU32 = NonZeroU32::new(10).unwrap();

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAmount { raw: String },
    InvalidCategory { raw: String },
    InvalidDifficulty { raw: String },
    InvalidBaseUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAmount { raw } => write!(f, "invalid --amount value: {raw}"),
            ArgsError::InvalidCategory { raw } => write!(f, "invalid --category value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw}")
            }
            ArgsError::InvalidBaseUrl { raw } => write!(f, "invalid --base-url value: {raw}"),
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

struct DesktopApp {
    api: Arc<dyn TriviaApi>,
    options: QuizOptions,
    default_amount: NonZeroU32,
}

impl UiApp for DesktopApp {
    fn trivia_api(&self) -> Arc<dyn TriviaApi> {
        Arc::clone(&self.api)
    }

    fn quiz_options(&self) -> QuizOptions {
        self.options.clone()
    }

    fn default_amount(&self) -> NonZeroU32 {
        self.default_amount
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--amount <n>] [--category <id>] [--difficulty <easy|medium|hard>]"
    );
    eprintln!("                     [--shuffle] [--base-url <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --amount {DEFAULT_AMOUNT}");
    eprintln!("  --base-url {}", TriviaConfig::default().base_url);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_AMOUNT, TRIVIA_CATEGORY, TRIVIA_DIFFICULTY, TRIVIA_SHUFFLE, TRIVIA_BASE_URL");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    amount: NonZeroU32,
    category: Option<u32>,
    difficulty: Option<Difficulty>,
    shuffle: bool,
    base_url: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Ui(Args),
    Help,
}

impl Args {
    /// Defaults, overridden by any well-formed environment value.
    fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let amount = lookup("TRIVIA_AMOUNT")
            .and_then(|value| parse_amount(&value).ok())
            .unwrap_or(DEFAULT_AMOUNT);
        let category = lookup("TRIVIA_CATEGORY").and_then(|value| value.trim().parse().ok());
        let difficulty = lookup("TRIVIA_DIFFICULTY").and_then(|value| value.parse().ok());
        let shuffle = lookup("TRIVIA_SHUFFLE").is_some_and(|value| is_truthy(&value));
        let base_url = TriviaConfig::from_lookup(&lookup).base_url;

        Self {
            amount,
            category,
            difficulty,
            shuffle,
            base_url,
        }
    }

    fn parse(mut self, args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--amount" => {
                    let value = require_value(args, "--amount")?;
                    self.amount = parse_amount(&value)?;
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    let parsed = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                    self.category = Some(parsed);
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDifficulty { raw: value.clone() })?;
                    self.difficulty = Some(parsed);
                }
                "--shuffle" => self.shuffle = true,
                "--base-url" => {
                    let value = require_value(args, "--base-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBaseUrl { raw: value });
                    }
                    self.base_url = value;
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Ui(self))
    }

    fn quiz_options(&self) -> QuizOptions {
        QuizOptions {
            category: self.category,
            difficulty: self.difficulty,
            shuffle_answers: self.shuffle,
        }
    }
}

fn parse_amount(raw: &str) -> Result<NonZeroU32, ArgsError> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ArgsError::InvalidAmount {
            raw: raw.to_string(),
        })
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let defaults = Args::from_env(|key| std::env::var(key).ok());
    let mut argv = std::env::args().skip(1);
    let parsed = match defaults.parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Ui(args) => args,
    };

    init_tracing();
    tracing::info!(
        amount = parsed.amount.get(),
        category = ?parsed.category,
        difficulty = ?parsed.difficulty,
        shuffle = parsed.shuffle,
        base_url = %parsed.base_url,
        "launching trivia quiz"
    );

    let api: Arc<dyn TriviaApi> = Arc::new(HttpTriviaApi::new(TriviaConfig::new(
        parsed.base_url.clone(),
    )));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        api,
        options: parsed.quiz_options(),
        default_amount: parsed.amount,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Trivia Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
