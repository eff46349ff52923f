mod console;
mod render;

use std::fmt;
use std::sync::Arc;

use services::{
    Clock, OpenTriviaProvider, QuestionProvider, QuizConfig, QuizLoopService,
    StaticQuestionProvider,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::console::SessionEnd;
use crate::render::TerminalRenderer;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
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

fn require_number(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<u32, ArgsError> {
    let value = require_value(args, flag)?;
    value
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw: value })
}

#[derive(Debug, Default)]
struct Args {
    email: Option<String>,
    count: Option<u32>,
    duration_secs: Option<u32>,
    base_url: Option<String>,
    offline: bool,
    json: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--email" => parsed.email = Some(require_value(args, "--email")?),
                "--count" => parsed.count = Some(require_number(args, "--count")?),
                "--duration" => parsed.duration_secs = Some(require_number(args, "--duration")?),
                "--base-url" => parsed.base_url = Some(require_value(args, "--base-url")?),
                "--offline" => parsed.offline = true,
                "--json" => parsed.json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Flags win over `QUIZ_*` environment values.
    fn overlay(&self, mut config: QuizConfig) -> QuizConfig {
        if let Some(count) = self.count {
            config = config.with_question_count(count);
        }
        if let Some(duration) = self.duration_secs {
            config = config.with_duration_secs(duration);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        config
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--email <addr>] [--count <n>] [--duration <secs>]");
    eprintln!("                      [--base-url <url>] [--offline] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --count 15 --duration 1800 --base-url https://opentdb.com");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_QUESTION_COUNT, QUIZ_DURATION_SECS, RUST_LOG");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let config = args.overlay(QuizConfig::from_env()?).validate()?;
    debug!(?config, offline = args.offline, "configuration loaded");

    let provider: Arc<dyn QuestionProvider> = if args.offline {
        Arc::new(StaticQuestionProvider::sample())
    } else {
        Arc::new(OpenTriviaProvider::from_config(&config))
    };
    let service = QuizLoopService::new(Clock::system(), provider, config);
    let mut driver = service.new_driver()?;
    driver.set_listener(Box::new(TerminalRenderer::new(args.json)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut preset_email = args.email;

    loop {
        let raw = match preset_email.take() {
            Some(email) => email,
            None => match console::prompt(&mut lines, "Email: ").await? {
                Some(line) => line,
                None => return Ok(()),
            },
        };
        let entrant = match service.admit(&raw) {
            Ok(entrant) => entrant,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        render::print_guidelines(service.config());
        if console::prompt(&mut lines, "Press Enter to start. ").await?.is_none() {
            return Ok(());
        }

        println!("Loading questions...");
        if let Err(err) = service.begin(&mut driver, entrant).await {
            println!("Could not start the quiz: {err}");
            continue;
        }

        match console::run_session(&mut driver, &mut lines).await? {
            SessionEnd::Submitted => {}
            SessionEnd::Quit | SessionEnd::InputClosed => return Ok(()),
        }

        if !console::ask_restart(&mut lines).await? {
            return Ok(());
        }
        driver.restart();
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(&mut args.iter().map(|a| (*a).to_string()))
    }

    #[test]
    fn parses_flags() {
        let args = parse(&["--email", "a@b.co", "--count", "5", "--duration", "90", "--offline"])
            .unwrap();
        assert_eq!(args.email.as_deref(), Some("a@b.co"));
        assert_eq!(args.count, Some(5));
        assert_eq!(args.duration_secs, Some(90));
        assert!(args.offline);
        assert!(!args.json);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(&["--count", "lots"]),
            Err(ArgsError::InvalidNumber { flag: "--count", .. })
        ));
        assert!(matches!(
            parse(&["--email"]),
            Err(ArgsError::MissingValue { flag: "--email" })
        ));
        assert!(matches!(parse(&["--bogus"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&["--count", "3", "--base-url", "http://localhost:9000"]).unwrap();
        let config = args.overlay(QuizConfig::default());
        assert_eq!(config.question_count, 3);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.duration_secs, QuizConfig::default().duration_secs);
    }
}
