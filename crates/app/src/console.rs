use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use services::{QuizDriver, QuizIntent};
use tokio::io::{BufReader, Lines, Stdin};
use tracing::warn;

use crate::render;

pub type InputLines = Lines<BufReader<Stdin>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Intent(QuizIntent),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingNumber(&'static str),
    InvalidNumber(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(raw) => write!(f, "unknown command: {raw} (type ? for help)"),
            CommandError::MissingNumber(cmd) => write!(f, "{cmd} needs a number, e.g. `{cmd} 2`"),
            CommandError::InvalidNumber(raw) => write!(f, "expected a number from 1, got {raw}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parses one input line. Numbers are 1-based on screen and 0-based in intents.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Show);
    };

    let command = match head {
        "n" | "next" => Command::Intent(QuizIntent::Next),
        "p" | "prev" | "previous" => Command::Intent(QuizIntent::Previous),
        "f" | "flag" => Command::Intent(QuizIntent::ToggleFlag),
        "s" | "submit" | "finish" => Command::Intent(QuizIntent::Submit),
        "g" | "go" => Command::Intent(QuizIntent::GoTo(one_based(parts.next(), "g")?)),
        "a" | "answer" => Command::Intent(QuizIntent::Select(one_based(parts.next(), "a")?)),
        "show" => Command::Show,
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn one_based(raw: Option<&str>, cmd: &'static str) -> Result<usize, CommandError> {
    let raw = raw.ok_or(CommandError::MissingNumber(cmd))?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidNumber(raw.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Submitted,
    Quit,
    InputClosed,
}

/// Print `message` and read one line. `None` means stdin closed.
pub async fn prompt(lines: &mut InputLines, message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    lines.next_line().await
}

/// Drives one in-progress session until it is submitted or the user leaves.
///
/// Ticks and input lines are handled one at a time in this task, so the
/// session never sees two operations at once.
pub async fn run_session(
    driver: &mut QuizDriver,
    lines: &mut InputLines,
) -> io::Result<SessionEnd> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = driver.apply(QuizIntent::Tick) {
                    warn!(%err, "tick rejected");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(SessionEnd::InputClosed);
                };
                match parse_command(&line) {
                    Ok(Command::Intent(intent)) => {
                        if let Err(err) = driver.apply(intent) {
                            println!("{err}");
                        }
                    }
                    Ok(Command::Show) => render::print_view(&driver.view()),
                    Ok(Command::Help) => render::print_help(),
                    Ok(Command::Quit) => return Ok(SessionEnd::Quit),
                    Err(err) => println!("{err}"),
                }
            }
        }

        if driver.session().is_submitted() {
            return Ok(SessionEnd::Submitted);
        }
    }
}

/// Returns `true` to start over, `false` to exit.
pub async fn ask_restart(lines: &mut InputLines) -> io::Result<bool> {
    loop {
        match prompt(lines, "Type r to restart or q to quit: ").await? {
            None => return Ok(false),
            Some(line) => match line.trim() {
                "r" | "restart" => return Ok(true),
                "q" | "quit" => return Ok(false),
                _ => {}
            },
        }
    }
}
