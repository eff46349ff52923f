use quiz_core::{NavStatus, Report, SubmitReason, format_mm_ss};
use services::{QuizConfig, QuizIntent, SessionListener, SessionView};
use tracing::warn;

/// Remaining-time marks that get a one-line warning.
const TIME_WARNINGS: [u32; 3] = [300, 60, 10];

/// Prints session updates to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer {
    json: bool,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl SessionListener for TerminalRenderer {
    fn started(&mut self, view: &SessionView) {
        print_view(view);
    }

    fn state_changed(&mut self, intent: QuizIntent, view: &SessionView) {
        match intent {
            QuizIntent::Tick => {
                if let Some(line) = time_warning(view.remaining_seconds) {
                    println!("{line}");
                }
            }
            _ => print_view(view),
        }
    }

    fn submitted(&mut self, report: &Report) {
        if self.json {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    warn!(%err, "report serialization failed");
                    print_report(report);
                }
            }
        } else {
            print_report(report);
        }
    }

    fn restarted(&mut self, view: &SessionView) {
        println!();
        println!(
            "Starting over: {} on the clock.",
            format_mm_ss(view.remaining_seconds)
        );
    }
}

fn time_warning(remaining: u32) -> Option<String> {
    TIME_WARNINGS
        .contains(&remaining)
        .then(|| format!("** {} remaining **", format_mm_ss(remaining)))
}

fn status_mark(status: NavStatus) -> char {
    match status {
        NavStatus::Current => '>',
        NavStatus::Flagged => '?',
        NavStatus::Attempted => '+',
        NavStatus::Visited => '-',
        NavStatus::Unseen => ' ',
    }
}

/// One cell per question, e.g. `1+ 2? 3> 4  5 `.
fn nav_grid(statuses: &[NavStatus]) -> String {
    statuses
        .iter()
        .enumerate()
        .map(|(index, status)| format!("{}{}", index + 1, status_mark(*status)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_view(view: &SessionView) {
    let Some(current) = view.current else {
        return;
    };

    println!();
    println!("[{}]  {}", format_mm_ss(view.remaining_seconds), nav_grid(&view.statuses));
    println!(
        "Question {} of {}  ({} answered, {} unanswered, {} flagged)",
        current + 1,
        view.total,
        view.answered,
        view.unanswered(),
        view.flagged
    );
    if let Some(question) = &view.question {
        println!("{question}");
    }
    for (index, choice) in view.choices.iter().enumerate() {
        let mark = if choice.selected { "(*)" } else { "( )" };
        println!("  {mark} {}. {}", index + 1, choice.text);
    }

    let next = if view.next_submits { "n finish" } else { "n next" };
    let previous = if view.can_go_previous { " | p previous" } else { "" };
    println!("{next}{previous} | a <k> answer | g <k> go to | f flag | s submit | ? help");
}

pub fn print_help() {
    println!("Commands:");
    println!("  a <k>   choose option k for the current question");
    println!("  n       next question (finishes on the last one)");
    println!("  p       previous question");
    println!("  g <k>   go to question k");
    println!("  f       flag or unflag the current question");
    println!("  s       submit now");
    println!("  <enter> show the current question again");
    println!("  q       quit");
    println!("Grid: > current, ? flagged, + answered, - visited");
}

pub fn print_guidelines(config: &QuizConfig) {
    println!();
    println!("Guidelines");
    println!(
        "  - The quiz has {} multiple-choice questions and a time limit of {}.",
        config.question_count,
        format_mm_ss(config.duration_secs)
    );
    println!("  - Move with next and previous, or jump to any question by number.");
    println!("  - Flag questions you want to revisit. Answers can be changed until you submit.");
    println!("  - When the timer reaches 00:00 the quiz is submitted automatically.");
}

pub fn print_report(report: &Report) {
    println!();
    if report.reason() == SubmitReason::TimeExpired {
        println!("Time is up. Your answers were submitted automatically.");
    }
    println!("{}", report.score_line());
    println!("Time taken: {}", format_mm_ss(elapsed_display(report)));
    for entry in report.entries() {
        let verdict = if entry.is_correct { "correct" } else { "incorrect" };
        println!();
        println!("{}. {}", entry.position + 1, entry.question);
        println!("   Your answer:    {} ({verdict})", entry.your_answer);
        println!("   Correct answer: {}", entry.correct_answer);
    }
}

fn elapsed_display(report: &Report) -> u32 {
    u32::try_from(report.elapsed_seconds()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_marks_each_status() {
        let statuses = [
            NavStatus::Attempted,
            NavStatus::Flagged,
            NavStatus::Current,
            NavStatus::Visited,
            NavStatus::Unseen,
        ];
        assert_eq!(nav_grid(&statuses), "1+ 2? 3> 4- 5 ");
    }

    #[test]
    fn elapsed_time_comes_from_report_stamps() {
        use quiz_core::model::{AnswerLedger, Question, QuestionSet};
        use quiz_core::report::ReportContext;
        use quiz_core::time::fixed_now;

        let question = Question::new("Q1", vec!["a".into(), "b".into()], "a").unwrap();
        let questions = QuestionSet::new(vec![question]).unwrap();
        let report = Report::generate(
            &questions,
            &AnswerLedger::new(1),
            ReportContext {
                reason: SubmitReason::Manual,
                started_at: fixed_now(),
                submitted_at: fixed_now() + chrono::Duration::seconds(125),
                remaining_seconds: 475,
            },
        );

        assert_eq!(format_mm_ss(elapsed_display(&report)), "02:05");
    }

    #[test]
    fn warns_only_at_marks() {
        assert_eq!(time_warning(60).as_deref(), Some("** 01:00 remaining **"));
        assert!(time_warning(59).is_none());
        assert!(time_warning(0).is_none());
    }
}
