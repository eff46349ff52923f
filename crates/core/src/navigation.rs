use serde::Serialize;

use crate::session::Session;

/// Display status of one question in the navigation grid.
///
/// Variants are listed in precedence order: the first one that applies wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavStatus {
    Current,
    Flagged,
    Attempted,
    Visited,
    Unseen,
}

impl NavStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NavStatus::Current => "current",
            NavStatus::Flagged => "flagged",
            NavStatus::Attempted => "attempted",
            NavStatus::Visited => "visited",
            NavStatus::Unseen => "unseen",
        }
    }
}

/// Membership flags for a single question index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Membership {
    pub current: bool,
    pub flagged: bool,
    pub attempted: bool,
    pub visited: bool,
}

#[must_use]
pub fn classify(membership: Membership) -> NavStatus {
    if membership.current {
        NavStatus::Current
    } else if membership.flagged {
        NavStatus::Flagged
    } else if membership.attempted {
        NavStatus::Attempted
    } else if membership.visited {
        NavStatus::Visited
    } else {
        NavStatus::Unseen
    }
}

/// One status per question index. Empty before the session starts.
#[must_use]
pub fn statuses(session: &Session) -> Vec<NavStatus> {
    let current = session.current_index();
    (0..session.question_count())
        .map(|index| {
            classify(Membership {
                current: current == Some(index),
                flagged: session.is_flagged(index),
                attempted: session.is_attempted(index),
                visited: session.is_visited(index),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionSet};
    use crate::time::fixed_now;

    #[test]
    fn precedence_holds_for_every_combination() {
        for bits in 0_u8..16 {
            let membership = Membership {
                current: bits & 0b1000 != 0,
                flagged: bits & 0b0100 != 0,
                attempted: bits & 0b0010 != 0,
                visited: bits & 0b0001 != 0,
            };
            let expected = if membership.current {
                NavStatus::Current
            } else if membership.flagged {
                NavStatus::Flagged
            } else if membership.attempted {
                NavStatus::Attempted
            } else if membership.visited {
                NavStatus::Visited
            } else {
                NavStatus::Unseen
            };
            assert_eq!(classify(membership), expected, "bits {bits:04b}");
        }
    }

    #[test]
    fn statuses_reflect_session_state() {
        let questions = (1..=5)
            .map(|n| Question::new(format!("Q{n}"), vec!["a".into(), "b".into()], "a").unwrap())
            .collect();
        let mut session = Session::new(60).unwrap();
        assert!(statuses(&session).is_empty());

        session
            .start(QuestionSet::new(questions).unwrap(), fixed_now())
            .unwrap();
        session.select_answer(1).unwrap();
        session.go_to(1).unwrap();
        session.toggle_flag().unwrap();
        session.select_answer(0).unwrap();
        session.go_to(2).unwrap();
        session.go_to(3).unwrap();

        assert_eq!(
            statuses(&session),
            vec![
                NavStatus::Attempted,
                NavStatus::Flagged,
                NavStatus::Visited,
                NavStatus::Current,
                NavStatus::Unseen,
            ]
        );
    }
}
