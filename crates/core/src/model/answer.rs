use serde::Serialize;

/// One slot in the answer ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    Chosen(usize),
}

impl AnswerSlot {
    #[must_use]
    pub fn choice(self) -> Option<usize> {
        match self {
            AnswerSlot::Unanswered => None,
            AnswerSlot::Chosen(index) => Some(index),
        }
    }

    #[must_use]
    pub fn is_answered(self) -> bool {
        matches!(self, AnswerSlot::Chosen(_))
    }
}

/// Fixed-length record of the chosen option per question position.
///
/// Only the latest selection is kept for each slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerLedger {
    slots: Vec<AnswerSlot>,
}

impl AnswerLedger {
    /// Creates a ledger of `len` unanswered slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![AnswerSlot::Unanswered; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<AnswerSlot> {
        self.slots.get(position).copied()
    }

    #[must_use]
    pub fn choice(&self, position: usize) -> Option<usize> {
        self.get(position).and_then(AnswerSlot::choice)
    }

    #[must_use]
    pub fn is_answered(&self, position: usize) -> bool {
        self.get(position).is_some_and(AnswerSlot::is_answered)
    }

    /// Overwrites the slot at `position`. Returns `false` if `position` is out of range.
    pub fn record(&mut self, position: usize, choice: usize) -> bool {
        match self.slots.get_mut(position) {
            Some(slot) => {
                *slot = AnswerSlot::Chosen(choice);
                true
            }
            None => false,
        }
    }

    pub fn answered_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_answered())
            .map(|(position, _)| position)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_answered()).count()
    }

    #[must_use]
    pub fn slots(&self) -> &[AnswerSlot] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_is_all_unanswered() {
        let ledger = AnswerLedger::new(3);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.answered_count(), 0);
        assert!(ledger.slots().iter().all(|slot| *slot == AnswerSlot::Unanswered));
    }

    #[test]
    fn record_overwrites_previous_choice() {
        let mut ledger = AnswerLedger::new(2);
        assert!(ledger.record(1, 0));
        assert!(ledger.record(1, 3));
        assert_eq!(ledger.choice(1), Some(3));
        assert_eq!(ledger.answered_positions().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn record_out_of_range_is_refused() {
        let mut ledger = AnswerLedger::new(1);
        assert!(!ledger.record(5, 0));
        assert_eq!(ledger.answered_count(), 0);
        assert!(!ledger.is_answered(5));
    }
}
