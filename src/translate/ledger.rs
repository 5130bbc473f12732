//! Bookkeeping of invocations seen so far, used to give demoted tool results
//! back their call ids.

#[derive(Debug)]
struct Entry {
    id: String,
    name: String,
    answered: bool,
}

/// Invocations grouped by native assistant turn.
#[derive(Debug, Default)]
pub(super) struct CallLedger {
    turns: Vec<Vec<Entry>>,
}

impl CallLedger {
    pub(super) fn open_turn(&mut self) {
        self.turns.push(Vec::new());
    }

    /// Record into the current turn (opening one if none exists yet).
    pub(super) fn record(&mut self, id: &str, name: &str) {
        if self.turns.is_empty() {
            self.open_turn();
        }
        if let Some(turn) = self.turns.last_mut() {
            turn.push(Entry {
                id: id.to_string(),
                name: name.to_string(),
                answered: false,
            });
        }
    }

    pub(super) fn mark_answered(&mut self, id: &str) {
        for entry in self.turns.iter_mut().flatten() {
            if entry.id == id {
                entry.answered = true;
            }
        }
    }

    /// Call id for a result of `name`: the earliest unanswered invocation in
    /// the latest turn that has one, else the nearest invocation overall.
    pub(super) fn resolve(&mut self, name: &str) -> Option<String> {
        for turn in self.turns.iter_mut().rev() {
            if let Some(entry) = turn.iter_mut().find(|e| !e.answered && e.name == name) {
                entry.answered = true;
                return Some(entry.id.clone());
            }
        }
        self.turns
            .iter()
            .rev()
            .flat_map(|turn| turn.iter().rev())
            .find(|e| e.name == name)
            .map(|e| e.id.clone())
    }
}
