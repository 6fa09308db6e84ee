use serde::{Deserialize, Serialize};

/// Player annotation on a hidden cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Normal,
    Flagged,
    Questioned,
}

impl Mark {
    /// Next mark in the `Normal -> Flagged -> Questioned -> Normal` cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Normal => Self::Flagged,
            Self::Flagged => Self::Questioned,
            Self::Questioned => Self::Normal,
        }
    }
}

impl Default for Mark {
    fn default() -> Self {
        Self::Normal
    }
}

/// State of one lattice position for the current round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) trigger: bool,
    pub(crate) revealed: bool,
    pub(crate) mark: Mark,
    /// Filled in when the cell is first revealed.
    pub(crate) adjacent_triggers: Option<u8>,
}

impl Cell {
    pub const fn is_trigger(&self) -> bool {
        self.trigger
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn mark(&self) -> Mark {
        self.mark
    }

    pub const fn adjacent_triggers(&self) -> Option<u8> {
        self.adjacent_triggers
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.mark, Mark::Flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_cycles_through_three_states() {
        let mark = Mark::default();
        assert_eq!(mark.next(), Mark::Flagged);
        assert_eq!(mark.next().next(), Mark::Questioned);
        assert_eq!(mark.next().next().next(), Mark::Normal);
    }
}
