use alloc::vec::Vec;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a presentation layer may show of a round.
///
/// Trigger positions are only exposed once the round is over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub extent: u8,
    pub state: RoundState,
    pub cleared: CellCount,
    pub goal: CellCount,
    pub revealed: Array3<Option<u8>>,
    pub marks: Array3<Mark>,
    pub exposed_triggers: Vec<Coord3>,
}

impl Observation {
    pub fn from_round<S: KeyValueStore>(round: &Round<S>) -> Option<Self> {
        let grid = round.grid()?;
        let side = side_len(grid.extent());
        let mut revealed = Array3::from_elem((side, side, side), None);
        let mut marks = Array3::from_elem((side, side, side), Mark::Normal);

        for (coords, cell) in grid.iter_cells() {
            let index = coords.to_nd_index(grid.extent());
            if cell.is_revealed() {
                revealed[index] = cell.adjacent_triggers();
            } else {
                marks[index] = cell.mark();
            }
        }

        let exposed_triggers = if round.state().is_finished() {
            grid.trigger_coords().collect()
        } else {
            Vec::new()
        };

        Some(Self {
            extent: grid.extent(),
            state: round.state(),
            cleared: round.cleared_count(),
            goal: round.goal(),
            revealed,
            marks,
            exposed_triggers,
        })
    }

    pub fn contains(&self, coords: Coord3) -> bool {
        is_in_grid(coords, self.extent)
    }

    pub fn revealed_at(&self, coords: Coord3) -> Option<u8> {
        if !self.contains(coords) {
            return None;
        }
        self.revealed[coords.to_nd_index(self.extent)]
    }

    pub fn mark_at(&self, coords: Coord3) -> Mark {
        if !self.contains(coords) {
            return Mark::Normal;
        }
        self.marks[coords.to_nd_index(self.extent)]
    }

    pub fn is_exposed_trigger(&self, coords: Coord3) -> bool {
        self.exposed_triggers.contains(&coords)
    }
}
