use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeOutcome {
    Continue,
    Loss,
}

/// Cells newly revealed by one reveal request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cascade {
    pub revealed: Vec<Coord3>,
    pub outcome: CascadeOutcome,
}

impl Cascade {
    fn unchanged() -> Self {
        Self {
            revealed: Vec::new(),
            outcome: CascadeOutcome::Continue,
        }
    }

    pub fn is_loss(&self) -> bool {
        matches!(self.outcome, CascadeOutcome::Loss)
    }
}

/// Reveals a cell and, at random, some of its hidden safe neighbors, repeating from each
/// of those.
///
/// Unlike the classic flood fill, spreading does not depend on the adjacency count:
/// every hidden safe neighbor is rolled independently with `cascade_chance`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealEngine {
    cascade_chance: f64,
}

impl RevealEngine {
    pub fn new(cascade_chance: f64) -> Result<Self> {
        if !is_probability(cascade_chance) {
            return Err(GameError::InvalidCascadeChance);
        }
        Ok(Self { cascade_chance })
    }

    pub fn from_rules(rules: &RulesConfig) -> Result<Self> {
        Self::new(rules.cascade_chance)
    }

    pub fn cascade_chance(&self) -> f64 {
        self.cascade_chance
    }

    pub fn reveal<R: Rng + ?Sized>(&self, grid: &mut Grid, origin: Coord3, rng: &mut R) -> Cascade {
        let Some(cell) = grid.cell(origin) else {
            return Cascade::unchanged();
        };

        if cell.is_trigger() {
            log::debug!("Revealed trigger at {}", origin);
            return Cascade {
                revealed: Vec::new(),
                outcome: CascadeOutcome::Loss,
            };
        }

        if cell.is_revealed() {
            return Cascade::unchanged();
        }

        let mut revealed = Vec::new();
        let mut to_visit = Vec::from([origin]);

        while let Some(visit_coords) = to_visit.pop() {
            // the same cell can be queued by several neighbors
            if grid[visit_coords].revealed {
                continue;
            }

            let count = grid.adjacent_trigger_count(visit_coords);
            let cell = &mut grid[visit_coords];
            cell.revealed = true;
            cell.adjacent_triggers.get_or_insert(count);
            revealed.push(visit_coords);
            log::trace!("Revealed {}, adjacent triggers: {}", visit_coords, count);

            for neighbor in grid.iter_neighbors(visit_coords) {
                let neighbor_cell = &grid[neighbor];
                if neighbor_cell.trigger || neighbor_cell.revealed {
                    continue;
                }
                if rng.random_bool(self.cascade_chance) {
                    to_visit.push(neighbor);
                }
            }
        }

        Cascade {
            revealed,
            outcome: CascadeOutcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use rand::{SeedableRng, rngs::SmallRng};

    fn grid(extent: u8, triggers: &[Coord3]) -> Grid {
        Grid::from_trigger_coords(extent, triggers).unwrap()
    }

    #[test]
    fn chance_must_be_a_probability() {
        assert_eq!(RevealEngine::new(0.25).unwrap().cascade_chance(), 0.25);
        for chance in [f64::NAN, f64::INFINITY, -0.1, 1.01] {
            assert_eq!(RevealEngine::new(chance), Err(GameError::InvalidCascadeChance));
        }
    }

    #[test]
    fn trigger_is_loss_without_reveal() {
        let mut grid = grid(1, &[Coord3::new(1, 0, 0)]);
        let mut rng = SmallRng::seed_from_u64(0);

        let engine = RevealEngine::new(1.0).unwrap();
        let cascade = engine.reveal(&mut grid, Coord3::new(1, 0, 0), &mut rng);

        assert!(cascade.is_loss());
        assert!(cascade.revealed.is_empty());
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn no_cascade_reveals_only_origin() {
        let mut grid = grid(1, &[Coord3::new(1, 1, 1)]);
        let mut rng = SmallRng::seed_from_u64(0);
        let origin = Coord3::new(1, 1, 0);

        let engine = RevealEngine::new(0.0).unwrap();
        let cascade = engine.reveal(&mut grid, origin, &mut rng);

        assert_eq!(cascade.revealed, [origin]);
        assert_eq!(grid[origin].adjacent_triggers(), Some(1));
        assert_eq!(grid.revealed_count(), 1);
    }

    #[test]
    fn certain_cascade_reveals_every_safe_cell_reachable() {
        // triggers cut off nothing in a 3x3x3 cube, so every safe cell is reachable
        let mut grid = grid(1, &[Coord3::new(1, 1, 1), Coord3::new(-1, -1, -1)]);
        let mut rng = SmallRng::seed_from_u64(3);

        let engine = RevealEngine::new(1.0).unwrap();
        let cascade = engine.reveal(&mut grid, Coord3::new(1, 0, 0), &mut rng);

        let unique: BTreeSet<_> = cascade.revealed.iter().copied().collect();
        assert_eq!(unique.len(), cascade.revealed.len());
        assert_eq!(cascade.revealed.len(), usize::from(grid.goal()));
        assert!(grid.trigger_coords().all(|coords| !grid[coords].is_revealed()));
    }

    #[test]
    fn revealing_twice_changes_nothing() {
        let mut grid = grid(1, &[Coord3::new(1, 1, 1)]);
        let mut rng = SmallRng::seed_from_u64(0);
        let engine = RevealEngine::new(0.5).unwrap();
        let origin = Coord3::new(-1, 0, 0);

        let first = engine.reveal(&mut grid, origin, &mut rng);
        let before = grid.clone();
        let second = engine.reveal(&mut grid, origin, &mut rng);

        assert!(!first.revealed.is_empty());
        assert!(second.revealed.is_empty());
        assert_eq!(second.outcome, CascadeOutcome::Continue);
        assert_eq!(grid, before);
    }

    #[test]
    fn unknown_coordinates_are_ignored() {
        let mut grid = grid(1, &[]);
        let mut rng = SmallRng::seed_from_u64(0);
        let engine = RevealEngine::new(1.0).unwrap();

        for coords in [Coord3::ORIGIN, Coord3::new(5, 0, 0)] {
            let cascade = engine.reveal(&mut grid, coords, &mut rng);
            assert!(cascade.revealed.is_empty());
            assert_eq!(cascade.outcome, CascadeOutcome::Continue);
        }
    }
}
