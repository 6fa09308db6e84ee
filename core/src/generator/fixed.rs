use alloc::vec::Vec;

use super::*;

/// Uses a predetermined trigger layout, for replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGridGenerator {
    triggers: Vec<Coord3>,
}

impl FixedGridGenerator {
    pub fn new(triggers: impl IntoIterator<Item = Coord3>) -> Self {
        Self {
            triggers: triggers.into_iter().collect(),
        }
    }
}

impl GridGenerator for FixedGridGenerator {
    fn generate(self, config: GridConfig) -> Result<Grid> {
        let grid = Grid::from_trigger_coords(config.extent, &self.triggers)?;
        if grid.trigger_count() != config.triggers {
            log::debug!(
                "Fixed layout has {} triggers, rules asked for {}",
                grid.trigger_count(),
                config.triggers
            );
        }
        Ok(grid)
    }
}
