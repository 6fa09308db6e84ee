use alloc::vec::Vec;

use super::*;

/// Places triggers uniformly at random, sampling cells without replacement.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GridConfig) -> Result<Grid> {
        use rand::prelude::*;

        // re-check in case the config was built by hand
        let config = GridConfig::new(config.extent, config.triggers)?;
        let mut grid = Grid::empty(config.extent);
        let mut candidates: Vec<Coord3> = shells(config.extent).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        for _ in 0..config.triggers {
            let pick = rng.random_range(0..candidates.len());
            grid.place_trigger(candidates.swap_remove(pick));
        }

        log::debug!(
            "Generated grid with extent {}, {} triggers in {} cells",
            config.extent,
            grid.trigger_count(),
            grid.total_cells()
        );
        Ok(grid)
    }
}
