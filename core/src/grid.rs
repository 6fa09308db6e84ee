use core::ops::{Index, IndexMut};
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells of the current round, stored densely over the cube of half-extent `extent`.
///
/// The center slot of the backing array is never addressed, the origin is not part of
/// the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array3<Cell>,
    extent: u8,
    trigger_count: CellCount,
}

impl Grid {
    pub(crate) fn empty(extent: u8) -> Self {
        let side = side_len(extent);
        Self {
            cells: Array3::default((side, side, side)),
            extent,
            trigger_count: 0,
        }
    }

    /// Builds a grid with triggers at exactly the given coordinates.
    pub fn from_trigger_coords(extent: u8, trigger_coords: &[Coord3]) -> Result<Self> {
        let mut grid = Self::empty(GridConfig::validate_extent(extent)?);

        for &coords in trigger_coords {
            let coords = grid.validate_coords(coords)?;
            grid.place_trigger(coords);
        }

        GridConfig::new(grid.extent, grid.trigger_count)?;
        Ok(grid)
    }

    pub(crate) fn place_trigger(&mut self, coords: Coord3) {
        let cell = &mut self[coords];
        if !cell.trigger {
            cell.trigger = true;
            self.trigger_count += 1;
        }
    }

    pub fn config(&self) -> GridConfig {
        GridConfig::new_unchecked(self.extent, self.trigger_count)
    }

    pub fn extent(&self) -> u8 {
        self.extent
    }

    pub fn total_cells(&self) -> CellCount {
        cell_count(self.extent)
    }

    pub fn trigger_count(&self) -> CellCount {
        self.trigger_count
    }

    /// Number of safe cells, all of which must be revealed to win.
    pub fn goal(&self) -> CellCount {
        self.total_cells() - self.trigger_count
    }

    pub fn contains(&self, coords: Coord3) -> bool {
        is_in_grid(coords, self.extent)
    }

    pub fn validate_coords(&self, coords: Coord3) -> Result<Coord3> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord3) -> Option<&Cell> {
        self.contains(coords).then(|| &self[coords])
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord3) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self[coords])
        } else {
            None
        }
    }

    pub fn contains_trigger(&self, coords: Coord3) -> bool {
        self.cell(coords).is_some_and(Cell::is_trigger)
    }

    /// Counts triggers among the neighbors that exist in this grid.
    pub fn adjacent_trigger_count(&self, coords: Coord3) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].trigger)
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }

    pub fn iter_neighbors(&self, coords: Coord3) -> NeighborIter {
        NeighborIter::new(coords, self.extent)
    }

    /// All grid coordinates in shell order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord3> + use<> {
        shells(self.extent)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord3, &Cell)> {
        self.iter_coords().map(|coords| (coords, &self[coords]))
    }

    pub fn trigger_coords(&self) -> impl Iterator<Item = Coord3> {
        self.iter_cells()
            .filter(|(_, cell)| cell.trigger)
            .map(|(coords, _)| coords)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.iter_cells()
            .filter(|(_, cell)| cell.revealed)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord3> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord3) -> &Self::Output {
        &self.cells[coords.to_nd_index(self.extent)]
    }
}

impl IndexMut<Coord3> for Grid {
    fn index_mut(&mut self, coords: Coord3) -> &mut Self::Output {
        let index = coords.to_nd_index(self.extent);
        &mut self.cells[index]
    }
}
