use core::fmt;
use serde::{Deserialize, Serialize};

/// Single lattice axis, signed because the grid is centered on the origin.
pub type Axis = i8;

/// Count type used for trigger counts and total-cell counts.
pub type CellCount = u16;

/// A point of the cubic lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord3 {
    pub x: Axis,
    pub y: Axis,
    pub z: Axis,
}

impl Coord3 {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: Axis, y: Axis, z: Axis) -> Self {
        Self { x, y, z }
    }

    /// Largest absolute component, the shell this point belongs to.
    pub const fn chebyshev_norm(self) -> u8 {
        let x = self.x.unsigned_abs();
        let y = self.y.unsigned_abs();
        let z = self.z.unsigned_abs();
        let xy = if x > y { x } else { y };
        if xy > z { xy } else { z }
    }

    pub const fn is_origin(self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    fn offset(self, (dx, dy, dz): (Axis, Axis, Axis)) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }
}

impl From<(Axis, Axis, Axis)> for Coord3 {
    fn from((x, y, z): (Axis, Axis, Axis)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coord3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Largest half-extent whose cube still fits `CellCount`.
pub const MAX_EXTENT: u8 = 19;

/// Edge length of a cube with the given half-extent.
pub const fn side_len(extent: u8) -> usize {
    2 * extent as usize + 1
}

/// Lattice points in a cube of the given half-extent, origin excluded.
pub const fn cell_count(extent: u8) -> CellCount {
    let side = side_len(extent) as CellCount;
    side.saturating_mul(side).saturating_mul(side) - 1
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self, extent: u8) -> Self::Output;
}

impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    fn to_nd_index(self, extent: u8) -> Self::Output {
        let shift = |v: Axis| (i16::from(v) + i16::from(extent)) as usize;
        [shift(self.x), shift(self.y), shift(self.z)]
    }
}

const fn build_displacements() -> [(Axis, Axis, Axis); 26] {
    let mut out = [(0, 0, 0); 26];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    out
}

/// The 3x3x3 neighborhood minus the center.
pub const DISPLACEMENTS: [(Axis, Axis, Axis); 26] = build_displacements();

/// Iterates the neighbors of a coordinate that lie inside a grid of the given extent.
///
/// The origin is never part of a grid, so it is skipped like any out of bounds point.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord3,
    extent: u8,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord3, extent: u8) -> Self {
        Self {
            center,
            extent,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = self.center.offset(delta) {
                if is_in_grid(next_item, self.extent) {
                    return Some(next_item);
                }
            }
        }
    }
}

pub(crate) fn is_in_grid(coords: Coord3, extent: u8) -> bool {
    !coords.is_origin() && coords.chebyshev_norm() <= extent
}

/// Points whose Chebyshev norm is exactly `radius`.
pub fn shell(radius: u8) -> impl Iterator<Item = Coord3> {
    let r = radius as Axis;
    (-r..=r).flat_map(move |x| {
        (-r..=r).flat_map(move |y| {
            (-r..=r)
                .map(move |z| Coord3::new(x, y, z))
                .filter(move |coords| coords.chebyshev_norm() == radius)
        })
    })
}

/// Every grid point, emitted once, by expanding concentric shells from the origin.
pub fn shells(extent: u8) -> impl Iterator<Item = Coord3> {
    (1..=extent).flat_map(shell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    #[test]
    fn displacements_cover_the_neighborhood_once() {
        let unique: BTreeSet<_> = DISPLACEMENTS.iter().copied().collect();
        assert_eq!(unique.len(), 26);
        assert!(!unique.contains(&(0, 0, 0)));
    }

    #[test]
    fn shells_emit_every_point_exactly_once() {
        for extent in 1..=3 {
            let points: Vec<_> = shells(extent).collect();
            let unique: BTreeSet<_> = points.iter().copied().collect();
            assert_eq!(points.len(), usize::from(cell_count(extent)));
            assert_eq!(unique.len(), points.len());
            assert!(!unique.contains(&Coord3::ORIGIN));
        }
    }

    #[test]
    fn neighbors_of_corner_stay_inside_grid() {
        let corner = Coord3::new(1, 1, 1);
        let neighbors: Vec<_> = NeighborIter::new(corner, 1).collect();
        // 2x2x2 block minus the corner itself minus the origin
        assert_eq!(neighbors.len(), 6);
        assert!(neighbors.iter().all(|&n| is_in_grid(n, 1)));
    }

    #[test]
    fn neighbors_skip_origin() {
        let neighbors: Vec<_> = NeighborIter::new(Coord3::new(1, 0, 0), 2).collect();
        assert_eq!(neighbors.len(), 25);
        assert!(!neighbors.contains(&Coord3::ORIGIN));
    }

    #[test]
    fn nd_index_is_shifted_by_extent() {
        assert_eq!(Coord3::new(-2, 0, 2).to_nd_index(2), [0, 2, 4]);
    }
}
