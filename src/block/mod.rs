//! Block-based search space.
//!
//! Walkable positions on an integer grid, each with a terrain cost multiplier.
//! Nodes are identified purely by position: two `BlockPos` are the same node
//! iff their coordinates match.

use crate::float_types::{Real, SQRT_2};
use crate::search::{SearchSpace, Successor};
use hashbrown::HashMap;
use nalgebra::Point3;
use std::fmt::Display;
use std::ops::Add;

/// Extra cost for stepping one block up
pub const CLIMB_PENALTY: Real = 0.5;

/// Integer position of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPos { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// [`offset`](Self::offset), or `None` if a coordinate leaves the `i32` range
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(BlockPos::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// The block containing a world position
    pub fn containing(position: &Point3<Real>) -> Self {
        BlockPos::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        )
    }

    /// Standing position: centered in X/Z, on the block's floor
    pub fn center(self) -> Point3<Real> {
        Point3::new(self.x as Real + 0.5, self.y as Real, self.z as Real + 0.5)
    }

    pub fn distance_to(self, other: BlockPos) -> Real {
        let dx = (i64::from(self.x) - i64::from(other.x)) as Real;
        let dy = (i64::from(self.y) - i64::from(other.y)) as Real;
        let dz = (i64::from(self.z) - i64::from(other.z)) as Real;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Add for BlockPos {
    type Output = BlockPos;

    fn add(self, rhs: BlockPos) -> BlockPos {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// How a block was entered from its parent
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Walk = 0,
    Diagonal = 1,
    Ascend = 2,
    Descend = 3,
}

const CARDINALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Sparse set of walkable blocks
#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    blocks: HashMap<BlockPos, Real>,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// A flat walkable rectangle at height `y`, inclusive on both corners
    pub fn floor(y: i32, min: (i32, i32), max: (i32, i32)) -> Self {
        let mut grid = BlockGrid::new();
        for x in min.0..=max.0 {
            for z in min.1..=max.1 {
                grid.set_walkable(BlockPos::new(x, y, z));
            }
        }
        grid
    }

    /// Mark a block walkable at normal cost
    pub fn set_walkable(&mut self, pos: BlockPos) {
        self.blocks.insert(pos, 1.0);
    }

    /// Mark a block walkable with a cost multiplier (clamped to at least 1,
    /// which keeps the straight-line heuristic admissible)
    pub fn set_cost(&mut self, pos: BlockPos, multiplier: Real) {
        let multiplier = if multiplier.is_finite() { multiplier.max(1.0) } else { 1.0 };
        self.blocks.insert(pos, multiplier);
    }

    pub fn remove(&mut self, pos: BlockPos) -> bool {
        self.blocks.remove(&pos).is_some()
    }

    pub fn is_walkable(&self, pos: BlockPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    pub fn cost_multiplier(&self, pos: BlockPos) -> Option<Real> {
        self.blocks.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Straight-line distance; never more than the cheapest route
    pub fn heuristic(a: BlockPos, b: BlockPos) -> Real {
        a.distance_to(b)
    }

    fn step(
        &self,
        to: Option<BlockPos>,
        transition: Transition,
        base: Real,
        out: &mut Vec<Successor<BlockPos, Transition>>,
    ) {
        let Some(to) = to else {
            return;
        };
        if let Some(multiplier) = self.cost_multiplier(to) {
            out.push(Successor {
                key: to,
                transition,
                cost: base * multiplier,
            });
        }
    }
}

impl SearchSpace for BlockGrid {
    type Key = BlockPos;
    type Transition = Transition;

    fn contains(&self, key: BlockPos) -> bool {
        self.is_walkable(key)
    }

    fn successors(&self, key: BlockPos, out: &mut Vec<Successor<BlockPos, Transition>>) {
        for (dx, dz) in CARDINALS {
            self.step(key.checked_offset(dx, 0, dz), Transition::Walk, 1.0, out);
            self.step(key.checked_offset(dx, 1, dz), Transition::Ascend, SQRT_2 + CLIMB_PENALTY, out);
            self.step(key.checked_offset(dx, -1, dz), Transition::Descend, SQRT_2, out);
        }
        for (dx, dz) in DIAGONALS {
            // no cutting corners: both orthogonal neighbours must be walkable
            let walkable = |pos: Option<BlockPos>| pos.is_some_and(|p| self.is_walkable(p));
            if walkable(key.checked_offset(dx, 0, 0)) && walkable(key.checked_offset(0, 0, dz)) {
                self.step(key.checked_offset(dx, 0, dz), Transition::Diagonal, SQRT_2, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_positional() {
        let a = BlockPos::new(3, 64, -7);
        let b = BlockPos::new(1, 60, -2) + BlockPos::new(2, 4, -5);
        assert_eq!(a, b);

        let set: HashSet<BlockPos> = [a, b, BlockPos::new(-7, 64, 3)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn containing_floors_negative_coordinates() {
        let p = BlockPos::containing(&Point3::new(-0.5, 2.9, 3.2));
        assert_eq!(p, BlockPos::new(-1, 2, 3));
        let c = p.center();
        assert_eq!((c.x, c.y, c.z), (-0.5, 2.0, 3.5));
    }

    #[test]
    fn checked_offset_stops_at_the_coordinate_limit() {
        let edge = BlockPos::new(i32::MAX, 0, i32::MIN);
        assert_eq!(edge.checked_offset(1, 0, 0), None);
        assert_eq!(edge.checked_offset(0, 0, -1), None);
        assert_eq!(edge.checked_offset(-1, 1, 1), Some(BlockPos::new(i32::MAX - 1, 1, i32::MIN + 1)));
        assert!(edge.distance_to(BlockPos::new(i32::MIN, 0, i32::MIN)) > 4.0e9);
    }
}
