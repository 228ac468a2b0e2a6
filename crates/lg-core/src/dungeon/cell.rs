//! Grid coordinates and cell ownership

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::hallway::HallwayId;
use super::room::RoomId;

/// Integer cell position in generator space
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell in the given direction
    pub fn step(self, dir: Direction) -> Coord {
        self.offset(dir.delta())
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }

    /// The 4 orthogonal neighbours, in [`Direction`] order
    pub fn orthogonal(self) -> impl Iterator<Item = Coord> {
        Direction::iter().map(move |dir| self.step(dir))
    }

    /// All 8 neighbours, orthogonal and diagonal
    pub fn surrounding(self) -> impl Iterator<Item = Coord> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&d| d != (0, 0))
            .map(move |d| self.offset(d))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal direction. y grows southwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// What occupies a cell in a finished layout
///
/// A cell belongs to at most one room or one hallway, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRef {
    Room(RoomId),
    Hallway(HallwayId),
}

impl CellRef {
    pub fn room(self) -> Option<RoomId> {
        match self {
            CellRef::Room(id) => Some(id),
            CellRef::Hallway(_) => None,
        }
    }

    pub fn hallway(self) -> Option<HallwayId> {
        match self {
            CellRef::Hallway(id) => Some(id),
            CellRef::Room(_) => None,
        }
    }

    pub fn is_room(self) -> bool {
        matches!(self, CellRef::Room(_))
    }

    pub fn is_hallway(self) -> bool {
        matches!(self, CellRef::Hallway(_))
    }
}
