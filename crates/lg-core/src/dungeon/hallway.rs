//! Hallways and path trimming
//!
//! A hallway is a connected set of non-room cells plus one entrance (door)
//! cell per room it touches. Simplification keeps only the cells lying on the
//! routes between its doors, dropping dead-end branches.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

use super::cell::Coord;
use super::room::RoomId;

/// Stable hallway handle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HallwayId(pub u32);

impl fmt::Display for HallwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hallway#{}", self.0)
    }
}

/// A corridor component connecting two or more rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hallway {
    id: HallwayId,
    path: BTreeSet<Coord>,
    doors: BTreeMap<RoomId, Coord>,
}

impl Hallway {
    pub fn new(id: HallwayId, path: BTreeSet<Coord>, doors: BTreeMap<RoomId, Coord>) -> Self {
        Self { id, path, doors }
    }

    pub fn id(&self) -> HallwayId {
        self.id
    }

    pub fn path(&self) -> &BTreeSet<Coord> {
        &self.path
    }

    /// Entrance cell for each connected room
    pub fn doors(&self) -> &BTreeMap<RoomId, Coord> {
        &self.doors
    }

    pub fn door(&self, room: RoomId) -> Option<Coord> {
        self.doors.get(&room).copied()
    }

    /// Rooms this hallway connects, in id order
    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.doors.keys().copied()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.path.contains(&c)
    }

    /// Trim the path down to the routes between doors
    ///
    /// The first door (by room id) is the reference; the route to every other
    /// door is searched within the path and the union of routes becomes the
    /// new path. Single-cell hallways are returned unchanged. The door mapping
    /// is never altered.
    pub fn simplify(&self) -> Result<Hallway, GenerationError> {
        if self.path.len() == 1 {
            return Ok(self.clone());
        }

        let mut doors = self.doors.values().copied();
        let Some(reference) = doors.next() else {
            return Ok(self.clone());
        };

        let mut kept = BTreeSet::new();
        kept.insert(reference);
        for door in doors {
            let route = find_route(&self.path, reference, door).ok_or(
                GenerationError::UnreachableDoor {
                    hallway: self.id,
                    door,
                },
            )?;
            kept.extend(route);
        }

        Ok(Hallway {
            id: self.id,
            path: kept,
            doors: self.doors.clone(),
        })
    }
}

/// Breadth-first search from `from` to `to` that only steps on `cells`
///
/// Returns the cells of the route, both ends included, or `None` if either
/// end lies outside `cells` or no route exists.
pub fn find_route(cells: &BTreeSet<Coord>, from: Coord, to: Coord) -> Option<Vec<Coord>> {
    if !cells.contains(&from) || !cells.contains(&to) {
        return None;
    }

    let mut came_from: BTreeMap<Coord, Coord> = BTreeMap::new();
    let mut frontier = VecDeque::new();
    came_from.insert(from, from);
    frontier.push_back(from);

    while let Some(current) = frontier.pop_front() {
        if current == to {
            return Some(trace_back(&came_from, from, to));
        }
        for next in current.orthogonal() {
            if cells.contains(&next) && !came_from.contains_key(&next) {
                came_from.insert(next, current);
                frontier.push_back(next);
            }
        }
    }

    None
}

fn trace_back(came_from: &BTreeMap<Coord, Coord>, from: Coord, to: Coord) -> Vec<Coord> {
    let mut route = vec![to];
    let mut current = to;
    while current != from {
        match came_from.get(&current) {
            Some(&prev) => {
                route.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    route.reverse();
    route
}
