//! Airlock placement
//!
//! Airlocks are anchor points for room-to-room transition fixtures. They sit
//! on even-even lattice cells (never carved by the maze) flat against exactly
//! one wall of exactly one room, away from any hallway.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::cell::{Coord, Direction};
use super::hallway::Hallway;
use super::room::{Room, RoomId};

/// A transition anchor next to a room wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airlock {
    pub room: RoomId,
    pub cell: Coord,
    /// Direction from the airlock cell towards the room
    pub direction: Direction,
}

/// Scan every even-even cell of a `extent × extent` grid for airlock spots
pub fn place_airlocks(rooms: &[Room], hallways: &[Hallway], extent: i32) -> Vec<Airlock> {
    let room_cells: BTreeMap<Coord, RoomId> = rooms
        .iter()
        .flat_map(|room| room.cells().iter().map(move |&c| (c, room.id())))
        .collect();
    let hallway_cells: BTreeSet<Coord> = hallways
        .iter()
        .flat_map(|h| h.path().iter().copied())
        .collect();

    let mut airlocks = Vec::new();
    for y in (0..extent).step_by(2) {
        for x in (0..extent).step_by(2) {
            if let Some(airlock) = check_cell(Coord::new(x, y), &room_cells, &hallway_cells) {
                airlocks.push(airlock);
            }
        }
    }

    debug!("placed {} airlocks", airlocks.len());
    airlocks
}

fn check_cell(
    cell: Coord,
    room_cells: &BTreeMap<Coord, RoomId>,
    hallway_cells: &BTreeSet<Coord>,
) -> Option<Airlock> {
    if room_cells.contains_key(&cell) || hallway_cells.contains(&cell) {
        return None;
    }
    if cell.surrounding().any(|c| hallway_cells.contains(&c)) {
        return None;
    }

    let mut facing = Direction::iter()
        .filter_map(|dir| room_cells.get(&cell.step(dir)).map(|&room| (room, dir)));
    let (room, direction) = facing.next()?;
    if facing.next().is_some() {
        return None;
    }

    let mut walls = Vec::new();
    for c in cell.surrounding() {
        match room_cells.get(&c) {
            Some(&other) if other != room => return None,
            Some(_) => walls.push(c),
            None => {}
        }
    }

    let colinear =
        walls.iter().all(|c| c.x == walls[0].x) || walls.iter().all(|c| c.y == walls[0].y);
    colinear.then_some(Airlock {
        room,
        cell,
        direction,
    })
}
