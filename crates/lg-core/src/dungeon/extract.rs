//! Hallway candidate extraction
//!
//! Flood-fills the carved grid outside of rooms. Each connected component
//! becomes a candidate hallway if it touches at least two distinct rooms.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::debug;

use super::cell::Coord;
use super::hallway::{Hallway, HallwayId};
use super::maze::CarvedGrid;
use super::room::RoomId;

/// Find every carved non-room component touching two or more rooms
///
/// Candidates are numbered in discovery order (row-major scan).
pub fn extract_hallways(grid: &CarvedGrid, rooms: &BTreeMap<Coord, RoomId>) -> Vec<Hallway> {
    let size = grid.size();
    let mut visited = vec![false; (size * size).max(0) as usize];
    let mut candidates = Vec::new();
    let mut components = 0;

    for start in grid.carved_cells() {
        if rooms.contains_key(&start) || visited[cell_index(size, start)] {
            continue;
        }
        components += 1;

        let component = flood_fill(grid, rooms, start, &mut visited);
        let doors = find_doors(grid, rooms, &component);
        if doors.len() >= 2 {
            let id = HallwayId(candidates.len() as u32);
            candidates.push(Hallway::new(id, component.into_iter().collect(), doors));
        }
    }

    debug!(
        "extracted {} hallway candidates from {} corridor components",
        candidates.len(),
        components
    );
    candidates
}

fn cell_index(size: i32, c: Coord) -> usize {
    (c.y * size + c.x) as usize
}

/// Collect the carved non-room component containing `start`, in BFS order
pub fn flood_fill(
    grid: &CarvedGrid,
    rooms: &BTreeMap<Coord, RoomId>,
    start: Coord,
    visited: &mut [bool],
) -> Vec<Coord> {
    let size = grid.size();
    let mut component = Vec::new();
    let mut frontier = VecDeque::new();
    visited[cell_index(size, start)] = true;
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        component.push(current);
        for next in current.orthogonal() {
            if grid.is_carved(next)
                && !rooms.contains_key(&next)
                && !visited[cell_index(size, next)]
            {
                visited[cell_index(size, next)] = true;
                frontier.push_back(next);
            }
        }
    }

    component
}

/// Map each adjacent room to the component cell touching it
///
/// When a room is touched from several cells, the last one in component
/// order wins.
pub fn find_doors(
    grid: &CarvedGrid,
    rooms: &BTreeMap<Coord, RoomId>,
    component: &[Coord],
) -> BTreeMap<RoomId, Coord> {
    let mut doors = BTreeMap::new();
    for &cell in component {
        for next in cell.orthogonal() {
            if !grid.is_carved(next) {
                continue;
            }
            if let Some(&room) = rooms.get(&next) {
                doors.insert(room, cell);
            }
        }
    }
    doors
}

/// Rooms referenced by any candidate
pub fn linked_rooms(candidates: &[Hallway]) -> BTreeSet<RoomId> {
    candidates.iter().flat_map(Hallway::rooms).collect()
}
