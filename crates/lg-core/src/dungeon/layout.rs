//! Finished layouts
//!
//! A [`Layout`] is the read-only product of generation: rooms, hallways,
//! airlocks, and a merged cell index answering "what is at this cell".

use core::fmt;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::GenerationError;

use super::airlock::Airlock;
use super::cell::{CellRef, Coord};
use super::hallway::{Hallway, HallwayId};
use super::room::{Room, RoomId};

/// A generated level layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    config: LayoutConfig,
    extent: i32,
    rooms: Vec<Room>,
    hallways: Vec<Hallway>,
    airlocks: Vec<Airlock>,
    /// Keyed `(y, x)` so iteration is row-major
    #[serde(skip)]
    cells: BTreeMap<(i32, i32), CellRef>,
}

/// Summary counts for a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LayoutStats {
    pub rooms: usize,
    pub sections: usize,
    pub room_cells: usize,
    pub hallways: usize,
    pub hallway_cells: usize,
    pub airlocks: usize,
}

impl fmt::Display for LayoutStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rooms ({} sections, {} cells), {} hallways ({} cells), {} airlocks",
            self.rooms,
            self.sections,
            self.room_cells,
            self.hallways,
            self.hallway_cells,
            self.airlocks
        )
    }
}

impl Layout {
    /// Combine the stage outputs and build the cell index
    ///
    /// Room cells are inserted first, then hallway paths on top. Any cell
    /// claimed twice is an error. Rooms and hallways are sorted by id.
    pub fn assemble(
        config: LayoutConfig,
        mut rooms: Vec<Room>,
        mut hallways: Vec<Hallway>,
        airlocks: Vec<Airlock>,
    ) -> Result<Self, GenerationError> {
        rooms.sort_by_key(Room::id);
        hallways.sort_by_key(Hallway::id);

        let mut cells = BTreeMap::new();
        for room in &rooms {
            for &c in room.cells() {
                claim(&mut cells, c, CellRef::Room(room.id()))?;
            }
        }
        for hallway in &hallways {
            for &c in hallway.path() {
                claim(&mut cells, c, CellRef::Hallway(hallway.id()))?;
            }
        }

        Ok(Self {
            extent: config.extent(),
            config,
            rooms,
            hallways,
            airlocks,
            cells,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Side length of the square generator grid
    pub fn extent(&self) -> i32 {
        self.extent
    }

    /// Rooms in id order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Hallways in id order
    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    pub fn airlocks(&self) -> &[Airlock] {
        &self.airlocks
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms
            .binary_search_by_key(&id, Room::id)
            .ok()
            .map(|i| &self.rooms[i])
    }

    pub fn hallway(&self, id: HallwayId) -> Option<&Hallway> {
        self.hallways
            .binary_search_by_key(&id, Hallway::id)
            .ok()
            .map(|i| &self.hallways[i])
    }

    /// What occupies `c`, if anything
    pub fn cell(&self, c: Coord) -> Option<CellRef> {
        self.cells.get(&(c.y, c.x)).copied()
    }

    pub fn room_at(&self, c: Coord) -> Option<&Room> {
        self.cell(c)?.room().and_then(|id| self.room(id))
    }

    pub fn hallway_at(&self, c: Coord) -> Option<&Hallway> {
        self.cell(c)?.hallway().and_then(|id| self.hallway(id))
    }

    /// Every occupied cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, CellRef)> + '_ {
        self.cells
            .iter()
            .map(|(&(y, x), &owner)| (Coord::new(x, y), owner))
    }

    /// Room adjacency induced by the hallways
    ///
    /// Only rooms reached by at least one hallway appear as keys.
    pub fn room_links(&self) -> BTreeMap<RoomId, BTreeSet<RoomId>> {
        let mut links: BTreeMap<RoomId, BTreeSet<RoomId>> = BTreeMap::new();
        for hallway in &self.hallways {
            for a in hallway.rooms() {
                let entry = links.entry(a).or_default();
                entry.extend(hallway.rooms().filter(|&b| b != a));
            }
        }
        links
    }

    /// Whether every room touched by a hallway can reach every other one
    pub fn is_connected(&self) -> bool {
        let links = self.room_links();
        let Some(&start) = links.keys().next() else {
            return true;
        };

        let mut seen = BTreeSet::from([start]);
        let mut frontier = VecDeque::from([start]);
        while let Some(room) = frontier.pop_front() {
            for &next in links.get(&room).into_iter().flatten() {
                if seen.insert(next) {
                    frontier.push_back(next);
                }
            }
        }
        seen.len() == links.len()
    }

    pub fn stats(&self) -> LayoutStats {
        LayoutStats {
            rooms: self.rooms.len(),
            sections: self.rooms.iter().map(Room::section_count).sum(),
            room_cells: self.rooms.iter().map(Room::cell_count).sum(),
            hallways: self.hallways.len(),
            hallway_cells: self.hallways.iter().map(|h| h.path().len()).sum(),
            airlocks: self.airlocks.len(),
        }
    }
}

fn claim(
    cells: &mut BTreeMap<(i32, i32), CellRef>,
    c: Coord,
    owner: CellRef,
) -> Result<(), GenerationError> {
    if cells.insert((c.y, c.x), owner).is_some() {
        return Err(GenerationError::CellConflict { cell: c });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::cell::Direction;
    use crate::dungeon::rect::Rect;

    fn hallway(id: u32, cells: &[(i32, i32)], doors: &[(u32, (i32, i32))]) -> Hallway {
        Hallway::new(
            HallwayId(id),
            cells.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            doors
                .iter()
                .map(|&(r, (x, y))| (RoomId(r), Coord::new(x, y)))
                .collect(),
        )
    }

    fn sample() -> Layout {
        let rooms = vec![
            Room::new(RoomId(4), vec![Rect::new(9, 1, 3, 3)]),
            Room::new(RoomId(1), vec![Rect::new(1, 1, 3, 3)]),
            Room::new(RoomId(2), vec![Rect::new(17, 1, 3, 3)]),
        ];
        let hallways = vec![
            hallway(
                3,
                &[(12, 2), (13, 2), (14, 2), (15, 2), (16, 2)],
                &[(4, (12, 2)), (2, (16, 2))],
            ),
            hallway(
                0,
                &[(4, 2), (5, 2), (6, 2), (7, 2), (8, 2)],
                &[(1, (4, 2)), (4, (8, 2))],
            ),
        ];
        let airlocks = vec![Airlock {
            room: RoomId(1),
            cell: Coord::new(2, 0),
            direction: Direction::South,
        }];
        Layout::assemble(LayoutConfig::default(), rooms, hallways, airlocks).unwrap()
    }

    #[test]
    fn test_cell_queries() {
        let layout = sample();
        assert_eq!(layout.cell(Coord::new(2, 2)), Some(CellRef::Room(RoomId(1))));
        assert_eq!(
            layout.cell(Coord::new(6, 2)),
            Some(CellRef::Hallway(HallwayId(0)))
        );
        assert_eq!(layout.cell(Coord::new(6, 6)), None);

        assert_eq!(layout.room_at(Coord::new(10, 2)).map(Room::id), Some(RoomId(4)));
        assert!(layout.room_at(Coord::new(13, 2)).is_none());
        assert_eq!(
            layout.hallway_at(Coord::new(13, 2)).map(Hallway::id),
            Some(HallwayId(3))
        );
        assert!(layout.hallway(HallwayId(1)).is_none());
    }

    #[test]
    fn test_rooms_and_hallways_sorted_by_id() {
        let layout = sample();
        let ids: Vec<RoomId> = layout.rooms().iter().map(Room::id).collect();
        assert_eq!(ids, vec![RoomId(1), RoomId(2), RoomId(4)]);
        assert!(layout.room(RoomId(2)).is_some());
        assert!(layout.room(RoomId(3)).is_none());

        // Handed over as [3, 0]
        let ids: Vec<HallwayId> = layout.hallways().iter().map(Hallway::id).collect();
        assert_eq!(ids, vec![HallwayId(0), HallwayId(3)]);
        assert_eq!(layout.hallway(HallwayId(3)).map(Hallway::id), Some(HallwayId(3)));
        assert_eq!(layout.hallway(HallwayId(0)).map(Hallway::id), Some(HallwayId(0)));
    }

    #[test]
    fn test_cells_row_major() {
        let layout = sample();
        let cells: Vec<Coord> = layout.cells().map(|(c, _)| c).collect();
        assert_eq!(cells.len(), 27 + 10);
        assert_eq!(cells[0], Coord::new(1, 1));
        assert!(cells.windows(2).all(|w| (w[0].y, w[0].x) < (w[1].y, w[1].x)));
    }

    #[test]
    fn test_room_links_and_connectivity() {
        let layout = sample();
        let links = layout.room_links();
        assert_eq!(links[&RoomId(4)], BTreeSet::from([RoomId(1), RoomId(2)]));
        assert_eq!(links[&RoomId(1)], BTreeSet::from([RoomId(4)]));
        assert!(layout.is_connected());

        let split = Layout::assemble(
            LayoutConfig::default(),
            vec![],
            vec![
                hallway(0, &[(0, 0)], &[(0, (0, 0)), (1, (0, 0))]),
                hallway(1, &[(5, 5)], &[(2, (5, 5)), (3, (5, 5))]),
            ],
            vec![],
        )
        .unwrap();
        assert!(!split.is_connected());
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            LayoutStats {
                rooms: 3,
                sections: 3,
                room_cells: 27,
                hallways: 2,
                hallway_cells: 10,
                airlocks: 1,
            }
        );
        assert_eq!(
            stats.to_string(),
            "3 rooms (3 sections, 27 cells), 2 hallways (10 cells), 1 airlocks"
        );
    }

    #[test]
    fn test_conflicting_cell_rejected() {
        let rooms = vec![Room::new(RoomId(0), vec![Rect::new(1, 1, 3, 3)])];
        let hallways = vec![hallway(0, &[(3, 3), (4, 3)], &[])];
        assert_eq!(
            Layout::assemble(LayoutConfig::default(), rooms, hallways, vec![]),
            Err(GenerationError::CellConflict {
                cell: Coord::new(3, 3)
            })
        );
    }
}
