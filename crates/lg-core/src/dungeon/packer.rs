//! Room packing by rejection sampling
//!
//! Random odd-sized sectors are thrown at the grid. A sector landing on empty
//! space becomes a new room; a sector landing on existing rooms is merged with
//! them if the result stays within the section, size and overlap limits.
//! Packing stops after a configurable number of consecutive rejections, and
//! sector sizes shrink along the decay curve as rejections accumulate.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::config::LayoutConfig;
use crate::rng::LayoutRng;

use super::cell::Coord;
use super::rect::Rect;
use super::room::{Room, RoomArena, RoomId};

/// Rooms are kept this far inside the cellular bounds so the maze always
/// has a ring of lattice cells around them
const BORDER: i32 = 2;

/// Why a sector was not inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The merged room would have more than `max_sections_per_room` sections
    TooManySections,
    /// The merged room would reach `max_room_cells`
    TooLarge,
    /// The sector overlaps some room by less than `min_sector_overlap_width`
    NarrowOverlap,
}

/// Result of packing: live rooms in id order and the cell index
#[derive(Debug, Clone, Default)]
pub struct PackedRooms {
    pub rooms: Vec<Room>,
    pub index: BTreeMap<Coord, RoomId>,
}

/// Incremental room packer
#[derive(Debug)]
pub struct RoomPacker<'a> {
    config: &'a LayoutConfig,
    arena: RoomArena,
    index: BTreeMap<Coord, RoomId>,
}

impl<'a> RoomPacker<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            arena: RoomArena::new(),
            index: BTreeMap::new(),
        }
    }

    /// Throw sectors until the consecutive-failure limit is reached
    pub fn pack(mut self, rng: &mut LayoutRng) -> PackedRooms {
        let max_failures = self.config.max_consecutive_failures();
        let mut failures = 0;
        let mut attempts = 0u32;

        while failures < max_failures {
            attempts += 1;
            let t = self
                .config
                .sector_size_decay
                .sample(failures as f32 / max_failures as f32);
            let sector = self.random_sector(t, rng);

            match self.insert(sector) {
                Ok(id) => {
                    trace!("placed {:?} into {}", sector, id);
                    failures = 0;
                }
                Err(reason) => {
                    trace!("rejected {:?}: {:?}", sector, reason);
                    failures += 1;
                }
            }
        }

        let packed = self.finish();
        debug!(
            "packed {} rooms over {} cells in {} attempts",
            packed.rooms.len(),
            packed.index.len(),
            attempts
        );
        packed
    }

    /// Pick an odd-sized sector at an odd position
    ///
    /// `t` runs from 0 (sizes up to `max_sector_size`) to 1 (sizes pinned to
    /// `min_sector_size`).
    pub fn random_sector(&self, t: f32, rng: &mut LayoutRng) -> Rect {
        let dimension = self.config.cellular_dimension();
        let min = self.config.min_sector_size as f32;
        let max = self.config.max_sector_size as f32;
        let upper = (max + (min - max) * t).round() as i32;
        let upper = upper.min(dimension - 1);
        let lower = (self.config.min_sector_size as i32).min(upper);

        let width = rng.odd_between(lower, upper);
        let height = rng.odd_between(lower, upper);
        let x = BORDER + rng.odd_between(1, dimension - width);
        let y = BORDER + rng.odd_between(1, dimension - height);
        Rect::new(x, y, width, height)
    }

    /// Try to add a sector, creating or merging a room
    pub fn insert(&mut self, sector: Rect) -> Result<RoomId, Rejection> {
        let overlapping: BTreeSet<RoomId> = sector
            .cells()
            .filter_map(|c| self.index.get(&c).copied())
            .collect();

        if overlapping.is_empty() {
            let id = self.arena.alloc(vec![sector]);
            for c in sector.cells() {
                self.index.insert(c, id);
            }
            return Ok(id);
        }

        self.check_merge(&overlapping, &sector)?;

        let merged = self.arena.merge(&overlapping, sector);
        if let Some(room) = self.arena.get(merged) {
            for &c in room.cells() {
                self.index.insert(c, merged);
            }
        }
        Ok(merged)
    }

    fn check_merge(&self, overlapping: &BTreeSet<RoomId>, sector: &Rect) -> Result<(), Rejection> {
        let rooms: Vec<&Room> = overlapping
            .iter()
            .filter_map(|&id| self.arena.get(id))
            .collect();

        let sections = 1 + rooms.iter().map(|r| r.section_count()).sum::<usize>();
        if sections > self.config.max_sections_per_room as usize {
            return Err(Rejection::TooManySections);
        }

        let mut cells: BTreeSet<Coord> = sector.cells().collect();
        for room in &rooms {
            cells.extend(room.cells().iter().copied());
        }
        if cells.len() >= self.config.max_room_cells() {
            return Err(Rejection::TooLarge);
        }

        let narrowest = rooms
            .iter()
            .map(|r| r.overlap_width(sector))
            .min()
            .unwrap_or(0);
        if narrowest < self.config.min_sector_overlap_width as i32 {
            return Err(Rejection::NarrowOverlap);
        }

        Ok(())
    }

    pub fn index(&self) -> &BTreeMap<Coord, RoomId> {
        &self.index
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.arena.get(id)
    }

    pub fn finish(self) -> PackedRooms {
        PackedRooms {
            rooms: self.arena.into_live(),
            index: self.index,
        }
    }
}

/// Pack rooms for the given configuration
pub fn pack_rooms(config: &LayoutConfig, rng: &mut LayoutRng) -> PackedRooms {
    RoomPacker::new(config).pack(rng)
}
