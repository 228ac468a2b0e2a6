//! Maze carving over the padded lattice
//!
//! Only odd coordinates are lattice nodes. A randomized Prim walk builds a
//! spanning tree over every node, carving the midpoint between each node and
//! the tree node it was attached to. Even-even cells are never carved.

use log::debug;
use strum::IntoEnumIterator;

use crate::rng::LayoutRng;

use super::cell::{Coord, Direction};

/// Square boolean grid of carved ("open") and wall cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarvedGrid {
    size: i32,
    carved: Vec<bool>,
}

impl CarvedGrid {
    /// An all-wall grid of `size × size` cells
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            size,
            carved: vec![false; (size * size) as usize],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.size && c.y < self.size
    }

    fn idx(&self, c: Coord) -> usize {
        (c.y * self.size + c.x) as usize
    }

    /// Out-of-bounds cells are walls
    pub fn is_carved(&self, c: Coord) -> bool {
        self.in_bounds(c) && self.carved[self.idx(c)]
    }

    pub fn carve(&mut self, c: Coord) {
        if self.in_bounds(c) {
            let i = self.idx(c);
            self.carved[i] = true;
        }
    }

    /// Is `c` a lattice node: odd on both axes and away from the outer edge
    pub fn is_node(&self, c: Coord) -> bool {
        c.x % 2 == 1 && c.y % 2 == 1 && c.x <= self.size - 2 && c.y <= self.size - 2
    }

    /// Number of lattice nodes along one axis
    pub fn nodes_per_axis(&self) -> i32 {
        ((self.size - 1) / 2).max(0)
    }

    /// Lattice nodes two steps away in each direction, with the midpoint between
    pub fn node_neighbors(&self, c: Coord) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        Direction::iter().filter_map(move |dir| {
            let mid = c.step(dir);
            let next = mid.step(dir);
            self.is_node(next).then_some((next, mid))
        })
    }

    /// Every carved cell in row-major order
    pub fn carved_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.size)
            .flat_map(move |y| (0..self.size).map(move |x| Coord::new(x, y)))
            .filter(move |&c| self.is_carved(c))
    }
}

/// Carve a spanning-tree maze over every lattice node of a `size × size` grid
pub fn carve_maze(size: i32, rng: &mut LayoutRng) -> CarvedGrid {
    let mut grid = CarvedGrid::new(size);
    let nodes = grid.nodes_per_axis();
    if nodes == 0 {
        return grid;
    }

    let start = Coord::new(
        1 + 2 * rng.below(nodes as u32) as i32,
        1 + 2 * rng.below(nodes as u32) as i32,
    );
    grid.carve(start);

    let mut pool: Vec<Coord> = Vec::new();
    push_unvisited(&grid, start, &mut pool);

    while let Some(cell) = rng.take(&mut pool) {
        if grid.is_carved(cell) {
            continue;
        }

        let attached: Vec<(Coord, Coord)> = grid
            .node_neighbors(cell)
            .filter(|&(n, _)| grid.is_carved(n))
            .collect();
        let Some(&(_, mid)) = rng.choose(&attached) else {
            continue;
        };

        grid.carve(cell);
        grid.carve(mid);
        push_unvisited(&grid, cell, &mut pool);
    }

    debug!(
        "carved {}x{} maze over {} lattice nodes",
        size,
        size,
        nodes * nodes
    );
    grid
}

fn push_unvisited(grid: &CarvedGrid, c: Coord, pool: &mut Vec<Coord>) {
    for (next, _) in grid.node_neighbors(c) {
        if !grid.is_carved(next) {
            pool.push(next);
        }
    }
}
