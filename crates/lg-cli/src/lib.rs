//! Text rendering for the layout preview tool

use std::collections::BTreeSet;

use lg_core::{CellRef, Coord, Layout};

pub const WALL: char = '#';
pub const ROOM: char = '.';
pub const DOOR: char = '+';
pub const HALLWAY: char = ',';
pub const AIRLOCK: char = 'A';

/// Render a layout as one character per generator cell, one line per row
pub fn preview(layout: &Layout) -> String {
    let extent = layout.extent().max(0);
    let doors: BTreeSet<Coord> = layout
        .hallways()
        .iter()
        .flat_map(|h| h.doors().values().copied())
        .collect();
    let airlocks: BTreeSet<Coord> = layout.airlocks().iter().map(|a| a.cell).collect();

    let mut out = String::with_capacity(((extent + 1) * extent) as usize);
    for y in 0..extent {
        for x in 0..extent {
            let c = Coord::new(x, y);
            let glyph = if airlocks.contains(&c) {
                AIRLOCK
            } else if doors.contains(&c) {
                DOOR
            } else {
                match layout.cell(c) {
                    Some(CellRef::Room(_)) => ROOM,
                    Some(CellRef::Hallway(_)) => HALLWAY,
                    None => WALL,
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
