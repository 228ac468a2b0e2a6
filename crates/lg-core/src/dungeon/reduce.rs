//! Hallway reduction
//!
//! Treating rooms as nodes and candidate hallways as unweighted edges, this is
//! a randomized spanning-forest construction: starting from one connected
//! room, a random edge leaving the connected set is taken until every linked
//! room has been reached (randomized Kruskal without comparisons). An
//! independent coin flip per leftover candidate then adds a few bonus edges so
//! the result is not a pure tree.

use std::collections::BTreeSet;

use log::debug;

use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::rng::LayoutRng;

use super::extract::linked_rooms;
use super::hallway::Hallway;
use super::room::RoomId;

/// Select and simplify the hallways that join every linked room
pub fn reduce_hallways(
    candidates: &[Hallway],
    config: &LayoutConfig,
    rng: &mut LayoutRng,
) -> Result<Vec<Hallway>, GenerationError> {
    let mut consumed = vec![false; candidates.len()];
    let mut hallways = connect_rooms(candidates, &mut consumed, rng)?;
    let spanning = hallways.len();

    add_bonus_hallways(candidates, &consumed, config, rng, &mut hallways)?;

    debug!(
        "kept {} of {} hallway candidates ({} spanning, {} bonus)",
        hallways.len(),
        candidates.len(),
        spanning,
        hallways.len() - spanning
    );
    Ok(hallways)
}

/// Connectivity pass: consume fringe candidates until no room is left out
fn connect_rooms(
    candidates: &[Hallway],
    consumed: &mut [bool],
    rng: &mut LayoutRng,
) -> Result<Vec<Hallway>, GenerationError> {
    let mut disconnected = linked_rooms(candidates);
    let mut hallways = Vec::new();

    let seeds: Vec<RoomId> = disconnected.iter().copied().collect();
    let Some(&seed) = rng.choose(&seeds) else {
        return Ok(hallways);
    };
    disconnected.remove(&seed);

    while !disconnected.is_empty() {
        let fringe: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|&(i, hallway)| !consumed[i] && is_fringe(hallway, &disconnected))
            .map(|(i, _)| i)
            .collect();

        let Some(&pick) = rng.choose(&fringe) else {
            return Err(GenerationError::DisconnectedRooms {
                remaining: disconnected.len(),
            });
        };

        let hallway = &candidates[pick];
        for room in hallway.rooms() {
            disconnected.remove(&room);
        }
        hallways.push(hallway.simplify()?);
        consumed[pick] = true;
    }

    Ok(hallways)
}

/// Does the hallway join a disconnected room to a connected one
fn is_fringe(hallway: &Hallway, disconnected: &BTreeSet<RoomId>) -> bool {
    let mut inside = false;
    let mut outside = false;
    for room in hallway.rooms() {
        if disconnected.contains(&room) {
            inside = true;
        } else {
            outside = true;
        }
    }
    inside && outside
}

/// Bonus pass over the candidates the connectivity pass left unused
fn add_bonus_hallways(
    candidates: &[Hallway],
    consumed: &[bool],
    config: &LayoutConfig,
    rng: &mut LayoutRng,
    hallways: &mut Vec<Hallway>,
) -> Result<(), GenerationError> {
    let mut added = 0;
    for (hallway, _) in candidates.iter().zip(consumed).filter(|(_, used)| !**used) {
        if added >= config.max_bonus_hallways {
            break;
        }
        if rng.chance(config.bonus_hallway_spawn_chance as f64) {
            hallways.push(hallway.simplify()?);
            added += 1;
        }
    }
    Ok(())
}
