//! End-to-end generation tests over random seeds and configurations

use std::collections::BTreeSet;

use lg_core::{CellRef, Coord, DecayCurve, LayoutConfig, RoomId, generate_seeded};
use proptest::prelude::*;

fn decay_strategy() -> impl Strategy<Value = DecayCurve> {
    prop_oneof![
        Just(DecayCurve::Linear),
        (0.25f32..4.0).prop_map(|exponent| DecayCurve::Power { exponent }),
        Just(DecayCurve::SmoothStep),
        (0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(t, v)| DecayCurve::Piecewise {
            points: vec![(0.0, 0.0), (t, v), (1.0, 1.0)],
        }),
    ]
}

fn config_strategy() -> impl Strategy<Value = LayoutConfig> {
    (
        (1u32..=2, 6u32..=20),
        (1u32..=11, 3u32..=11),
        1u32..=4,
        1.05f32..3.0,
        1u32..=3,
        0.0f32..=1.0,
        0.0f32..=1.0,
        0u32..=6,
        decay_strategy(),
    )
        .prop_map(
            |(
                (hallway_width, world_scale),
                (min_sector_size, max_sector_size),
                sections,
                scale,
                overlap,
                density,
                bonus,
                max_bonus,
                sector_size_decay,
            )| LayoutConfig {
                hallway_width,
                world_scale,
                min_sector_size: min_sector_size.min(max_sector_size),
                max_sector_size,
                max_sections_per_room: sections,
                max_room_size_scale: scale,
                min_sector_overlap_width: overlap,
                room_density: density,
                bonus_hallway_spawn_chance: bonus,
                max_bonus_hallways: max_bonus,
                sector_size_decay,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_rooms_and_hallways_never_share_cells(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let layout = generate_seeded(&config, seed).unwrap();

        let room_cells: BTreeSet<Coord> = layout
            .rooms()
            .iter()
            .flat_map(|r| r.cells().iter().copied())
            .collect();
        let mut hallway_cells = BTreeSet::new();
        for hallway in layout.hallways() {
            for &c in hallway.path() {
                prop_assert!(!room_cells.contains(&c), "{} is both room and hallway", c);
                prop_assert!(hallway_cells.insert(c), "{} is in two hallways", c);
            }
        }
    }

    #[test]
    fn prop_rooms_respect_limits(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let layout = generate_seeded(&config, seed).unwrap();

        for room in layout.rooms() {
            prop_assert!(room.section_count() >= 1);
            prop_assert!(room.section_count() <= config.max_sections_per_room as usize);
            prop_assert!(room.cell_count() < config.max_room_cells());
        }
    }

    #[test]
    fn prop_hallways_connect_every_room(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let layout = generate_seeded(&config, seed).unwrap();

        prop_assert!(layout.is_connected());
        if layout.rooms().len() >= 2 {
            let linked: BTreeSet<RoomId> = layout.room_links().into_keys().collect();
            let rooms: BTreeSet<RoomId> = layout.rooms().iter().map(|r| r.id()).collect();
            prop_assert_eq!(linked, rooms);
        }
    }

    #[test]
    fn prop_doors_stay_on_paths(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let layout = generate_seeded(&config, seed).unwrap();

        for hallway in layout.hallways() {
            prop_assert!(hallway.doors().len() >= 2);
            for (&room, &door) in hallway.doors() {
                prop_assert!(hallway.contains(door));
                let touches = door
                    .orthogonal()
                    .any(|c| layout.cell(c) == Some(CellRef::Room(room)));
                prop_assert!(touches, "door {} does not touch {}", door, room);
            }
        }
    }

    #[test]
    fn prop_airlocks_sit_on_free_even_cells(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let layout = generate_seeded(&config, seed).unwrap();

        for airlock in layout.airlocks() {
            let cell = airlock.cell;
            prop_assert_eq!(cell.x % 2, 0);
            prop_assert_eq!(cell.y % 2, 0);
            prop_assert!(layout.cell(cell).is_none());
            prop_assert!(cell.surrounding().all(|c| layout.hallway_at(c).is_none()));
            prop_assert_eq!(
                layout.cell(cell.step(airlock.direction)),
                Some(CellRef::Room(airlock.room))
            );
        }
    }

    #[test]
    fn prop_cell_index_matches_rooms_and_hallways(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let layout = generate_seeded(&config, seed).unwrap();
        let stats = layout.stats();

        let mut rooms = 0;
        let mut hallways = 0;
        for (c, owner) in layout.cells() {
            if owner.is_room() {
                rooms += 1;
                let room = layout.room_at(c).unwrap();
                prop_assert!(room.contains(c));
                prop_assert!(room.sections().iter().any(|s| s.contains(c)));
            } else if owner.is_hallway() {
                hallways += 1;
                prop_assert!(layout.hallway_at(c).unwrap().contains(c));
            }
        }
        prop_assert_eq!(rooms, stats.room_cells);
        prop_assert_eq!(hallways, stats.hallway_cells);
    }

    #[test]
    fn prop_same_seed_same_layout(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let a = generate_seeded(&config, seed).unwrap();
        let b = generate_seeded(&config, seed).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn test_layout_serializes_to_json() {
    let layout = generate_seeded(&LayoutConfig::default(), 42).unwrap();
    let value = serde_json::to_value(&layout).unwrap();

    let rooms = value["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), layout.rooms().len());
    assert!(rooms[0]["sections"].is_array());
    assert_eq!(
        value["hallways"].as_array().unwrap().len(),
        layout.hallways().len()
    );
    assert_eq!(value["extent"], 53);
    assert_eq!(value["config"]["world_scale"], 24);
}

#[test]
fn test_single_max_sector_stays_under_room_bound() {
    let config = LayoutConfig {
        min_sector_size: 11,
        max_sector_size: 11,
        max_room_size_scale: 1.01,
        ..LayoutConfig::default()
    };
    config.validate().unwrap();

    for seed in 0..10 {
        let layout = generate_seeded(&config, seed).unwrap();
        for room in layout.rooms() {
            assert!(room.cell_count() < config.max_room_cells());
        }
    }
}

#[test]
fn test_different_seeds_differ() {
    let config = LayoutConfig::default();
    let a = generate_seeded(&config, 1).unwrap();
    let b = generate_seeded(&config, 2).unwrap();
    assert_ne!(a, b);
}
