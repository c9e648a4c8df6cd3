//! Level generation
//!
//! The four-stage pipeline: carve rooms, connect them with corridor
//! outlines, derive walls and doors from adjacency, place features.
//! Stages are public so callers (and tests) can run them against a
//! hand-built grid; `generate_level` runs the whole pipeline.
//!
//! Output is a pure function of the options and the RNG draw sequence.
//! Draw order is rooms, corridors, doors, features - reordering any stage
//! changes every level generated from a fixed seed.

use thiserror::Error;

use super::feature::{Chest, Item, ItemKind, Species, Stair, StairDirection};
use super::{CellType, Grid, Level, Rect};
use crate::rng::RandomSource;

/// Hard ceiling on room placement retries. The "at least 2 rooms" floor
/// loops past the attempt budget, and on a grid too small for two rooms
/// it would otherwise never terminate.
pub const ROOM_ATTEMPT_CEILING: u32 = 10_000;

/// Level generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LevelOptions {
    pub width: i32,
    pub height: i32,
    pub room_attempts: u32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    pub prevent_overlap: bool,
    pub lit_rooms: bool,
    /// Per-floor-cell probability of testing the doorway patterns
    pub door_chance: f64,
    pub trap_amount: u32,
    pub creature_amount: u32,
    pub chest_amount: u32,
}

impl Default for LevelOptions {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            room_attempts: 20,
            min_room_size: 5,
            max_room_size: 15,
            prevent_overlap: true,
            lit_rooms: false,
            door_chance: 0.5,
            trap_amount: 3,
            creature_amount: 5,
            chest_amount: 5,
        }
    }
}

/// Generation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The retry ceiling was hit with fewer than two rooms accepted;
    /// the grid geometry cannot fit the requested room sizes.
    #[error("could not place 2 rooms in {attempts} attempts; grid too small for the room size range")]
    RoomBudgetExhausted { attempts: u32 },

    /// Asked for a depth past the dungeon's configured maximum
    #[error("depth {depth} is beyond the dungeon's {max_levels} levels")]
    DepthOutOfRange { depth: usize, max_levels: usize },

    /// Asked for a depth that was never descended to (levels are
    /// generated one descent at a time, no holes)
    #[error("depth {depth} has not been generated yet")]
    DepthNotGenerated { depth: usize },
}

/// Run the full pipeline and produce a complete level
pub fn generate_level(
    depth: usize,
    opts: &LevelOptions,
    rng: &mut dyn RandomSource,
) -> Result<Level, GenerationError> {
    let mut level = Level::new(depth, opts.width, opts.height);
    level.lit_rooms = opts.lit_rooms;

    carve_rooms(&mut level.grid, &mut level.rooms, opts, rng)?;
    connect_rooms(&mut level.grid, &level.rooms, rng);
    build_walls(&mut level.grid);
    place_doors(&mut level.grid, opts.door_chance, rng);
    place_features(&mut level, opts, rng);

    Ok(level)
}

/// Stage 1: stochastic room placement.
///
/// Samples candidate rectangles and rejects any that touch the grid edge
/// (a 1-cell margin stays clear) or, with `prevent_overlap`, any whose
/// interior or orthogonal neighbors already hold floor. Diagonal-only
/// contact between rooms is allowed; the overlap probe never checked it
/// and generated levels depend on that asymmetry.
///
/// Loops past `room_attempts` until at least 2 rooms exist, bailing out at
/// [`ROOM_ATTEMPT_CEILING`] when the geometry makes that impossible.
pub fn carve_rooms(
    grid: &mut Grid,
    rooms: &mut Vec<Rect>,
    opts: &LevelOptions,
    rng: &mut dyn RandomSource,
) -> Result<(), GenerationError> {
    let mut attempt = 0u32;

    while attempt < opts.room_attempts || rooms.len() < 2 {
        if attempt >= ROOM_ATTEMPT_CEILING {
            if rooms.len() < 2 {
                return Err(GenerationError::RoomBudgetExhausted { attempts: attempt });
            }
            break;
        }
        attempt += 1;

        let room = Rect::new(
            rng.next_int(0, grid.width()),
            rng.next_int(0, grid.height()),
            rng.next_int(opts.min_room_size, opts.max_room_size),
            rng.next_int(opts.min_room_size, opts.max_room_size),
        );

        if room.width < 1 || room.height < 1 {
            continue;
        }

        // keep a 1-cell margin to the grid edge on all sides
        if room.x < 1
            || room.right() > grid.width() - 1
            || room.y < 1
            || room.bottom() > grid.height() - 1
        {
            continue;
        }

        if opts.prevent_overlap && overlaps_floor(grid, &room) {
            continue;
        }

        for x in room.x..room.right() {
            for y in room.y..room.bottom() {
                grid.set_type(x, y, CellType::Floor);
            }
        }

        rooms.push(room);
    }

    Ok(())
}

/// Check a candidate's interior and orthogonal neighbors for existing
/// floor. The 1-cell gap this enforces is between interiors only.
fn overlaps_floor(grid: &Grid, room: &Rect) -> bool {
    for x in room.x..room.right() {
        for y in room.y..room.bottom() {
            if grid.type_at(x, y) == CellType::Floor
                || grid.type_at(x, y - 1) == CellType::Floor
                || grid.type_at(x + 1, y) == CellType::Floor
                || grid.type_at(x, y + 1) == CellType::Floor
                || grid.type_at(x - 1, y) == CellType::Floor
            {
                return true;
            }
        }
    }
    false
}

/// Stage 2: connect consecutive rooms.
///
/// Picks one random interior point in each of rooms i and i+1 and stamps
/// the border outline of their bounding rectangle as floor. At small
/// separations the outline degenerates to a straight line; at large ones
/// it is a hollow rectangle touching both rooms. Every room ends up with
/// at least two ways in and out, and no room is an island.
pub fn connect_rooms(grid: &mut Grid, rooms: &[Rect], rng: &mut dyn RandomSource) {
    for pair in rooms.windows(2) {
        let (mut x1, mut y1) = pair[0].random_point(rng);
        let (mut x2, mut y2) = pair[1].random_point(rng);

        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        if y1 > y2 {
            std::mem::swap(&mut y1, &mut y2);
        }

        for x in x1..=x2 {
            for y in y1..=y2 {
                if x == x1 || x == x2 || y == y1 || y == y2 {
                    grid.set_type(x, y, CellType::Floor);
                }
            }
        }
    }
}

/// Moore neighborhood in the scan order the wall pass uses
const MOORE: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Stage 3a: derive walls. Every floor cell promotes each of its 8 empty
/// neighbors to wall, which closes every carved area behind a wall ring.
pub fn build_walls(grid: &mut Grid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.type_at(x, y) != CellType::Floor {
                continue;
            }
            for (dx, dy) in MOORE {
                if grid.type_at(x + dx, y + dy) == CellType::Empty {
                    grid.set_type(x + dx, y + dy, CellType::Wall);
                }
            }
        }
    }
}

/// Stage 3b: derive doors. Each floor cell rolls `door_chance` once; a
/// passing roll tests the four cardinal doorway patterns in turn (the
/// checks are a sequential if-chain, not mutually exclusive - the last
/// match wins) and a matching cell becomes a closed door.
///
/// A doorway pattern is a 1-wide threshold: three floor cells ahead and
/// walls on both flanks.
pub fn place_doors(grid: &mut Grid, door_chance: f64, rng: &mut dyn RandomSource) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.type_at(x, y) != CellType::Floor || !rng.chance(door_chance) {
                continue;
            }

            // north: floor row above, walls east and west
            if grid.type_at(x, y - 1) == CellType::Floor
                && grid.type_at(x + 1, y - 1) == CellType::Floor
                && grid.type_at(x - 1, y - 1) == CellType::Floor
                && grid.type_at(x - 1, y) == CellType::Wall
                && grid.type_at(x + 1, y) == CellType::Wall
            {
                grid.set_type(x, y, CellType::DoorClosed);
            }
            // east: floor column right, walls north and south
            if grid.type_at(x + 1, y) == CellType::Floor
                && grid.type_at(x + 1, y - 1) == CellType::Floor
                && grid.type_at(x + 1, y + 1) == CellType::Floor
                && grid.type_at(x, y + 1) == CellType::Wall
                && grid.type_at(x, y - 1) == CellType::Wall
            {
                grid.set_type(x, y, CellType::DoorClosed);
            }
            // south: floor row below, walls east and west
            if grid.type_at(x, y + 1) == CellType::Floor
                && grid.type_at(x + 1, y + 1) == CellType::Floor
                && grid.type_at(x - 1, y + 1) == CellType::Floor
                && grid.type_at(x - 1, y) == CellType::Wall
                && grid.type_at(x + 1, y) == CellType::Wall
            {
                grid.set_type(x, y, CellType::DoorClosed);
            }
            // west: floor column left, walls north and south
            if grid.type_at(x - 1, y) == CellType::Floor
                && grid.type_at(x - 1, y - 1) == CellType::Floor
                && grid.type_at(x - 1, y + 1) == CellType::Floor
                && grid.type_at(x, y + 1) == CellType::Wall
                && grid.type_at(x, y - 1) == CellType::Wall
            {
                grid.set_type(x, y, CellType::DoorClosed);
            }
        }
    }
}

/// Stage 4: place features. Draw order: traps, stairs up, stairs down,
/// creatures, chests.
///
/// Stairs up go in room 0, stairs down in the last room; with a single
/// room both land in it. Creatures spawn only in rooms with index >= 1,
/// never in the entry room. Chests may land anywhere.
pub fn place_features(level: &mut Level, opts: &LevelOptions, rng: &mut dyn RandomSource) {
    if level.rooms.is_empty() {
        return;
    }

    for _ in 0..opts.trap_amount {
        let room = level.rooms[rng.next_int(0, level.rooms.len() as i32) as usize];
        let (x, y) = room.random_point(rng);
        level.grid.set_type(x, y, CellType::Trap);
    }

    let (ux, uy) = level.rooms[0].random_point(rng);
    level.grid.set_type(ux, uy, CellType::StairsUp);
    level.stairs.push(Stair {
        x: ux,
        y: uy,
        direction: StairDirection::Up,
    });

    let (dx, dy) = level.rooms[level.rooms.len() - 1].random_point(rng);
    level.grid.set_type(dx, dy, CellType::StairsDown);
    level.stairs.push(Stair {
        x: dx,
        y: dy,
        direction: StairDirection::Down,
    });

    if level.rooms.len() > 1 {
        for _ in 0..opts.creature_amount {
            let room = level.rooms[rng.next_int(1, level.rooms.len() as i32) as usize];
            let (x, y) = room.random_point(rng);

            let roll = rng.next_float();
            let species = if roll < 0.25 {
                Species::Rat
            } else if roll < 0.50 {
                Species::Slime
            } else if roll < 0.75 {
                Species::Orc
            } else {
                Species::Bugbear
            };
            let shaman = species.has_shaman_variant() && rng.chance(0.5);

            level.spawn_creature(x, y, species, shaman);
        }
    }

    for _ in 0..opts.chest_amount {
        let room = level.rooms[rng.next_int(0, level.rooms.len() as i32) as usize];
        let (x, y) = room.random_point(rng);

        let loot = if rng.chance(0.5) {
            None
        } else {
            let roll = rng.next_float();
            let kind = if roll < 0.25 {
                ItemKind::Sword
            } else if roll < 0.50 {
                ItemKind::Spear
            } else if roll < 0.75 {
                ItemKind::Shield
            } else {
                ItemKind::Bow
            };
            Some(Item::new(kind))
        };

        level.chests.push(Chest { x, y, loot });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    #[test]
    fn test_generation_basics() {
        let mut rng = GameRng::new(12345);
        let level = generate_level(0, &LevelOptions::default(), &mut rng).unwrap();

        assert!(level.rooms.len() >= 2, "should place at least 2 rooms");

        let floor_count = level
            .grid
            .cells()
            .filter(|c| c.typ == CellType::Floor)
            .count();
        assert!(floor_count > 0, "should have carved floor");

        let (ux, uy) = level.stairs_up().expect("stairs up placed");
        let (dx, dy) = level.stairs_down().expect("stairs down placed");
        assert!(level.rooms[0].contains(ux, uy));
        assert!(level.rooms[level.rooms.len() - 1].contains(dx, dy));
    }

    #[test]
    fn test_wall_closure() {
        let mut rng = GameRng::new(99);
        let level = generate_level(0, &LevelOptions::default(), &mut rng).unwrap();

        for (x, y) in level.grid.coords() {
            if level.grid.type_at(x, y) != CellType::Floor {
                continue;
            }
            for (dx, dy) in MOORE {
                assert_ne!(
                    level.grid.type_at(x + dx, y + dy),
                    CellType::Empty,
                    "floor at ({}, {}) has an empty neighbor",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_rooms_keep_edge_margin() {
        let mut rng = GameRng::new(7);
        let opts = LevelOptions::default();
        let level = generate_level(0, &opts, &mut rng).unwrap();

        for room in &level.rooms {
            assert!(room.x >= 1 && room.y >= 1);
            assert!(room.right() <= opts.width - 1);
            assert!(room.bottom() <= opts.height - 1);
        }
    }

    #[test]
    fn test_overlap_prevention_keeps_gap() {
        let mut rng = GameRng::new(31337);
        let opts = LevelOptions {
            room_attempts: 100,
            ..LevelOptions::default()
        };
        let mut level = Level::new(0, opts.width, opts.height);
        carve_rooms(&mut level.grid, &mut level.rooms, &opts, &mut rng).unwrap();

        // no two room interiors overlap or touch orthogonally; diagonal
        // contact is allowed (the probe only checks the 4 neighbors)
        let x_overlap = |a: &Rect, b: &Rect, pad: i32| a.x - pad < b.right() && b.x < a.right() + pad;
        let y_overlap = |a: &Rect, b: &Rect, pad: i32| a.y - pad < b.bottom() && b.y < a.bottom() + pad;
        for (i, a) in level.rooms.iter().enumerate() {
            for b in level.rooms.iter().skip(i + 1) {
                let touches = (x_overlap(a, b, 1) && y_overlap(a, b, 0))
                    || (x_overlap(a, b, 0) && y_overlap(a, b, 1));
                assert!(!touches, "{:?} and {:?} overlap or touch orthogonally", a, b);
            }
        }
    }

    #[test]
    fn test_impossible_geometry_errors_out() {
        // 6x6 grid cannot hold two 5-cell-wide rooms with margins
        let mut rng = GameRng::new(1);
        let opts = LevelOptions {
            width: 6,
            height: 6,
            min_room_size: 5,
            max_room_size: 6,
            ..LevelOptions::default()
        };
        let err = generate_level(0, &opts, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::RoomBudgetExhausted { .. }));
    }

    #[test]
    fn test_min_two_rooms_despite_small_budget() {
        let mut rng = GameRng::new(5);
        let opts = LevelOptions {
            room_attempts: 1,
            ..LevelOptions::default()
        };
        let level = generate_level(0, &opts, &mut rng).unwrap();
        assert!(level.rooms.len() >= 2);
    }

    #[test]
    fn test_creatures_never_in_entry_room() {
        let mut rng = GameRng::new(2024);
        let opts = LevelOptions {
            creature_amount: 30,
            ..LevelOptions::default()
        };
        let level = generate_level(0, &opts, &mut rng).unwrap();

        assert!(!level.creatures.is_empty());
        for creature in &level.creatures {
            assert!(
                level.rooms[1..]
                    .iter()
                    .any(|r| r.contains(creature.x, creature.y)),
                "{} placed outside rooms 1..", creature.name
            );
        }
    }

    #[test]
    fn test_doors_sit_in_thresholds() {
        let mut rng = GameRng::new(4242);
        let level = generate_level(0, &LevelOptions::default(), &mut rng).unwrap();

        for (x, y) in level.grid.coords() {
            if level.grid.type_at(x, y) != CellType::DoorClosed {
                continue;
            }
            // every door has walls on one flank pair
            let ew_walls = level.grid.type_at(x - 1, y) == CellType::Wall
                && level.grid.type_at(x + 1, y) == CellType::Wall;
            let ns_walls = level.grid.type_at(x, y - 1) == CellType::Wall
                && level.grid.type_at(x, y + 1) == CellType::Wall;
            assert!(
                ew_walls || ns_walls,
                "door at ({}, {}) is not a 1-wide threshold",
                x,
                y
            );
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let opts = LevelOptions::default();
        let a = generate_level(3, &opts, &mut GameRng::new(777)).unwrap();
        let b = generate_level(3, &opts, &mut GameRng::new(777)).unwrap();

        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.stairs, b.stairs);
        assert_eq!(a.creatures.len(), b.creatures.len());
        for (ca, cb) in a.creatures.iter().zip(&b.creatures) {
            assert_eq!((ca.x, ca.y, ca.species, ca.class), (cb.x, cb.y, cb.species, cb.class));
        }
        for (x, y) in a.grid.coords() {
            assert_eq!(a.grid.type_at(x, y), b.grid.type_at(x, y));
        }
    }
}
