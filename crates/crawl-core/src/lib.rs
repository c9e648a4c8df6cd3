//! crawl-core - dungeon crawler core logic
//!
//! The algorithmic heart of a turn-based dungeon crawler: procedural
//! level generation (rooms, corridors, derived walls and doors, feature
//! placement), raycast field of view, and grid A* pathfinding. Everything
//! here is synchronous and deterministic for a fixed RNG seed; input
//! handling, rendering, and persistence live with the callers.

pub mod dungeon;
pub mod path;
pub mod rng;
pub mod vision;

pub use dungeon::{Cell, CellType, Dungeon, GenerationError, Grid, Level, LevelOptions, Rect};
pub use path::find_path;
pub use rng::{GameRng, RandomSource};
pub use vision::{field_of_view, raycast};
