//! Dungeon model and procedural generation
//!
//! The grid/cell data model, the generation pipeline that carves levels
//! into it, and the level/dungeon containers that own the result.

pub mod cell;
pub mod feature;
pub mod generation;
pub mod grid;
pub mod level;
pub mod rect;
pub mod topology;

pub use cell::{Cell, CellType};
pub use feature::{
    Chest, Corpse, Creature, CreatureClass, Disposition, Faction, FeatureRef, Item, ItemKind,
    Species, Stair, StairDirection,
};
pub use generation::{
    build_walls, carve_rooms, connect_rooms, generate_level, place_doors, place_features,
    GenerationError, LevelOptions, ROOM_ATTEMPT_CEILING,
};
pub use grid::Grid;
pub use level::Level;
pub use rect::Rect;
pub use topology::Dungeon;
