//! Level structure
//!
//! A level owns its grid, the room list in acceptance order, and the
//! feature collections. Turn-level mutation (doors, traps, deaths) lives
//! here; movement legality for actors is also answered here, while the
//! pathfinder deliberately checks walls only.

use serde::{Deserialize, Serialize};

use super::feature::{Chest, Corpse, Creature, FeatureRef, Item, Species, Stair, StairDirection};
use super::{CellType, Grid, Rect};
use crate::vision;

/// One generated dungeon floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Depth index within the owning dungeon (0 = first floor)
    pub depth: usize,

    /// Floor plan
    pub grid: Grid,

    /// Rooms in acceptance order. Order is load-bearing: room 0 gets the
    /// stairs up, the last room the stairs down.
    pub rooms: Vec<Rect>,

    /// Live creatures
    pub creatures: Vec<Creature>,

    /// Remains of dead creatures
    pub corpses: Vec<Corpse>,

    /// Chests, removed when opened
    pub chests: Vec<Chest>,

    /// Stair endpoints (cells carry the matching terrain type)
    pub stairs: Vec<Stair>,

    /// Rooms are fully lit rather than sight-limited
    pub lit_rooms: bool,

    /// Next creature ID to assign
    next_creature_id: u32,
}

impl Level {
    /// Create an empty (undug) level
    pub fn new(depth: usize, width: i32, height: i32) -> Self {
        Self {
            depth,
            grid: Grid::new(width, height, CellType::Empty),
            rooms: Vec::new(),
            creatures: Vec::new(),
            corpses: Vec::new(),
            chests: Vec::new(),
            stairs: Vec::new(),
            lit_rooms: false,
            next_creature_id: 1,
        }
    }

    /// Check if an actor may stand on this cell. Out of bounds is
    /// impassable, as are walls and closed doors.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y) && !self.grid.type_at(x, y).is_solid()
    }

    /// Spawn a creature, assigning it the next free ID
    pub fn spawn_creature(&mut self, x: i32, y: i32, species: Species, shaman: bool) -> u32 {
        let id = self.next_creature_id;
        self.next_creature_id += 1;
        self.creatures
            .push(Creature::spawn(id, x, y, species, shaman));
        id
    }

    /// Get creature by ID
    pub fn creature(&self, id: u32) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// Get mutable creature by ID
    pub fn creature_mut(&mut self, id: u32) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    /// Get creature at position
    pub fn creature_at(&self, x: i32, y: i32) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.x == x && c.y == y)
    }

    /// Get chest at position
    pub fn chest_at(&self, x: i32, y: i32) -> Option<&Chest> {
        self.chests.iter().find(|c| c.x == x && c.y == y)
    }

    /// Kill a creature: remove it and leave a corpse at the same
    /// coordinate. Returns false when no such creature exists.
    pub fn kill_creature(&mut self, id: u32) -> bool {
        let Some(idx) = self.creatures.iter().position(|c| c.id == id) else {
            return false;
        };
        let creature = self.creatures.remove(idx);
        self.corpses.push(Corpse::of(&creature));
        true
    }

    /// Open a chest: remove it and hand over its loot. Outer `None` means
    /// there was no chest here; inner `None` an empty one.
    pub fn open_chest(&mut self, x: i32, y: i32) -> Option<Option<Item>> {
        let idx = self.chests.iter().position(|c| c.x == x && c.y == y)?;
        Some(self.chests.remove(idx).loot)
    }

    /// Open a closed door. Returns false when the cell is not a closed door.
    pub fn open_door(&mut self, x: i32, y: i32) -> bool {
        if self.grid.type_at(x, y) == CellType::DoorClosed {
            self.grid.set_type(x, y, CellType::DoorOpen);
            true
        } else {
            false
        }
    }

    /// Close an open door. Returns false when the cell is not an open door,
    /// or something is standing in the doorway.
    pub fn close_door(&mut self, x: i32, y: i32) -> bool {
        if self.grid.type_at(x, y) == CellType::DoorOpen && self.creature_at(x, y).is_none() {
            self.grid.set_type(x, y, CellType::DoorClosed);
            true
        } else {
            false
        }
    }

    /// Trigger the trap on a cell, if any. A fired trap reverts to floor.
    pub fn trigger_trap(&mut self, x: i32, y: i32) -> bool {
        if self.grid.type_at(x, y) == CellType::Trap {
            self.grid.set_type(x, y, CellType::Floor);
            true
        } else {
            false
        }
    }

    /// Find the stairs leading up
    pub fn stairs_up(&self) -> Option<(i32, i32)> {
        self.stairs
            .iter()
            .find(|s| s.direction == StairDirection::Up)
            .map(|s| (s.x, s.y))
    }

    /// Find the stairs leading down
    pub fn stairs_down(&self) -> Option<(i32, i32)> {
        self.stairs
            .iter()
            .find(|s| s.direction == StairDirection::Down)
            .map(|s| (s.x, s.y))
    }

    /// Tagged view of the feature occupying a cell, if any.
    /// Creatures shadow corpses, which shadow chests, which shadow stairs -
    /// the order things are drawn in.
    pub fn feature_at(&self, x: i32, y: i32) -> Option<FeatureRef<'_>> {
        if let Some(c) = self.creature_at(x, y) {
            return Some(FeatureRef::Creature(c));
        }
        if let Some(c) = self.corpses.iter().find(|c| c.x == x && c.y == y) {
            return Some(FeatureRef::Corpse(c));
        }
        if let Some(c) = self.chest_at(x, y) {
            return Some(FeatureRef::Chest(c));
        }
        if let Some(s) = self.stairs.iter().find(|s| s.x == x && s.y == y) {
            return Some(FeatureRef::Stair(s));
        }
        None
    }

    /// Recompute the field of view from an origin cell. Marks cells
    /// discovered/visible and returns the visible set; runs once per turn
    /// against the current actor position.
    pub fn compute_visibility(&mut self, origin: (i32, i32), sight_radius: u32) -> Vec<(i32, i32)> {
        vision::field_of_view(&mut self.grid, origin, sight_radius, 1.0, |_, _| {})
    }
}
