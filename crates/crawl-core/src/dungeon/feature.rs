//! Placed level occupants beyond base terrain
//!
//! Everything that can sit on a cell is a tagged variant; callers match
//! on [`FeatureRef`] rather than sniffing for properties.

use serde::{Deserialize, Serialize};

/// Creature species, rolled at placement time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Rat,
    Slime,
    Orc,
    Bugbear,
}

impl Species {
    /// Display character
    pub const fn symbol(&self) -> char {
        match self {
            Species::Rat => 'r',
            Species::Slime => 's',
            Species::Orc => 'o',
            Species::Bugbear => 'b',
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Species::Rat => "rat",
            Species::Slime => "slime",
            Species::Orc => "orc",
            Species::Bugbear => "bugbear",
        }
    }

    /// Can this species roll the shaman upgrade?
    pub const fn has_shaman_variant(&self) -> bool {
        matches!(self, Species::Orc | Species::Bugbear)
    }
}

/// Creature class; shamans get a different display color and name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreatureClass {
    #[default]
    Warrior,
    Shaman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Monster,
    Orc,
    Bugbear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Disposition {
    Passive,
    #[default]
    Aggressive,
    Cowardly,
}

/// A live creature on the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub species: Species,
    pub class: CreatureClass,
    pub factions: Vec<Faction>,
    pub hostile_factions: Vec<Faction>,
    pub disposition: Disposition,
    pub hp: i32,
    pub sight: u32,
}

impl Creature {
    /// Build a creature with the per-species faction and disposition data.
    ///
    /// `shaman` only applies to species with a shaman variant; the flag is
    /// ignored for the others.
    pub fn spawn(id: u32, x: i32, y: i32, species: Species, shaman: bool) -> Self {
        let (factions, hostile_factions, disposition) = match species {
            Species::Rat => (vec![Faction::Monster], Vec::new(), Disposition::Cowardly),
            Species::Slime => (vec![Faction::Monster], Vec::new(), Disposition::Passive),
            Species::Orc => (
                vec![Faction::Monster, Faction::Orc],
                vec![Faction::Player, Faction::Bugbear],
                Disposition::Aggressive,
            ),
            Species::Bugbear => (
                vec![Faction::Monster, Faction::Bugbear],
                vec![Faction::Player, Faction::Orc],
                Disposition::Aggressive,
            ),
        };

        let shaman = shaman && species.has_shaman_variant();
        let class = if shaman {
            CreatureClass::Shaman
        } else {
            CreatureClass::Warrior
        };
        let name = if shaman {
            format!("{} shaman", species.name())
        } else {
            species.name().to_string()
        };

        Self {
            id,
            x,
            y,
            name,
            species,
            class,
            factions,
            hostile_factions,
            disposition,
            hp: 100,
            sight: 10,
        }
    }

    /// Check if this creature treats the given faction as an enemy
    pub fn is_hostile_to(&self, faction: Faction) -> bool {
        self.hostile_factions.contains(&faction)
    }
}

/// What a dead creature leaves behind, at the same coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpse {
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub species: Species,
}

impl Corpse {
    pub fn of(creature: &Creature) -> Self {
        Self {
            x: creature.x,
            y: creature.y,
            name: format!("{} corpse", creature.name),
            species: creature.species,
        }
    }
}

/// Loot item kinds, rolled at chest placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Sword,
    Spear,
    Shield,
    Bow,
}

impl ItemKind {
    pub const fn name(&self) -> &'static str {
        match self {
            ItemKind::Sword => "sword",
            ItemKind::Spear => "spear",
            ItemKind::Shield => "shield",
            ItemKind::Bow => "bow",
        }
    }

    pub const fn symbol(&self) -> char {
        match self {
            ItemKind::Sword => '|',
            ItemKind::Spear => '/',
            ItemKind::Shield => ')',
            ItemKind::Bow => '}',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub equipped: bool,
}

impl Item {
    pub const fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            equipped: false,
        }
    }
}

/// A chest; half of them are placed empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chest {
    pub x: i32,
    pub y: i32,
    pub loot: Option<Item>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StairDirection {
    Up,
    Down,
}

/// A stair endpoint; the cell underneath carries the matching terrain type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stair {
    pub x: i32,
    pub y: i32,
    pub direction: StairDirection,
}

/// Tagged view of whatever feature occupies a cell
#[derive(Debug, Clone, Copy)]
pub enum FeatureRef<'a> {
    Creature(&'a Creature),
    Corpse(&'a Corpse),
    Chest(&'a Chest),
    Stair(&'a Stair),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orc_faction_data() {
        let orc = Creature::spawn(1, 3, 4, Species::Orc, false);
        assert_eq!(orc.name, "orc");
        assert_eq!(orc.class, CreatureClass::Warrior);
        assert!(orc.factions.contains(&Faction::Orc));
        assert!(orc.is_hostile_to(Faction::Player));
        assert!(orc.is_hostile_to(Faction::Bugbear));
        assert!(!orc.is_hostile_to(Faction::Orc));
    }

    #[test]
    fn test_shaman_upgrade() {
        let shaman = Creature::spawn(2, 0, 0, Species::Bugbear, true);
        assert_eq!(shaman.name, "bugbear shaman");
        assert_eq!(shaman.class, CreatureClass::Shaman);
        assert!(shaman.is_hostile_to(Faction::Orc));
    }

    #[test]
    fn test_shaman_flag_ignored_for_rats() {
        let rat = Creature::spawn(3, 0, 0, Species::Rat, true);
        assert_eq!(rat.class, CreatureClass::Warrior);
        assert_eq!(rat.name, "rat");
        assert_eq!(rat.disposition, Disposition::Cowardly);
        assert!(rat.hostile_factions.is_empty());
    }

    #[test]
    fn test_corpse_keeps_coordinate() {
        let orc = Creature::spawn(4, 7, 9, Species::Orc, false);
        let corpse = Corpse::of(&orc);
        assert_eq!((corpse.x, corpse.y), (7, 9));
        assert_eq!(corpse.name, "orc corpse");
    }
}
