//! Dungeon topology
//!
//! A dungeon is a named stack of levels generated lazily, one descent at
//! a time. Revisiting a depth hands back its stored level untouched -
//! levels are never regenerated, so everything on them survives a round
//! trip up and down the stairs.

use serde::{Deserialize, Serialize};

use super::generation::{generate_level, GenerationError, LevelOptions};
use super::Level;
use crate::rng::RandomSource;

/// A stack of levels under one entrance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    pub name: String,
    pub levels: Vec<Level>,
    pub max_levels: usize,
}

impl Dungeon {
    /// Create an empty dungeon. With no name given, one is rolled.
    pub fn new(name: Option<String>, max_levels: usize, rng: &mut dyn RandomSource) -> Self {
        let name = name.unwrap_or_else(|| {
            let roll = rng.next_float();
            let adjective = if roll < 0.25 {
                "cool"
            } else if roll < 0.5 {
                "awesome"
            } else if roll < 0.75 {
                "terrible"
            } else {
                "low effort"
            };
            format!("{adjective} dungeon")
        });

        Self {
            name,
            levels: Vec::new(),
            max_levels,
        }
    }

    /// Deepest depth generated so far, `None` for an unentered dungeon
    pub fn deepest_generated(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    /// Fetch the level at a depth, generating it on first descent.
    ///
    /// Depths are visited in order: an existing depth is returned as
    /// stored, the next unvisited depth is generated and kept, and
    /// anything deeper than that (or past `max_levels`) is an error.
    pub fn level_at(
        &mut self,
        depth: usize,
        opts: &LevelOptions,
        rng: &mut dyn RandomSource,
    ) -> Result<&mut Level, GenerationError> {
        if depth >= self.max_levels {
            return Err(GenerationError::DepthOutOfRange {
                depth,
                max_levels: self.max_levels,
            });
        }
        if depth > self.levels.len() {
            return Err(GenerationError::DepthNotGenerated { depth });
        }
        if depth == self.levels.len() {
            let level = generate_level(depth, opts, rng)?;
            self.levels.push(level);
        }
        Ok(&mut self.levels[depth])
    }
}
