//! Room rectangles

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// An axis-aligned room rectangle in grid coordinates.
///
/// Created once during generation and immutable afterwards. A room's
/// interior spans `[x, x+width) x [y, y+height)`; the generator keeps a
/// 1-cell margin between the interior and the grid edge so the wall pass
/// always has somewhere to put the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right edge of the interior
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom edge of the interior
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if a point lies in the interior
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Interior cell count
    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Uniformly random interior point. Draws x before y.
    pub fn random_point(&self, rng: &mut dyn RandomSource) -> (i32, i32) {
        let x = rng.next_int(self.x, self.right());
        let y = rng.next_int(self.y, self.bottom());
        (x, y)
    }
}
