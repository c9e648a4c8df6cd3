//! Bounds-checked 2D cell array
//!
//! Every access goes through checked accessors; [`Grid::type_at`] answers
//! out-of-bounds probes with a permanent `Wall` sentinel, so the
//! neighbor-pattern scans in generation can probe freely without a
//! physical border row.

use serde::{Deserialize, Serialize};

use super::{Cell, CellType};

/// One dungeon level's floor plan: a `width` x `height` array of cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: i32, height: i32, fill: CellType) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            width: w,
            height: h,
            cells: vec![Cell::of(fill); (w * h) as usize],
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Check if a coordinate lies on the grid
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Get cell at position, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get mutable cell at position, `None` when out of bounds
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Terrain type at position; out-of-bounds reads the `Wall` sentinel
    pub fn type_at(&self, x: i32, y: i32) -> CellType {
        self.get(x, y).map_or(CellType::Wall, |c| c.typ)
    }

    /// Set terrain type; out-of-bounds writes are dropped
    pub fn set_type(&mut self, x: i32, y: i32, typ: CellType) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.typ = typ;
        }
    }

    /// Clear the transient per-frame visibility flags
    pub fn clear_visibility(&mut self) {
        for cell in &mut self.cells {
            cell.visible = false;
        }
    }

    /// Iterate over all coordinates in column-major scan order
    /// (x outer, y inner - the order generation passes walk the map in)
    pub fn coords(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| (x, y)))
    }

    /// Iterate over all cells
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_fill() {
        let grid = Grid::new(10, 6, CellType::Grass);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.cells().count(), 60);
        assert!(grid.cells().all(|c| c.typ == CellType::Grass));
    }

    #[test]
    fn test_out_of_bounds_reads_wall_sentinel() {
        let grid = Grid::new(5, 5, CellType::Floor);
        assert_eq!(grid.type_at(-1, 0), CellType::Wall);
        assert_eq!(grid.type_at(0, -1), CellType::Wall);
        assert_eq!(grid.type_at(5, 0), CellType::Wall);
        assert_eq!(grid.type_at(0, 5), CellType::Wall);
        assert!(grid.get(5, 5).is_none());
    }

    #[test]
    fn test_out_of_bounds_writes_dropped() {
        let mut grid = Grid::new(3, 3, CellType::Empty);
        grid.set_type(-1, -1, CellType::Floor);
        grid.set_type(3, 0, CellType::Floor);
        assert!(grid.cells().all(|c| c.typ == CellType::Empty));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(4, 4, CellType::Empty);
        grid.set_type(2, 3, CellType::DoorClosed);
        assert_eq!(grid.type_at(2, 3), CellType::DoorClosed);
        assert_eq!(grid.type_at(3, 2), CellType::Empty);
    }

    #[test]
    fn test_clear_visibility() {
        let mut grid = Grid::new(3, 3, CellType::Floor);
        grid.get_mut(1, 1).unwrap().visible = true;
        grid.get_mut(1, 1).unwrap().discovered = true;

        grid.clear_visibility();

        assert!(!grid.get(1, 1).unwrap().visible);
        // discovered is permanent
        assert!(grid.get(1, 1).unwrap().discovered);
    }

    #[test]
    fn test_coords_cover_grid() {
        let grid = Grid::new(3, 2, CellType::Empty);
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords[0], (0, 0));
        assert_eq!(coords[1], (0, 1));
        assert_eq!(coords[5], (2, 1));
    }
}
