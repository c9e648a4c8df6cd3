//! Field of view
//!
//! 360-degree raycasting. Rays start at the origin cell's center, step in
//! unit increments along their heading, and truncate the floating point
//! position to a cell at every step. A ray marks the opaque cell it runs
//! into and stops there, so walls and closed doors are themselves visible.
//!
//! Nearby cells are crossed by many rays; the visible set and the visitor
//! are deduplicated per cell per pass via the transient `visible` flag.

use crate::dungeon::Grid;

/// Cast a single ray and call `visitor` for every cell it crosses, in
/// order from the origin outwards. The origin cell itself is the first
/// visit. Leaving the grid or entering an opaque cell ends the ray; the
/// opaque cell is visited, anything beyond it is not.
pub fn raycast<F>(
    grid: &Grid,
    origin: (i32, i32),
    radius: u32,
    heading_degrees: f64,
    mut visitor: F,
) where
    F: FnMut(i32, i32),
{
    let dx = heading_degrees.to_radians().cos();
    let dy = heading_degrees.to_radians().sin();

    // ray position starts at the cell center
    let mut cx = origin.0 as f64 + 0.5;
    let mut cy = origin.1 as f64 + 0.5;

    for _ in 0..radius {
        let x = cx.trunc() as i32;
        let y = cy.trunc() as i32;
        if !grid.in_bounds(x, y) {
            return;
        }
        visitor(x, y);
        if grid.type_at(x, y).blocks_sight() {
            return;
        }
        cx += dx;
        cy += dy;
    }
}

/// Compute the field of view from an origin cell.
///
/// Clears every cell's `visible` flag, then sweeps headings from 0 toward
/// 360 degrees in `step_degrees` increments, raycasting each one. Every
/// cell a ray reaches is marked discovered (permanent) and visible
/// (this pass), `visitor` fires once per newly visible cell, and the cell
/// joins the returned set. An out-of-bounds origin yields an empty set.
pub fn field_of_view<F>(
    grid: &mut Grid,
    origin: (i32, i32),
    sight_radius: u32,
    step_degrees: f64,
    mut visitor: F,
) -> Vec<(i32, i32)>
where
    F: FnMut(i32, i32),
{
    grid.clear_visibility();

    let mut visible = Vec::new();
    if !grid.in_bounds(origin.0, origin.1) || step_degrees <= 0.0 {
        return visible;
    }

    let mut heading = 0.0;
    let mut ray = Vec::new();
    while heading < 360.0 {
        ray.clear();
        raycast(grid, origin, sight_radius, heading, |x, y| ray.push((x, y)));
        for &(x, y) in &ray {
            let Some(cell) = grid.get_mut(x, y) else {
                continue;
            };
            if cell.visible {
                continue;
            }
            cell.visible = true;
            cell.discovered = true;
            visitor(x, y);
            visible.push((x, y));
        }
        heading += step_degrees;
    }

    visible
}
