//! Grid A* pathfinding
//!
//! 4-directional, unit step cost, Euclidean heuristic. Only walls are
//! impassable here: closed doors, creatures, and chests are movement
//! concerns, and the movement code checks those when it takes a step.
//!
//! The open set is a plain vector scanned linearly. On tied scores the
//! earliest-inserted node wins (strict less-than during the scan), and
//! which path comes back depends on that - keep the tie-break when
//! touching this.

use std::collections::{HashMap, HashSet};

use crate::dungeon::{CellType, Grid};

/// Neighbor probe order: north, east, south, west
const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

fn euclidean(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = (a.0 - b.0) as f64;
    let dy = (a.1 - b.1) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Find a path from `start` to `goal`.
///
/// Returns the cells to step through in order, goal included and start
/// excluded; an empty path when start and goal coincide. `None` when an
/// endpoint is out of bounds or a wall, or no route exists.
pub fn find_path(grid: &Grid, start: (i32, i32), goal: (i32, i32)) -> Option<Vec<(i32, i32)>> {
    if !grid.in_bounds(start.0, start.1) || !grid.in_bounds(goal.0, goal.1) {
        return None;
    }
    if grid.type_at(start.0, start.1) == CellType::Wall
        || grid.type_at(goal.0, goal.1) == CellType::Wall
    {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    let mut open: Vec<(i32, i32)> = vec![start];
    let mut closed: HashSet<(i32, i32)> = HashSet::new();
    let mut came_from: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
    let mut g_score: HashMap<(i32, i32), f64> = HashMap::new();
    let mut f_score: HashMap<(i32, i32), f64> = HashMap::new();
    g_score.insert(start, 0.0);
    f_score.insert(start, euclidean(start, goal));

    while !open.is_empty() {
        // strict less-than keeps the earliest-inserted node on ties
        let mut best = 0;
        let mut best_f = f64::INFINITY;
        for (i, node) in open.iter().enumerate() {
            let f = f_score.get(node).copied().unwrap_or(f64::INFINITY);
            if f < best_f {
                best_f = f;
                best = i;
            }
        }
        let current = open.remove(best);

        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }
        closed.insert(current);

        for (dx, dy) in NEIGHBORS {
            let neighbor = (current.0 + dx, current.1 + dy);
            if !grid.in_bounds(neighbor.0, neighbor.1)
                || grid.type_at(neighbor.0, neighbor.1) == CellType::Wall
                || closed.contains(&neighbor)
            {
                continue;
            }

            let tentative = g_score.get(&current).copied().unwrap_or(f64::INFINITY)
                + euclidean(current, neighbor);

            if !open.contains(&neighbor) {
                open.push(neighbor);
            } else if tentative >= g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                continue;
            }

            came_from.insert(neighbor, current);
            g_score.insert(neighbor, tentative);
            f_score.insert(neighbor, tentative + euclidean(neighbor, goal));
        }
    }

    None
}

fn reconstruct(
    came_from: &HashMap<(i32, i32), (i32, i32)>,
    start: (i32, i32),
    goal: (i32, i32),
) -> Vec<(i32, i32)> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
