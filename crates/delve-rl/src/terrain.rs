//! Terrain refinement passes: dead-end removal and cellular-automaton
//! growth.
//!
//! Both passes decide every change from one snapshot of the grid and then
//! apply the changes together, so the result does not depend on the order
//! in which cells are visited.

use std::collections::HashSet;

use delve_core::{Grid, Point, Rect, Tile};

/// Floor neighbours (out of 8) above which a wall turns to floor.
const GROWTH_THRESHOLD: usize = 3;

/// Whether `p` is a dead end: a non-wall cell with exactly one open side.
pub fn is_dead_end(grid: &Grid, p: Point) -> bool {
    grid.at(p) != Tile::Wall
        && p.neighbors_4()
            .into_iter()
            .filter(|&q| grid.at(q) == Tile::Wall)
            .count()
            == 3
}

/// Remove every current dead end at once, reverting it to wall.
///
/// Returns the number of cells removed. Removing dead ends can expose new
/// ones; call repeatedly (until it returns 0, or for a fixed number of
/// rounds) to erode further.
pub fn remove_dead_ends(grid: &mut Grid) -> usize {
    let ends: Vec<Point> = grid
        .iter()
        .map(|(p, _)| p)
        .filter(|&p| is_dead_end(grid, p))
        .collect();
    for &p in &ends {
        grid.set(p, Tile::Wall);
    }
    log::trace!("removed {} dead ends", ends.len());
    ends.len()
}

/// Run [`remove_dead_ends`] until nothing is left to remove. Returns the
/// total removed.
pub fn remove_all_dead_ends(grid: &mut Grid) -> usize {
    let mut total = 0;
    loop {
        let n = remove_dead_ends(grid);
        if n == 0 {
            return total;
        }
        total += n;
    }
}

/// One round of cellular-automaton growth.
///
/// Every wall cell touching floor (8-neighbourhood) with more than three
/// floor neighbours becomes floor. Only ever adds floor. Returns the number
/// of cells added.
pub fn grow_map(grid: &mut Grid) -> usize {
    grow(grid, None)
}

/// Like [`grow_map`], but never turns a cell outside `bounds` to floor.
pub fn grow_map_in(grid: &mut Grid, bounds: Rect) -> usize {
    grow(grid, Some(bounds))
}

fn grow(grid: &mut Grid, bounds: Option<Rect>) -> usize {
    let walls: HashSet<Point> = grid
        .iter()
        .filter(|&(_, t)| t == Tile::Floor)
        .flat_map(|(p, _)| p.neighbors_8())
        .filter(|&q| grid.at(q) == Tile::Wall)
        .filter(|&q| bounds.is_none_or(|b| b.contains(q)))
        .collect();

    let grown: Vec<Point> = walls
        .into_iter()
        .filter(|&w| {
            w.neighbors_8()
                .into_iter()
                .filter(|&q| grid.at(q) == Tile::Floor)
                .count()
                > GROWTH_THRESHOLD
        })
        .collect();

    for &p in &grown {
        grid.set(p, Tile::Floor);
    }
    log::trace!("grew {} floor cells", grown.len());
    grown.len()
}
