//! Connected-component labelling over orthogonally adjacent cells.
//!
//! Two cells are connected when a path of orthogonal steps joins them and
//! every cell on the path satisfies the caller's predicate. Searches are
//! confined to a bounds rectangle, so a predicate that accepts walls cannot
//! run away across the unbounded grid.

use std::collections::HashMap;

use delve_core::{Grid, Point, Rect, Tile};

/// Component labels computed by [`components`].
#[derive(Debug, Clone, Default)]
pub struct Components {
    labels: HashMap<Point, usize>,
    count: usize,
}

impl Components {
    /// The component label of `p`, or `None` if `p` was not accepted by the
    /// predicate (or lies outside the bounds).
    pub fn label(&self, p: Point) -> Option<usize> {
        self.labels.get(&p).copied()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no cell was accepted.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate over every labelled `(Point, label)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (Point, usize)> + '_ {
        self.labels.iter().map(|(&p, &l)| (p, l))
    }
}

/// Label every cell of `bounds` accepted by `keep` with a component id.
///
/// Ids are assigned from 0 in row-major order of each component's first
/// cell.
pub fn components(grid: &Grid, bounds: Rect, keep: impl Fn(Point, Tile) -> bool) -> Components {
    let mut labels = HashMap::new();
    let mut label = 0;
    let mut stack = Vec::new();

    for start in bounds.iter() {
        if labels.contains_key(&start) || !keep(start, grid.at(start)) {
            continue;
        }

        // Iterative DFS from `start`.
        labels.insert(start, label);
        stack.push(start);
        while let Some(p) = stack.pop() {
            for q in p.neighbors_4() {
                if bounds.contains(q) && !labels.contains_key(&q) && keep(q, grid.at(q)) {
                    labels.insert(q, label);
                    stack.push(q);
                }
            }
        }

        label += 1;
    }

    Components {
        labels,
        count: label,
    }
}

/// Flood from `start` and return every connected cell accepted by `keep`,
/// `start` first. Returns an empty list if `start` itself is rejected.
pub fn reachable(
    grid: &Grid,
    bounds: Rect,
    start: Point,
    keep: impl Fn(Point, Tile) -> bool,
) -> Vec<Point> {
    let mut result = Vec::new();
    if !bounds.contains(start) || !keep(start, grid.at(start)) {
        return result;
    }

    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![start];
    seen.insert(start);
    result.push(start);

    while let Some(p) = stack.pop() {
        for q in p.neighbors_4() {
            if bounds.contains(q) && !seen.contains(&q) && keep(q, grid.at(q)) {
                seen.insert(q);
                stack.push(q);
                result.push(q);
            }
        }
    }
    result
}
