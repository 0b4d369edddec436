//! A sparse tile grid for map representation.
//!
//! [`Grid`] maps [`Point`]s to [`Tile`]s. Only non-wall tiles are stored:
//! a point that was never written, or that was written back to
//! [`Tile::Wall`], reads as solid rock. Every generator relies on that
//! default, so the map has no intrinsic size and may be carved anywhere.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::{Point, Rect, Tile};

/// A sparse mapping from [`Point`] to [`Tile`] with an implicit Wall
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(Point, Tile)>", into = "Vec<(Point, Tile)>")
)]
pub struct Grid {
    tiles: HashMap<Point, Tile>,
}

impl Grid {
    /// Create an empty grid: every point reads as [`Tile::Wall`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tile at a point. Points that were never written are walls.
    #[inline]
    pub fn at(&self, p: Point) -> Tile {
        self.tiles.get(&p).copied().unwrap_or(Tile::Wall)
    }

    /// Set the tile at a point. Writing [`Tile::Wall`] reverts the point to
    /// its default state.
    #[inline]
    pub fn set(&mut self, p: Point, tile: Tile) {
        if tile == Tile::Wall {
            self.tiles.remove(&p);
        } else {
            self.tiles.insert(p, tile);
        }
    }

    /// Whether the tile at `p` is passable.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.at(p).passable()
    }

    /// Whether the tile at `p` blocks light.
    #[inline]
    pub fn opaque(&self, p: Point) -> bool {
        self.at(p).opaque()
    }

    /// Set every point of `r` to `tile`.
    pub fn fill(&mut self, r: Rect, tile: Tile) {
        for p in r.iter() {
            self.set(p, tile);
        }
    }

    /// Number of non-wall cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid is all rock.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Reset every cell to rock.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Count the non-wall cells equal to `tile`. Walls are not stored, so
    /// counting [`Tile::Wall`] yields 0; use [`count_in`](Self::count_in)
    /// for a bounded count.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.values().filter(|&&t| t == tile).count()
    }

    /// Count how many points of `r` hold `tile`, walls included.
    pub fn count_in(&self, r: Rect, tile: Tile) -> usize {
        r.iter().filter(|&p| self.at(p) == tile).count()
    }

    /// Iterate over the non-wall `(Point, Tile)` pairs, in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.tiles.iter().map(|(&p, &t)| (p, t))
    }

    /// Points currently holding `tile` (non-wall tiles only), sorted
    /// row-major so callers get a stable order.
    pub fn points_of(&self, tile: Tile) -> Vec<Point> {
        let mut pts: Vec<Point> = self
            .tiles
            .iter()
            .filter(|&(_, &t)| t == tile)
            .map(|(&p, _)| p)
            .collect();
        pts.sort();
        pts
    }

    /// Render the rectangle `r` as text, one line per row, using
    /// [`Tile::symbol`].
    pub fn render(&self, r: Rect) -> String {
        self.render_with(r, |_, t| t.symbol())
    }

    /// Render the rectangle `r` as text, choosing each glyph with `f`.
    pub fn render_with(&self, r: Rect, mut f: impl FnMut(Point, Tile) -> char) -> String {
        let mut out = String::with_capacity(r.len() * 2 + r.height().max(0) as usize);
        for y in r.min.y..r.max.y {
            if y > r.min.y {
                out.push('\n');
            }
            for x in r.min.x..r.max.x {
                let p = Point::new(x, y);
                let _ = write!(out, "{}", f(p, self.at(p)));
            }
        }
        out
    }
}

impl FromIterator<(Point, Tile)> for Grid {
    fn from_iter<I: IntoIterator<Item = (Point, Tile)>>(iter: I) -> Self {
        let mut g = Grid::new();
        for (p, t) in iter {
            g.set(p, t);
        }
        g
    }
}

impl From<Vec<(Point, Tile)>> for Grid {
    fn from(v: Vec<(Point, Tile)>) -> Self {
        v.into_iter().collect()
    }
}

impl From<Grid> for Vec<(Point, Tile)> {
    fn from(g: Grid) -> Self {
        let mut v: Vec<(Point, Tile)> = g.tiles.into_iter().collect();
        v.sort_by_key(|&(p, _)| p);
        v
    }
}
