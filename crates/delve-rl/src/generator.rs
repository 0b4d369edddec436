//! The [`Generator`] capability shared by all map generators.

use delve_core::{Grid, Rect};
use rand::Rng;

use crate::Result;

/// Something that carves a tiled structure into a grid within bounds.
///
/// Generators mutate `grid` in place. They may read what is already there
/// (for example, a dungeon never places a room over existing floor), and
/// they draw every random choice from `rng`, so a seeded source reproduces
/// the same map.
pub trait Generator {
    /// Generate into `grid` within `bounds`.
    fn generate<R: Rng>(&self, grid: &mut Grid, bounds: Rect, rng: &mut R) -> Result<()>;
}
