//! Organic caves grown from a maze.
//!
//! A maze is carved, its dead ends are pruned for a few rounds to shorten
//! the branches, cellular automata widen what is left into chambers, and a
//! final pruning pass smooths the remaining stubs.

use delve_core::{Grid, Rect};
use rand::Rng;

use crate::Result;
use crate::error::check_bounds;
use crate::generator::Generator;
use crate::maze::MazeAlgo;
use crate::terrain::{grow_map_in, remove_dead_ends};

/// Cave generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cave {
    /// Algorithm for the underlying maze.
    pub maze: MazeAlgo,
    /// Dead-end removal rounds before growth.
    pub prune_before: usize,
    /// Cellular-automaton growth rounds.
    pub grow_rounds: usize,
    /// Dead-end removal rounds after growth.
    pub prune_after: usize,
}

impl Default for Cave {
    fn default() -> Self {
        Self {
            maze: MazeAlgo::Prim,
            prune_before: 7,
            grow_rounds: 3,
            prune_after: 3,
        }
    }
}

impl Generator for Cave {
    fn generate<R: Rng>(&self, grid: &mut Grid, bounds: Rect, rng: &mut R) -> Result<()> {
        check_bounds(bounds)?;
        let carved = self.maze.carve(grid, bounds, rng)?;

        let mut pruned = 0;
        for _ in 0..self.prune_before {
            pruned += remove_dead_ends(grid);
        }
        let mut grown = 0;
        for _ in 0..self.grow_rounds {
            // Clipped so cave floor stays inside the caller's bounds.
            grown += grow_map_in(grid, bounds);
        }
        for _ in 0..self.prune_after {
            pruned += remove_dead_ends(grid);
        }

        log::debug!("cave in {bounds}: carved {carved}, pruned {pruned}, grew {grown}");
        Ok(())
    }
}
