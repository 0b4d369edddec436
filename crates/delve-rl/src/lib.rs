//! Roguelike map generation and visibility for delve.
//!
//! Generators carve a [`Grid`](delve_core::Grid) in place within a bounds
//! [`Rect`](delve_core::Rect):
//!
//! - [`Maze`]: a perfect maze, by depth-first search or randomized Prim.
//! - [`Cave`]: a maze eroded by dead-end removal and grown by cellular
//!   automata into organic caves.
//! - [`Dungeon`]: rooms joined by corridors through doors and arches.
//!
//! [`field_of_view`] computes the tiles visible from a point.

pub mod cave;
pub mod cc;
pub mod dungeon;
pub mod error;
pub mod fov;
pub mod generator;
pub mod maze;
pub mod terrain;

pub use cave::Cave;
pub use dungeon::{Dungeon, Layout};
pub use error::{GenError, Result};
pub use fov::{Fov, field_of_view};
pub use generator::Generator;
pub use maze::{Maze, MazeAlgo};
pub use terrain::{grow_map, remove_dead_ends};
