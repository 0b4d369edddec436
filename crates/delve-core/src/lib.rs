//! **delve-core** — core types for grid-world generation.
//!
//! This crate provides the foundational types used across the *delve*
//! workspace: geometry primitives with line tracing, the fixed [`Tile`]
//! vocabulary, and a sparse [`Grid`] whose unwritten cells read as solid
//! rock.

pub mod geom;
pub mod grid;
pub mod tile;

pub use geom::{Point, Rect, RectIter};
pub use grid::Grid;
pub use tile::Tile;
