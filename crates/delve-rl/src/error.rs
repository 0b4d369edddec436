//! Generation errors.

use delve_core::Rect;
use thiserror::Error;

/// Errors that can occur while generating a map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    /// Bounds are too small for odd-lattice carving (each side needs at
    /// least 3 cells).
    #[error("bounds {bounds} are too small: width and height must be at least 3")]
    DegenerateBounds { bounds: Rect },
    /// No odd-lattice wall cell was found to start a maze from.
    #[error("cannot find a maze starting point in {bounds} after {attempts} attempts")]
    NoMazeStart { bounds: Rect, attempts: usize },
    /// A generator parameter is out of range.
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for generation.
pub type Result<T> = std::result::Result<T, GenError>;

/// Check that `bounds` can hold at least one odd-lattice cell.
pub(crate) fn check_bounds(bounds: Rect) -> Result<()> {
    if bounds.width() < 3 || bounds.height() < 3 {
        return Err(GenError::DegenerateBounds { bounds });
    }
    Ok(())
}
