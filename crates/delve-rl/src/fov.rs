//! Field of view by ray casting.
//!
//! A ray is traced with [`Point::line_into`] from the origin to every cell
//! strictly inside the circle of the given radius. Each ray marks cells
//! visible in order and stops after the first opaque one, so walls are
//! seen but nothing behind them is.

use std::collections::HashSet;

use delve_core::Point;

/// Reusable field-of-view state.
///
/// Keeps its line buffer and visible set between calls, so repeated
/// computations (one per turn, say) do not reallocate.
#[derive(Debug, Clone, Default)]
pub struct Fov {
    visible: HashSet<Point>,
    line: Vec<Point>,
}

impl Fov {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the cells visible from `origin` within `radius`.
    ///
    /// A cell at offset `(i, j)` is a ray target when `i² + j² < radius²`,
    /// so cells at exactly `radius` are out of range. A radius of 0 (or
    /// less) sees nothing, not even the origin.
    ///
    /// `is_opaque` is only read; it may change freely between calls.
    pub fn vision(
        &mut self,
        origin: Point,
        radius: i32,
        is_opaque: impl Fn(Point) -> bool,
    ) -> &HashSet<Point> {
        self.visible.clear();
        if radius <= 0 {
            return &self.visible;
        }
        let r2 = i64::from(radius) * i64::from(radius);

        for j in -radius..=radius {
            for i in -radius..=radius {
                let offset = Point::new(i, j);
                if offset.length_sq() >= r2 {
                    continue;
                }
                origin.line_into(origin + offset, &mut self.line);
                for &p in &self.line {
                    self.visible.insert(p);
                    if is_opaque(p) {
                        break;
                    }
                }
            }
        }
        log::trace!("fov from {origin} r={radius}: {} visible", self.visible.len());
        &self.visible
    }

    /// Whether `p` was visible in the last computation.
    pub fn visible(&self, p: Point) -> bool {
        self.visible.contains(&p)
    }

    /// The visible set from the last computation.
    pub fn visible_set(&self) -> &HashSet<Point> {
        &self.visible
    }
}

/// One-shot field of view: the set of cells visible from `origin` within
/// `radius`. See [`Fov::vision`].
pub fn field_of_view(
    origin: Point,
    radius: i32,
    is_opaque: impl Fn(Point) -> bool,
) -> HashSet<Point> {
    let mut fov = Fov::new();
    fov.vision(origin, radius, is_opaque);
    fov.visible
}
