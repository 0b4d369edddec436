//! Geometry primitives: [`Point`] and [`Rect`], plus discrete line tracing.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Unit step towards smaller Y.
    pub const NORTH: Self = Self { x: 0, y: -1 };
    /// Unit step towards larger Y.
    pub const SOUTH: Self = Self { x: 0, y: 1 };
    /// Unit step towards smaller X.
    pub const WEST: Self = Self { x: -1, y: 0 };
    /// Unit step towards larger X.
    pub const EAST: Self = Self { x: 1, y: 0 };

    /// The four cardinal unit steps, in the order north, south, west, east.
    ///
    /// Generators shuffle a copy of this array, so its order is part of
    /// their reproducibility under a seeded random source.
    pub const CARDINALS: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::WEST, Self::EAST];

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the point is inside the half-open rectangle.
    #[inline]
    pub fn in_rect(self, r: &Rect) -> bool {
        r.contains(self)
    }

    /// The four orthogonal neighbours (north, south, west, east).
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            self + Self::NORTH,
            self + Self::SOUTH,
            self + Self::WEST,
            self + Self::EAST,
        ]
    }

    /// All eight neighbours: the orthogonal ones first, then the diagonals.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        [
            self + Self::NORTH,
            self + Self::SOUTH,
            self + Self::WEST,
            self + Self::EAST,
            self.shift(-1, -1),
            self.shift(1, -1),
            self.shift(-1, 1),
            self.shift(1, 1),
        ]
    }

    /// Squared Euclidean length, widened so large offsets cannot overflow.
    #[inline]
    pub fn length_sq(self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }

    /// All points of the discrete line from `self` to `q`, both inclusive.
    ///
    /// See [`line_into`](Self::line_into).
    pub fn line_to(self, q: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        self.line_into(q, &mut buf);
        buf
    }

    /// Bresenham line from `self` to `q`, written into `buf` (which is
    /// cleared first).
    ///
    /// The axis with the larger delta drives the trace, so consecutive
    /// points differ by at most one on each axis and the driving coordinate
    /// changes monotonically. Endpoints are normalised before tracing, so
    /// `q.line_to(p)` is exactly `p.line_to(q)` reversed.
    pub fn line_into(self, q: Point, buf: &mut Vec<Point>) {
        buf.clear();
        let (mut x1, mut y1, mut x2, mut y2) = (self.x, self.y, q.x, q.y);

        let steep = (y2 - y1).abs() > (x2 - x1).abs();
        if steep {
            std::mem::swap(&mut x1, &mut y1);
            std::mem::swap(&mut x2, &mut y2);
        }

        let reversed = x1 > x2;
        if reversed {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }

        let dx = x2 - x1;
        let dy = (y2 - y1).abs();
        let ystep = if y1 >= y2 { -1 } else { 1 };
        let mut error = dx / 2;

        let mut y = y1;
        buf.reserve((dx + 1) as usize);
        for x in x1..=x2 {
            if steep {
                buf.push(Point::new(y, x));
            } else {
                buf.push(Point::new(x, y));
            }
            error -= dy;
            if error < 0 {
                y += ystep;
                error += dx;
            }
        }

        if reversed {
            buf.reverse();
        }
    }
}

// --- trait impls for Point ---

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Create a new rectangle from two corners, canonicalised so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Size as a `Point` (width = max.x - min.x, height = max.y - min.y).
    #[inline]
    pub fn size(self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open rectangle.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Reports whether every point of `self` is also a point of `outer`.
    #[inline]
    pub fn within(self, outer: Rect) -> bool {
        self.min.x >= outer.min.x
            && self.max.x <= outer.max.x
            && self.min.y >= outer.min.y
            && self.max.y <= outer.max.y
    }

    /// Intersection of two rectangles; the zero rectangle if they do not
    /// overlap.
    #[inline]
    pub fn intersect(self, other: Rect) -> Self {
        let r = Self {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Row-major iterator over every point in the rectangle.
    #[inline]
    pub fn iter(self) -> RectIter {
        RectIter {
            rect: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Rect {
    type Item = Point;
    type IntoIter = RectIter;
    #[inline]
    fn into_iter(self) -> RectIter {
        self.iter()
    }
}

impl Add<Point> for Rect {
    type Output = Rect;

    #[inline]
    fn add(self, p: Point) -> Rect {
        Rect {
            min: self.min + p,
            max: self.max + p,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RectIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points in a [`Rect`].
#[derive(Clone, Debug)]
pub struct RectIter {
    rect: Rect,
    cur: Point,
}

impl Iterator for RectIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.y >= self.rect.max.y || self.rect.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.rect.max.x {
            self.cur.x = self.rect.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.rect.is_empty() || self.cur.y >= self.rect.max.y {
            return (0, Some(0));
        }
        let w = self.rect.width() as usize;
        let remaining_in_row = (self.rect.max.x - self.cur.x) as usize;
        let remaining_rows = (self.rect.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RectIter {}
