//! Perfect-maze carving on the odd lattice.
//!
//! Corridor centres sit at odd offsets from the bounds origin; the cells at
//! even offsets are the walls between them. Both carvers produce a spanning
//! tree over the lattice cells they can reach:
//!
//! - **Depth-first search** ([`MazeAlgo::Dfs`]) gives long, winding
//!   corridors.
//! - **Randomized Prim** ([`MazeAlgo::Prim`]) gives short, bushy branches.

use delve_core::{Grid, Point, Rect, Tile};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{GenError, Result, check_bounds};
use crate::generator::Generator;

/// How many random odd points are tried before giving up on a maze start.
pub const START_ATTEMPTS: usize = 1000;

/// Maze carving algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeAlgo {
    /// Randomized depth-first search.
    #[default]
    Dfs,
    /// Randomized Prim's algorithm.
    Prim,
}

impl MazeAlgo {
    /// Carve a maze into `grid` from a random odd-lattice wall cell.
    ///
    /// Returns the number of cells turned to floor.
    pub fn carve<R: Rng>(self, grid: &mut Grid, bounds: Rect, rng: &mut R) -> Result<usize> {
        check_bounds(bounds)?;
        let start = maze_start(grid, bounds, rng)?;
        Ok(self.carve_from(grid, bounds, start, rng))
    }

    /// Carve a maze into `grid` growing from `start`, which is turned to
    /// floor first.
    ///
    /// Returns the number of cells turned to floor.
    pub fn carve_from<R: Rng>(
        self,
        grid: &mut Grid,
        bounds: Rect,
        start: Point,
        rng: &mut R,
    ) -> usize {
        let carved = match self {
            MazeAlgo::Dfs => carve_dfs(grid, bounds, start, rng),
            MazeAlgo::Prim => carve_prim(grid, bounds, start, rng),
        };
        log::trace!("{self:?} maze from {start} carved {carved} cells");
        carved
    }
}

/// A plain maze generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    pub algo: MazeAlgo,
}

impl Maze {
    pub fn new(algo: MazeAlgo) -> Self {
        Self { algo }
    }
}

impl Generator for Maze {
    fn generate<R: Rng>(&self, grid: &mut Grid, bounds: Rect, rng: &mut R) -> Result<()> {
        let carved = self.algo.carve(grid, bounds, rng)?;
        log::debug!("maze ({:?}) in {bounds}: {carved} cells carved", self.algo);
        Ok(())
    }
}

/// A random point of `bounds` with odd offsets from `bounds.min`.
///
/// Draws the x offset, then the y offset.
///
/// # Panics
///
/// Panics if `bounds` is less than 2 cells wide or tall, as there is no odd
/// offset to draw. Generators check bounds with
/// [`GenError::DegenerateBounds`] before calling this.
pub fn odd_point<R: Rng>(bounds: Rect, rng: &mut R) -> Point {
    let x = rng.random_range(0..bounds.width() / 2);
    let y = rng.random_range(0..bounds.height() / 2);
    bounds.min + Point::new(x * 2 + 1, y * 2 + 1)
}

/// Find a random odd-lattice cell of `bounds` that is still wall.
pub fn maze_start<R: Rng>(grid: &Grid, bounds: Rect, rng: &mut R) -> Result<Point> {
    check_bounds(bounds)?;
    for _ in 0..START_ATTEMPTS {
        let p = odd_point(bounds, rng);
        if grid.at(p) == Tile::Wall {
            return Ok(p);
        }
    }
    Err(GenError::NoMazeStart {
        bounds,
        attempts: START_ATTEMPTS,
    })
}

/// Iterate the odd-lattice cells of `bounds`, row-major.
pub fn odd_lattice(bounds: Rect) -> impl Iterator<Item = Point> {
    (bounds.min.y + 1..bounds.max.y).step_by(2).flat_map(move |y| {
        (bounds.min.x + 1..bounds.max.x)
            .step_by(2)
            .map(move |x| Point::new(x, y))
    })
}

fn shuffled_dirs<R: Rng>(rng: &mut R) -> [Point; 4] {
    let mut dirs = Point::CARDINALS;
    dirs.shuffle(rng);
    dirs
}

/// Turn `p` to floor, reporting whether it was wall.
fn dig(grid: &mut Grid, p: Point) -> bool {
    if grid.at(p) == Tile::Wall {
        grid.set(p, Tile::Floor);
        true
    } else {
        false
    }
}

/// One level of the depth-first walk: a cell and the directions it has yet
/// to try.
struct Frame {
    cell: Point,
    dirs: [Point; 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng>(cell: Point, rng: &mut R) -> Self {
        Self {
            cell,
            dirs: shuffled_dirs(rng),
            next: 0,
        }
    }
}

fn carve_dfs<R: Rng>(grid: &mut Grid, bounds: Rect, start: Point, rng: &mut R) -> usize {
    let mut carved = usize::from(dig(grid, start));
    let mut stack = vec![Frame::new(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.dirs.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let q = cell + dir * 2;
        if bounds.contains(q) && grid.at(q) == Tile::Wall {
            carved += usize::from(dig(grid, cell + dir));
            carved += usize::from(dig(grid, q));
            stack.push(Frame::new(q, rng));
        }
    }
    carved
}

fn carve_prim<R: Rng>(grid: &mut Grid, bounds: Rect, start: Point, rng: &mut R) -> usize {
    let mut carved = 0;
    let mut frontier = vec![start];

    while !frontier.is_empty() {
        let i = rng.random_range(0..frontier.len());
        let cell = frontier.swap_remove(i);
        if grid.at(cell) != Tile::Wall {
            continue;
        }
        grid.set(cell, Tile::Floor);
        carved += 1;

        let dirs = shuffled_dirs(rng);
        // Attach to the tree through the first floor cell found.
        for dir in dirs {
            let q = cell + dir * 2;
            if bounds.contains(q) && grid.at(q) == Tile::Floor {
                carved += usize::from(dig(grid, cell + dir));
                break;
            }
        }
        for dir in dirs {
            let q = cell + dir * 2;
            if bounds.contains(q) && grid.at(q) == Tile::Wall {
                frontier.push(q);
            }
        }
    }
    carved
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Assert that the floor cells of `grid` form a tree inside `bounds`.
    pub(crate) fn assert_tree(grid: &Grid, bounds: Rect) {
        let floors = grid.points_of(Tile::Floor);
        assert!(!floors.is_empty(), "maze carved nothing");
        assert_eq!(floors.len(), grid.len(), "maze placed non-floor tiles");
        for &p in &floors {
            assert!(bounds.contains(p), "floor {p} outside {bounds}");
        }

        let edges: usize = floors
            .iter()
            .map(|&p| {
                [p + Point::EAST, p + Point::SOUTH]
                    .into_iter()
                    .filter(|&q| grid.at(q) == Tile::Floor)
                    .count()
            })
            .sum();
        assert_eq!(edges, floors.len() - 1, "floor graph is not a tree");

        let reached = cc::reachable(grid, bounds, floors[0], |_, t| t == Tile::Floor);
        assert_eq!(reached.len(), floors.len(), "floor graph is not connected");
    }

    #[test]
    fn odd_point_is_on_the_lattice() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Rect::new(-4, 10, 9, 17);
        for _ in 0..200 {
            let p = odd_point(bounds, &mut rng);
            assert!(bounds.contains(p));
            assert_eq!((p.x - bounds.min.x) % 2, 1);
            assert_eq!((p.y - bounds.min.y) % 2, 1);
        }
    }

    #[test]
    fn odd_lattice_cells() {
        let cells: Vec<_> = odd_lattice(Rect::new(0, 0, 5, 4)).collect();
        assert_eq!(
            cells,
            vec![
                Point::new(1, 1),
                Point::new(3, 1),
                Point::new(1, 3),
                Point::new(3, 3)
            ]
        );
        assert_eq!(odd_lattice(Rect::new(0, 0, 21, 21)).count(), 100);
    }

    #[test]
    fn dfs_and_prim_carve_trees() {
        let cases = [
            Rect::new(0, 0, 5, 5),
            Rect::new(0, 0, 21, 21),
            Rect::new(0, 0, 12, 9),
            Rect::new(-7, 3, 16, 20),
            Rect::new(0, 0, 40, 6),
        ];
        for algo in [MazeAlgo::Dfs, MazeAlgo::Prim] {
            for (seed, bounds) in cases.into_iter().enumerate() {
                let mut rng = StdRng::seed_from_u64(seed as u64);
                let mut grid = Grid::new();
                Maze::new(algo).generate(&mut grid, bounds, &mut rng).unwrap();
                assert_tree(&grid, bounds);
            }
        }
    }

    #[test]
    fn dfs_spans_the_whole_lattice() {
        let bounds = Rect::new(0, 0, 21, 21);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut grid = Grid::new();
        let carved = MazeAlgo::Dfs.carve(&mut grid, bounds, &mut rng).unwrap();
        // 10 x 10 lattice cells plus the 99 corridor cells joining them.
        assert_eq!(grid.count(Tile::Floor), 199);
        assert_eq!(carved, 199);
        assert!(odd_lattice(bounds).all(|p| grid.at(p) == Tile::Floor));
    }

    #[test]
    fn prim_spans_the_whole_lattice() {
        let bounds = Rect::new(0, 0, 21, 21);
        let mut rng = StdRng::seed_from_u64(99);
        let mut grid = Grid::new();
        let carved = MazeAlgo::Prim.carve(&mut grid, bounds, &mut rng).unwrap();
        assert_eq!(grid.count(Tile::Floor), 199);
        assert_eq!(carved, 199);
    }

    #[test]
    fn same_seed_same_maze() {
        let bounds = Rect::new(0, 0, 31, 17);
        for algo in [MazeAlgo::Dfs, MazeAlgo::Prim] {
            let mut a = Grid::new();
            let mut b = Grid::new();
            algo.carve(&mut a, bounds, &mut StdRng::seed_from_u64(5)).unwrap();
            algo.carve(&mut b, bounds, &mut StdRng::seed_from_u64(5)).unwrap();
            assert_eq!(a, b, "{algo:?} is not reproducible");
        }
    }

    #[test]
    fn smallest_bounds_carve_one_cell() {
        let bounds = Rect::new(0, 0, 3, 3);
        let mut grid = Grid::new();
        MazeAlgo::Dfs
            .carve(&mut grid, bounds, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(grid.points_of(Tile::Floor), vec![Point::new(1, 1)]);
    }

    #[test]
    fn degenerate_bounds_are_an_error() {
        let mut grid = Grid::new();
        let mut rng = StdRng::seed_from_u64(0);
        let err = Maze::default()
            .generate(&mut grid, Rect::new(0, 0, 2, 8), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenError::DegenerateBounds { .. }));
        assert!(grid.is_empty());
    }

    #[test]
    fn full_bounds_have_no_start() {
        let bounds = Rect::new(0, 0, 9, 9);
        let mut grid = Grid::new();
        grid.fill(bounds, Tile::Floor);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            maze_start(&grid, bounds, &mut rng),
            Err(GenError::NoMazeStart {
                bounds,
                attempts: START_ATTEMPTS
            })
        );
    }

    #[test]
    fn carving_stays_inside_bounds_and_keeps_existing_floor() {
        let bounds = Rect::new(10, 10, 25, 25);
        let mut grid = Grid::new();
        let outside = Point::new(0, 0);
        grid.set(outside, Tile::Arch);
        MazeAlgo::Prim
            .carve(&mut grid, bounds, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(grid.at(outside), Tile::Arch);
        assert!(grid.iter().all(|(p, _)| p == outside || bounds.contains(p)));
    }
}
