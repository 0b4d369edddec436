//! Dungeons: rectangular rooms joined by maze corridors.
//!
//! Composition runs in five steps:
//!
//! 1. Rooms are placed at random odd points, skipping any that leave the
//!    bounds or overlap existing floor. Each room is its own region.
//! 2. The space between rooms is filled with maze corridors. Each
//!    disconnected corridor network is a region too.
//! 3. Every wall cell with passable cells of two different regions on
//!    opposite sides becomes a connector candidate. Candidates are
//!    shuffled.
//! 4. Connectors are opened as doors or arches until all regions are
//!    joined. A connector between regions that are already joined is
//!    skipped unless a `sparsity` roll lets it through, adding a loop.
//! 5. Dead ends are removed until none remain, trimming corridors that
//!    lead nowhere.

use std::collections::{HashMap, HashSet};

use delve_core::{Grid, Point, Rect, Tile};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::cc;
use crate::error::{GenError, Result, check_bounds};
use crate::generator::Generator;
use crate::maze::{MazeAlgo, odd_lattice, odd_point};
use crate::terrain::remove_all_dead_ends;

/// Smallest room side.
pub const MIN_ROOM_SIZE: i32 = 3;

/// Dungeon generator configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dungeon {
    /// Algorithm for the corridors between rooms.
    pub maze: MazeAlgo,
    /// Largest room width (x) and height (y). Room sides are odd, from
    /// [`MIN_ROOM_SIZE`] up to this size.
    pub max_room_size: Point,
    /// How many room placements are tried. Placements that do not fit are
    /// dropped, so fewer rooms than this may appear.
    pub room_attempts: usize,
    /// Chance, from 0.0 to 1.0, that a connector between already joined
    /// regions is opened anyway. 0.0 joins every region exactly once; 1.0
    /// opens every connector.
    pub sparsity: f64,
}

impl Default for Dungeon {
    fn default() -> Self {
        Self {
            maze: MazeAlgo::Dfs,
            max_room_size: Point::new(9, 9),
            room_attempts: 50,
            sparsity: 0.0,
        }
    }
}

/// What a dungeon composition produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Placed rooms, in placement order. Room `i` had region id `i + 1`.
    pub rooms: Vec<Rect>,
    /// Number of regions (rooms plus corridor networks).
    pub regions: usize,
    /// Connector candidates found.
    pub connectors: usize,
    /// Connectors opened as doors or arches.
    pub opened: usize,
    /// Cells removed by the final dead-end pass.
    pub pruned: usize,
}

/// A wall cell `mid` between passable cells `a` and `b` of different
/// regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Connector {
    mid: Point,
    a: Point,
    b: Point,
}

impl Dungeon {
    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        let max = self.max_room_size;
        if max.x < MIN_ROOM_SIZE || max.y < MIN_ROOM_SIZE {
            return Err(GenError::InvalidConfig(format!(
                "max room size {max} is smaller than {MIN_ROOM_SIZE}x{MIN_ROOM_SIZE}"
            )));
        }
        if !(0.0..=1.0).contains(&self.sparsity) {
            return Err(GenError::InvalidConfig(format!(
                "sparsity {} is outside [0, 1]",
                self.sparsity
            )));
        }
        Ok(())
    }

    /// Compose a dungeon into `grid` and report what was built.
    pub fn compose<R: Rng>(&self, grid: &mut Grid, bounds: Rect, rng: &mut R) -> Result<Layout> {
        self.validate()?;
        check_bounds(bounds)?;

        // Region ids live only for this call. Unlabelled cells are region 0.
        let mut regions: HashMap<Point, usize> = HashMap::new();

        let mut rooms = Vec::new();
        for _ in 0..self.room_attempts {
            if let Some(room) = place_room(grid, bounds, self.max_room_size, rng) {
                rooms.push(room);
                let id = rooms.len();
                for p in room {
                    regions.insert(p, id);
                }
            }
        }
        log::debug!(
            "placed {} rooms in {} attempts",
            rooms.len(),
            self.room_attempts
        );

        self.fill_corridors(grid, bounds, rng)?;

        // The first corridor network keeps region 0; any others get ids
        // after the rooms.
        let corridors = cc::components(grid, bounds, |p, t| {
            t.passable() && !regions.contains_key(&p)
        });
        for (p, label) in corridors.iter() {
            if label > 0 {
                regions.insert(p, rooms.len() + label);
            }
        }
        let region_count = rooms.len() + corridors.len().max(1);

        let region = |p: Point| regions.get(&p).copied().unwrap_or(0);
        let mut connectors = find_connectors(grid, bounds, region);
        connectors.shuffle(rng);
        let found = connectors.len();

        let mut joined = RegionSets::new(region_count);
        let mut opened = 0;
        while let Some(c) = connectors.pop() {
            let (ra, rb) = (region(c.a), region(c.b));
            let roll: f64 = rng.random();
            if roll > self.sparsity && joined.same(ra, rb) {
                continue;
            }
            let tile = if rng.random_range(0..2) == 0 {
                Tile::Door
            } else {
                Tile::Arch
            };
            open_passage(grid, c.mid, tile);
            joined.union(ra, rb);
            opened += 1;
        }
        log::debug!("opened {opened} of {found} connectors between {region_count} regions");

        let pruned = remove_all_dead_ends(grid);
        log::debug!("pruned {pruned} dead-end cells");

        Ok(Layout {
            rooms,
            regions: region_count,
            connectors: found,
            opened,
            pruned,
        })
    }

    /// Carve corridors: one maze from a random start, then more from every
    /// odd-lattice cell that is still rock (pockets the first maze could
    /// not reach past the rooms).
    fn fill_corridors<R: Rng>(&self, grid: &mut Grid, bounds: Rect, rng: &mut R) -> Result<usize> {
        let mut carved = self.maze.carve(grid, bounds, rng)?;
        let mut pockets = 0;
        for p in odd_lattice(bounds) {
            if grid.at(p) == Tile::Wall {
                carved += self.maze.carve_from(grid, bounds, p, rng);
                pockets += 1;
            }
        }
        log::debug!("carved {carved} corridor cells ({pockets} extra networks)");
        Ok(carved)
    }
}

impl Generator for Dungeon {
    fn generate<R: Rng>(&self, grid: &mut Grid, bounds: Rect, rng: &mut R) -> Result<()> {
        self.compose(grid, bounds, rng).map(|_| ())
    }
}

/// Try to place one room in `bounds`.
///
/// The room is anchored at a random odd point with odd sides from
/// [`MIN_ROOM_SIZE`] to `max_size`. Returns `None`, leaving the grid
/// untouched, if the room would leave `bounds` or cover existing floor.
/// Also returns `None`, without drawing, when `max_size` is below
/// [`MIN_ROOM_SIZE`] on either axis or `bounds` is too small to hold a room.
pub fn place_room<R: Rng>(
    grid: &mut Grid,
    bounds: Rect,
    max_size: Point,
    rng: &mut R,
) -> Option<Rect> {
    if max_size.x < MIN_ROOM_SIZE
        || max_size.y < MIN_ROOM_SIZE
        || bounds.width() < MIN_ROOM_SIZE
        || bounds.height() < MIN_ROOM_SIZE
    {
        return None;
    }
    let p = odd_point(bounds, rng);
    let w = MIN_ROOM_SIZE + rng.random_range(0..=(max_size.x - MIN_ROOM_SIZE) / 2) * 2;
    let h = MIN_ROOM_SIZE + rng.random_range(0..=(max_size.y - MIN_ROOM_SIZE) / 2) * 2;
    let room = Rect::new(p.x, p.y, p.x + w, p.y + h);

    if !room.within(bounds) {
        log::trace!("room {room} leaves bounds");
        return None;
    }
    if room.iter().any(|q| grid.at(q) == Tile::Floor) {
        log::trace!("room {room} overlaps floor");
        return None;
    }
    grid.fill(room, Tile::Floor);
    Some(room)
}

fn find_connectors(grid: &Grid, bounds: Rect, region: impl Fn(Point) -> usize) -> Vec<Connector> {
    let mut conns = Vec::new();
    for mid in bounds.iter() {
        if grid.passable(mid) {
            continue;
        }
        for (a, b) in [
            (mid + Point::WEST, mid + Point::EAST),
            (mid + Point::NORTH, mid + Point::SOUTH),
        ] {
            if grid.passable(a) && grid.passable(b) && region(a) != region(b) {
                conns.push(Connector { mid, a, b });
            }
        }
    }
    conns
}

/// Turn `mid` into `tile` and repaint every door/arch cluster touching it
/// with the same tile, so joined passages stay uniform.
pub(crate) fn open_passage(grid: &mut Grid, mid: Point, tile: Tile) {
    grid.set(mid, tile);
    for q in mid.neighbors_4() {
        if grid.at(q).is_passage() {
            flood_fill(grid, q, tile);
        }
    }
}

/// Replace the orthogonally connected area of cells equal to the tile at
/// `p` with `tile`.
///
/// Wall is never a fill target: unwritten cells read as wall, so a wall
/// area has no edge. Filling from a wall cell does nothing.
pub fn flood_fill(grid: &mut Grid, p: Point, tile: Tile) {
    let target = grid.at(p);
    if target == Tile::Wall {
        return;
    }
    let mut seen = HashSet::new();
    let mut stack = vec![p];
    while let Some(x) = stack.pop() {
        if !seen.insert(x) {
            continue;
        }
        grid.set(x, tile);
        for q in x.neighbors_4() {
            if grid.at(q) == target {
                stack.push(q);
            }
        }
    }
}

/// Disjoint sets of region ids.
struct RegionSets {
    parent: Vec<usize>,
}

impl RegionSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut r: usize) -> usize {
        while self.parent[r] != r {
            self.parent[r] = self.parent[self.parent[r]];
            r = self.parent[r];
        }
        r
    }

    fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn passable_reach(grid: &Grid, bounds: Rect, from: Point) -> HashSet<Point> {
        cc::reachable(grid, bounds, from, |_, t| t.passable())
            .into_iter()
            .collect()
    }

    #[test]
    fn rooms_are_odd_aligned_and_sized() {
        let bounds = Rect::new(0, 0, 40, 40);
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new();
        let mut placed = 0;
        for _ in 0..30 {
            let Some(room) = place_room(&mut grid, bounds, Point::new(6, 6), &mut rng) else {
                continue;
            };
            placed += 1;
            assert!(room.within(bounds));
            assert_eq!(room.min.x % 2, 1);
            assert_eq!(room.min.y % 2, 1);
            assert!([3, 5].contains(&room.width()), "width {}", room.width());
            assert!([3, 5].contains(&room.height()), "height {}", room.height());
            assert!(room.iter().all(|p| grid.at(p) == Tile::Floor));
        }
        assert!(placed > 0);
    }

    #[test]
    fn rooms_never_overlap_floor() {
        let bounds = Rect::new(0, 0, 20, 20);
        let mut grid = Grid::new();
        grid.fill(bounds, Tile::Floor);
        let before = grid.clone();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(place_room(&mut grid, bounds, Point::new(5, 5), &mut rng), None);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn rooms_never_leave_bounds() {
        let bounds = Rect::new(0, 0, 5, 5);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let mut grid = Grid::new();
            if let Some(room) = place_room(&mut grid, bounds, Point::new(9, 9), &mut rng) {
                assert_eq!(room, Rect::new(1, 1, 4, 4));
            }
        }
    }

    #[test]
    fn flood_fill_stops_at_other_tiles() {
        let mut g = Grid::new();
        g.fill(Rect::new(0, 0, 3, 1), Tile::Door);
        g.set(Point::new(3, 0), Tile::Floor);
        g.set(Point::new(4, 0), Tile::Door);
        g.set(Point::new(1, 1), Tile::Arch);

        flood_fill(&mut g, Point::new(0, 0), Tile::Arch);
        assert!((0..3).all(|x| g.at(Point::new(x, 0)) == Tile::Arch));
        assert_eq!(g.at(Point::new(3, 0)), Tile::Floor);
        assert_eq!(g.at(Point::new(4, 0)), Tile::Door, "fill crossed a floor cell");
    }

    #[test]
    fn flood_fill_from_wall_is_a_no_op() {
        let mut g = Grid::new();
        flood_fill(&mut g, Point::new(0, 0), Tile::Floor);
        assert!(g.is_empty());

        g.set(Point::new(1, 0), Tile::Door);
        flood_fill(&mut g, Point::new(0, 0), Tile::Arch);
        assert_eq!(g.at(Point::new(0, 0)), Tile::Wall);
        assert_eq!(g.at(Point::new(1, 0)), Tile::Door);
    }

    #[test]
    fn flood_fill_with_same_tile_terminates() {
        let mut g = Grid::new();
        g.fill(Rect::new(0, 0, 4, 4), Tile::Door);
        let before = g.clone();
        flood_fill(&mut g, Point::new(2, 2), Tile::Door);
        assert_eq!(g, before);
    }

    #[test]
    fn undersized_rooms_are_refused() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut grid = Grid::new();
        let bounds = Rect::new(0, 0, 30, 30);
        for max in [Point::new(1, 5), Point::new(5, -1), Point::new(2, 2)] {
            assert_eq!(place_room(&mut grid, bounds, max, &mut rng), None);
        }
        let sliver = Rect::new(0, 0, 1, 30);
        assert_eq!(place_room(&mut grid, sliver, Point::new(5, 5), &mut rng), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn opening_a_passage_unifies_touching_clusters() {
        // Two uniform clusters of different kinds on either side of `mid`.
        let mut g = Grid::new();
        g.fill(Rect::new(0, 0, 2, 1), Tile::Door);
        g.fill(Rect::new(3, 0, 6, 1), Tile::Arch);
        g.set(Point::new(5, 1), Tile::Arch);
        let mid = Point::new(2, 0);

        open_passage(&mut g, mid, Tile::Door);
        let cluster = cc::reachable(&g, Rect::new(-1, -1, 8, 3), mid, |_, t| t.is_passage());
        assert_eq!(cluster.len(), 7);
        assert!(cluster.iter().all(|&p| g.at(p) == Tile::Door));
    }

    #[test]
    fn invalid_configs() {
        let small = Dungeon {
            max_room_size: Point::new(2, 9),
            ..Dungeon::default()
        };
        assert!(matches!(small.validate(), Err(GenError::InvalidConfig(_))));
        for sparsity in [-0.1, 1.5, f64::NAN] {
            let d = Dungeon {
                sparsity,
                ..Dungeon::default()
            };
            assert!(d.validate().is_err(), "sparsity {sparsity} accepted");
        }
        assert!(Dungeon::default().validate().is_ok());

        let mut grid = Grid::new();
        let err = small
            .generate(&mut grid, Rect::new(0, 0, 30, 30), &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));
        assert!(grid.is_empty());
    }

    #[test]
    fn zero_sparsity_spans_regions_exactly_once() {
        let d = Dungeon {
            maze: MazeAlgo::Dfs,
            max_room_size: Point::new(7, 7),
            room_attempts: 30,
            sparsity: 0.0,
        };
        let bounds = Rect::new(0, 0, 51, 41);
        for seed in 0..5 {
            let mut grid = Grid::new();
            let layout = d
                .compose(&mut grid, bounds, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(!layout.rooms.is_empty());
            assert_eq!(layout.opened, layout.regions - 1, "seed {seed}");
            assert!(layout.opened < layout.connectors, "seed {seed}");
        }
    }

    #[test]
    fn full_sparsity_opens_every_connector() {
        let d = Dungeon {
            maze: MazeAlgo::Prim,
            max_room_size: Point::new(7, 7),
            room_attempts: 30,
            sparsity: 1.0,
        };
        let bounds = Rect::new(0, 0, 51, 41);
        let mut grid = Grid::new();
        let layout = d
            .compose(&mut grid, bounds, &mut StdRng::seed_from_u64(12))
            .unwrap();
        assert_eq!(layout.opened, layout.connectors);

        let first = layout.rooms[0].min;
        let reach = passable_reach(&grid, bounds, first);
        for room in &layout.rooms {
            assert!(reach.contains(&room.min), "room {room} is cut off");
        }
    }

    #[test]
    fn passages_only_on_former_walls_between_open_cells() {
        let bounds = Rect::new(0, 0, 41, 31);
        let mut grid = Grid::new();
        Dungeon::default()
            .generate(&mut grid, bounds, &mut StdRng::seed_from_u64(21))
            .unwrap();
        for (p, t) in grid.iter() {
            assert!(bounds.contains(p));
            if t.is_passage() {
                let open = p.neighbors_4().into_iter().filter(|&q| grid.passable(q)).count();
                assert!(open >= 2, "passage {p} leads nowhere");
            }
        }
        assert_eq!(crate::remove_dead_ends(&mut grid), 0);
    }

    #[test]
    fn reproducible() {
        let bounds = Rect::new(0, 0, 45, 35);
        let d = Dungeon {
            sparsity: 0.3,
            ..Dungeon::default()
        };
        let mut a = Grid::new();
        let mut b = Grid::new();
        let la = d.compose(&mut a, bounds, &mut StdRng::seed_from_u64(4)).unwrap();
        let lb = d.compose(&mut b, bounds, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(la, lb);
        assert_eq!(a, b);
    }

    #[test]
    fn region_sets_join() {
        let mut s = RegionSets::new(5);
        assert!(!s.same(0, 4));
        s.union(0, 4);
        s.union(4, 2);
        assert!(s.same(0, 2));
        assert!(!s.same(1, 3));
    }
}
