//! The [`Tile`] type — the fixed terrain vocabulary of a map.

use std::fmt;

/// A map tile.
///
/// Each variant carries two fixed properties: whether it blocks light
/// ([`opaque`](Self::opaque)) and whether it can be walked through
/// ([`passable`](Self::passable)).
///
/// | Tile  | opaque | passable |
/// |-------|--------|----------|
/// | Wall  | yes    | no       |
/// | Floor | no     | yes      |
/// | Door  | yes    | yes      |
/// | Arch  | no     | yes      |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Solid rock. Also what a [`Grid`](crate::Grid) reports for cells that
    /// were never written.
    #[default]
    Wall,
    Floor,
    Door,
    Arch,
}

impl Tile {
    /// All tiles, in declaration order.
    pub const ALL: [Tile; 4] = [Tile::Wall, Tile::Floor, Tile::Door, Tile::Arch];

    /// Whether the tile blocks light.
    #[inline]
    pub const fn opaque(self) -> bool {
        matches!(self, Tile::Wall | Tile::Door)
    }

    /// Whether the tile can be walked through.
    #[inline]
    pub const fn passable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// Whether the tile is one of the passage kinds placed between regions.
    #[inline]
    pub const fn is_passage(self) -> bool {
        matches!(self, Tile::Door | Tile::Arch)
    }

    /// Glyph used for text dumps of a map.
    pub const fn symbol(self) -> char {
        match self {
            Tile::Wall => '▒',
            Tile::Floor => '.',
            Tile::Door => 'Ṩ',
            Tile::Arch => 'ṧ',
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
