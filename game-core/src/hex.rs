//! Axial-coordinate hex grid geometry.

use serde::{Deserialize, Serialize};

/// A single hex tile addressed in axial coordinates `(q, r)`.
///
/// The implicit third cube coordinate is `s = -q - r`, used only inside
/// [`HexCoord::distance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        HexCoord { q, r }
    }

    /// The implicit cube coordinate `s = -q - r`.
    fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance, symmetric by construction.
    pub fn distance(self, other: HexCoord) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        dq.max(dr).max(ds)
    }

    /// True iff the two tiles are exactly one step apart.
    pub fn is_adjacent(self, other: HexCoord) -> bool {
        self.distance(other) == 1
    }

    /// The six neighboring coordinates, in no particular winding order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];
        DIRECTIONS.map(|(dq, dr)| HexCoord::new(self.q + dq, self.r + dr))
    }
}
