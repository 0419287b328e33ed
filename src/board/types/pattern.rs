//! Geometric threat patterns.
//!
//! A pattern is a pure movement rule: it says which squares a piece standing
//! on some origin threatens. Pieces never block each other, so a pattern only
//! depends on the two coordinates and the board size.

use super::Coord;

/// Maximum number of steps a sliding pattern may travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reach {
    Unbounded,
    Limited(usize),
}

impl Reach {
    #[inline]
    #[must_use]
    pub const fn allows(self, distance: usize) -> bool {
        match self {
            Reach::Unbounded => true,
            Reach::Limited(max) => distance <= max,
        }
    }

    /// Number of steps worth walking on a board of side `size`.
    #[inline]
    const fn steps_on(self, size: usize) -> usize {
        match self {
            Reach::Unbounded => size,
            Reach::Limited(max) if max < size => max,
            Reach::Limited(_) => size,
        }
    }
}

/// A movement rule describing the squares a piece threatens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThreatPattern {
    /// Along the row and the column.
    Straight(Reach),
    /// Along both diagonals.
    Diagonal(Reach),
    /// The knight's L-shaped jump.
    Knight,
}

// Forward directions come first in each table; see `forward_threatened_squares`.
const STRAIGHT_RAYS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL_RAYS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

impl ThreatPattern {
    /// Does a piece on `origin` threaten `target` under this pattern?
    ///
    /// A piece never threatens its own square.
    #[must_use]
    pub fn threatens(self, origin: Coord, target: Coord) -> bool {
        if origin == target {
            return false;
        }
        let dx = origin.x.abs_diff(target.x);
        let dy = origin.y.abs_diff(target.y);

        match self {
            ThreatPattern::Straight(reach) => (dx == 0 || dy == 0) && reach.allows(dx.max(dy)),
            // dx == 0 is excluded by the equality check: with dy == 0 it is
            // the origin, otherwise dx != dy.
            ThreatPattern::Diagonal(reach) => dx == dy && reach.allows(dx),
            ThreatPattern::Knight => (dx == 1 && dy == 2) || (dx == 2 && dy == 1),
        }
    }

    /// Every on-board square this pattern threatens from `origin`.
    #[must_use]
    pub fn threatened_squares(self, origin: Coord, size: usize) -> ThreatSquares {
        let (rays, steps) = self.rays(size);
        ThreatSquares::new(origin, size, rays, steps)
    }

    /// The threatened squares lying strictly after `origin` in scan order.
    ///
    /// These are the forward rays (same row to the right, and every ray that
    /// moves down a row) plus the four forward knight jumps.
    #[must_use]
    pub fn forward_threatened_squares(self, origin: Coord, size: usize) -> ThreatSquares {
        let (rays, steps) = self.rays(size);
        ThreatSquares::new(origin, size, &rays[..rays.len() / 2], steps)
    }

    fn rays(self, size: usize) -> (&'static [(isize, isize)], usize) {
        match self {
            ThreatPattern::Straight(reach) => (&STRAIGHT_RAYS[..], reach.steps_on(size)),
            ThreatPattern::Diagonal(reach) => (&DIAGONAL_RAYS[..], reach.steps_on(size)),
            ThreatPattern::Knight => (&KNIGHT_JUMPS[..], 1),
        }
    }
}

/// Lazy, single-pass walk over the squares reached by a set of rays.
#[derive(Clone, Debug)]
pub struct ThreatSquares {
    origin: Coord,
    size: usize,
    rays: &'static [(isize, isize)],
    max_steps: usize,
    ray: usize,
    step: usize,
}

impl ThreatSquares {
    fn new(origin: Coord, size: usize, rays: &'static [(isize, isize)], max_steps: usize) -> Self {
        ThreatSquares {
            origin,
            size,
            rays,
            max_steps,
            ray: 0,
            step: 0,
        }
    }
}

impl Iterator for ThreatSquares {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        while let Some(&(dx, dy)) = self.rays.get(self.ray) {
            self.step += 1;
            if self.step <= self.max_steps {
                let k = self.step as isize;
                if let Some(next) = self.origin.offset(dx * k, dy * k, self.size) {
                    return Some(next);
                }
            }
            self.ray += 1;
            self.step = 0;
        }
        None
    }
}
