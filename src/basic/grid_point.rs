use super::dir::Dir;
use crate::basic::{CellDim, Point};
use std::cmp::Ordering;
use std::fmt::{Debug, Error, Formatter};

#[derive(Eq, PartialEq, Copy, Clone, Add, Hash)]
pub struct GridPoint {
    pub x: isize,
    pub y: isize,
}

/// Board dimensions expressed as a point one past the bottom-right cell
pub type GridDim = GridPoint;

impl GridPoint {
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// Top-left corner of this cell in screen coordinates
    pub fn to_cartesian(self, cell_dim: CellDim) -> Point {
        Point {
            x: self.x as f32 * cell_dim.side,
            y: self.y as f32 * cell_dim.side,
        }
    }

    #[must_use]
    pub fn translate(self, dir: Dir, dist: usize) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx * dist as isize,
            y: self.y + dy * dist as isize,
        }
    }

    // mod width, mod height: a point n cells out of bounds
    // comes back n cells from the opposite edge
    #[must_use]
    pub fn wrap_around(self, board_dim: GridDim) -> Self {
        Self {
            x: self.x.rem_euclid(board_dim.x),
            y: self.y.rem_euclid(board_dim.y),
        }
    }

    #[must_use]
    pub fn wrapping_translate(self, dir: Dir, dist: usize, board_dim: GridDim) -> Self {
        self.translate(dir, dist).wrap_around(board_dim)
    }

    pub fn contains(self, pos: Self) -> bool {
        (0..self.x).contains(&pos.x) && (0..self.y).contains(&pos.y)
    }

    /// Number of cells on a board with these dimensions
    pub fn cell_count(self) -> usize {
        (self.x * self.y) as usize
    }

    /// Leaderboard bucket identifier, e.g. "10x10"
    pub fn size_key(self) -> String {
        format!("{}x{}", self.x, self.y)
    }
}

impl Debug for GridPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

impl PartialOrd for GridPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.y.cmp(&other.y) {
            Ordering::Equal => self.x.cmp(&other.x),
            ord => ord,
        }
    }
}

#[test]
fn test_wrap_around_all_edges() {
    use Dir::*;

    let dim = GridPoint::new(5, 5);
    let cases = [
        (GridPoint::new(4, 0), R, GridPoint::new(0, 0)),
        (GridPoint::new(0, 2), L, GridPoint::new(4, 2)),
        (GridPoint::new(2, 4), D, GridPoint::new(2, 0)),
        (GridPoint::new(2, 0), U, GridPoint::new(2, 4)),
    ];
    for (start, dir, expect) in cases {
        assert_eq!(start.wrapping_translate(dir, 1, dim), expect);
    }
}

#[test]
fn test_wrap_around_in_bounds() {
    let dim = GridPoint::new(8, 12);
    for dir in Dir::iter() {
        let mut pos = GridPoint::new(0, 0);
        for _ in 0..50 {
            pos = pos.wrapping_translate(dir, 1, dim);
            assert!(dim.contains(pos), "{:?} out of bounds", pos);
        }
    }
}

#[test]
fn test_size_key() {
    assert_eq!(GridPoint::new(10, 10).size_key(), "10x10");
    assert_eq!(GridPoint::new(15, 8).size_key(), "15x8");
}
