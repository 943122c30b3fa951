use std::ops::Neg;

use rand::Rng;
use Dir::*;

// the four cardinal directions of travel on the grid
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Dir {
    U = 0,
    D = 1,
    L = 2,
    R = 3,
}

impl Neg for Dir {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            U => D,
            D => U,
            L => R,
            R => L,
        }
    }
}

impl Dir {
    /// Unit vector in grid coordinates (y grows downwards)
    pub fn offset(self) -> (isize, isize) {
        match self {
            U => (0, -1),
            D => (0, 1),
            L => (-1, 0),
            R => (1, 0),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [U, D, L, R].iter().copied()
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..4) {
            0 => U,
            1 => D,
            2 => L,
            _ => R,
        }
    }
}

#[test]
fn test_opposites() {
    for (dir, opposite) in [(U, D), (D, U), (L, R), (R, L)] {
        assert_eq!(-dir, opposite);
        assert_eq!(-(-dir), dir);
    }
}

#[test]
fn test_offsets_cancel() {
    for dir in Dir::iter() {
        let (dx, dy) = dir.offset();
        let (ox, oy) = (-dir).offset();
        assert_eq!((dx + ox, dy + oy), (0, 0));
    }
}
