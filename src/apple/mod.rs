use crate::basic::GridPoint;

pub mod spawn;

/// Plain food; eating it grows the snake by one cell
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Apple {
    pub pos: GridPoint,
}
