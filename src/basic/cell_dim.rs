use crate::basic::Point;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellDim {
    pub side: f32,
}

impl From<f32> for CellDim {
    fn from(side: f32) -> Self {
        Self { side }
    }
}

impl CellDim {
    /// Offset from a cell's top-left corner to its center
    pub fn center(self) -> Point {
        Point::square(self.side / 2.)
    }
}
