use crate::basic::{Dir, Point};

/// Turns a press-drag-release pointer gesture into a candidate
/// direction; the dominant displacement axis decides
pub struct Swipe {
    start: Option<Point>,
}

impl Swipe {
    /// Displacements shorter than this are clicks, not swipes
    const MIN_DISTANCE: f32 = 10.;

    pub fn new() -> Self {
        Self { start: None }
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some(Point { x, y });
    }

    pub fn end(&mut self, x: f32, y: f32) -> Option<Dir> {
        let start = self.start.take()?;
        let delta = Point { x, y } - start;

        if delta.magnitude() < Self::MIN_DISTANCE {
            return None;
        }

        let dir = if delta.x.abs() > delta.y.abs() {
            if delta.x > 0. {
                Dir::R
            } else {
                Dir::L
            }
        } else if delta.y > 0. {
            Dir::D
        } else {
            Dir::U
        };
        Some(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_wins() {
        let mut swipe = Swipe::new();

        swipe.begin(100., 100.);
        assert_eq!(swipe.end(180., 120.), Some(Dir::R));

        swipe.begin(100., 100.);
        assert_eq!(swipe.end(80., 30.), Some(Dir::U));

        swipe.begin(100., 100.);
        assert_eq!(swipe.end(20., 110.), Some(Dir::L));

        swipe.begin(100., 100.);
        assert_eq!(swipe.end(110., 190.), Some(Dir::D));
    }

    #[test]
    fn clicks_are_not_swipes() {
        let mut swipe = Swipe::new();
        swipe.begin(100., 100.);
        assert_eq!(swipe.end(103., 102.), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut swipe = Swipe::new();
        assert_eq!(swipe.end(500., 500.), None);
    }
}
