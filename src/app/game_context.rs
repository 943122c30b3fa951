use crate::app::palette::Palette;
use crate::app::prefs::Prefs;
use crate::basic::{CellDim, GridDim};

/// Read-mostly state shared with the rendering functions
pub struct GameContext {
    pub board_dim: GridDim,
    pub cell_dim: CellDim,
    pub palette: Palette,
    pub prefs: Prefs,
    /// Wall-clock milliseconds since startup, for purely visual
    /// animation that runs on the display clock
    pub elapsed_millis: u128,
}
