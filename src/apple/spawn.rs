use rand::Rng;

use crate::apple::Apple;
use crate::basic::board::{get_occupied_cells, random_free_spot};
use crate::basic::GridDim;
use crate::snake::Body;

/// Place a new apple uniformly at random among unoccupied cells.
/// None means the board is full; the caller must treat that as a
/// terminal board-cleared condition, not retry.
pub fn spawn_apple(body: &Body, board_dim: GridDim, rng: &mut impl Rng) -> Option<Apple> {
    let occupied_cells = get_occupied_cells(body, None);
    random_free_spot(&occupied_cells, board_dim, rng).map(|pos| Apple { pos })
}
