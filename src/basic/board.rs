use rand::Rng;

use crate::apple::Apple;
use crate::basic::{GridDim, GridPoint};
use crate::snake::Body;

pub fn get_occupied_cells(body: &Body, apple: Option<&Apple>) -> Vec<GridPoint> {
    let mut occupied_cells = Vec::with_capacity(body.len() + 1);
    occupied_cells.extend(apple.map(|apple| apple.pos));
    occupied_cells.extend(body.cells.iter().copied());
    occupied_cells.sort_unstable();
    occupied_cells.dedup();
    occupied_cells
}

/// Uniformly random unoccupied cell, None if the board is full.
/// `occupied_cells` must be sorted.
pub fn random_free_spot(
    occupied_cells: &[GridPoint],
    board_dim: GridDim,
    rng: &mut impl Rng,
) -> Option<GridPoint> {
    let free_spaces = board_dim.cell_count() - occupied_cells.len();
    if free_spaces == 0 {
        return None;
    }

    // index into the free cells only, then shift past the
    // occupied ones to get an index into the whole board
    let mut new_idx = rng.gen_range(0..free_spaces);
    for GridPoint { x, y } in occupied_cells {
        let idx = (y * board_dim.x + x) as usize;
        if idx <= new_idx {
            new_idx += 1;
        }
    }

    assert!(new_idx < board_dim.cell_count());
    Some(GridPoint {
        x: new_idx as isize % board_dim.x,
        y: new_idx as isize / board_dim.x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn free_spot_never_occupied() {
        let mut rng = StdRng::seed_from_u64(7);
        let dim = GridPoint::new(4, 4);
        let mut occupied: Vec<_> = (0..3).map(|x| GridPoint::new(x, 1)).collect();
        occupied.sort_unstable();

        for _ in 0..200 {
            let spot = random_free_spot(&occupied, dim, &mut rng).unwrap();
            assert!(dim.contains(spot));
            assert!(!occupied.contains(&spot));
        }
    }

    #[test]
    fn free_spot_reaches_every_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let dim = GridPoint::new(3, 3);
        let occupied = vec![GridPoint::new(1, 1)];

        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(random_free_spot(&occupied, dim, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let dim = GridPoint::new(2, 2);
        let mut occupied = vec![
            GridPoint::new(0, 0),
            GridPoint::new(1, 0),
            GridPoint::new(0, 1),
            GridPoint::new(1, 1),
        ];
        occupied.sort_unstable();
        assert!(random_free_spot(&occupied, dim, &mut rng).is_none());
    }
}
