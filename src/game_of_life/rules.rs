//! Game of Life transition rule

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation from a snapshot of the current one.
    ///
    /// The input is never mutated; every cell reads its neighbors from the
    /// same generation.
    pub fn evolve(current: &Grid) -> Grid {
        let cells: Vec<bool> = (0..current.height)
            .into_par_iter()
            .flat_map(|row| {
                (0..current.width).into_par_iter().map(move |col| {
                    Self::should_be_alive(current.get(col, row), current.count_live_neighbors(col, row))
                })
            })
            .collect();

        Grid {
            width: current.width,
            height: current.height,
            cell_size: current.cell_size,
            cells,
        }
    }

    /// Whether a cell lives in the next generation
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
