//! Canvas of Life
//!
//! The state and rules behind an interactive Game of Life board: a dense
//! grid with editing, panning and zoom support, a run/stop simulation with
//! selectable tick speeds, and a portable `[[col, row], ...]` export format.
//! Rendering is left to the caller, which redraws from [`control::Frame`].

pub mod config;
pub mod control;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use control::{Command, Frame, Session};
pub use game_of_life::{Coordinate, Direction, Grid};
pub use simulation::{Simulation, Speed};

use anyhow::Result;

/// Evolve `live` cells on a `width` x `height` board for `generations` steps
pub fn evolve_pattern(
    live: &[Coordinate],
    width: usize,
    height: usize,
    generations: u64,
) -> Result<Vec<Coordinate>> {
    let mut grid = Grid::new(width, height, 1);
    grid.set_from_coordinates(live)?;

    let mut simulation = Simulation::default();
    for _ in 0..generations {
        simulation.step(&mut grid);
    }
    Ok(grid.to_coordinates())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evolve_pattern_blinker() {
        let blinker = [(4, 5), (5, 5), (6, 5)];
        assert_eq!(evolve_pattern(&blinker, 10, 10, 1).unwrap(), vec![(5, 4), (5, 5), (5, 6)]);
        assert_eq!(evolve_pattern(&blinker, 10, 10, 2).unwrap(), blinker.to_vec());
    }

    #[test]
    fn test_evolve_pattern_rejects_cells_off_board() {
        assert!(evolve_pattern(&[(10, 0)], 10, 10, 1).is_err());
    }
}
