//! Game of Life core functionality

pub mod grid;
pub mod rules;
pub mod io;

pub use grid::{Coordinate, Direction, Grid, GridError};
pub use rules::GameOfLifeRules;
pub use io::{
    create_example_patterns, export_coordinates, import_coordinates, load_pattern_from_file,
    save_coordinates_to_file, ImportError,
};
