//! Owned board state driven by presentation-layer events
//!
//! A [`Session`] pairs one [`Grid`] with one [`Simulation`] and translates
//! commands, pointer strokes and import requests into operations on them.
//! Nothing here draws: after any call that returns `true` the caller takes
//! a fresh [`Frame`] and re-renders it. Invalid input never panics or
//! propagates; it is ignored, optionally leaving a status message.

use super::Command;
use crate::config::{BoardConfig, Settings};
use crate::game_of_life::{io, Coordinate, Grid, GridError};
use crate::simulation::{Simulation, Speed};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Everything a renderer needs to redraw the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub cell_size: u32,
    pub generation: u64,
    pub running: bool,
    pub speed: Speed,
    pub live_cells: Vec<Coordinate>,
    pub status: Option<String>,
}

/// An in-progress drag that paints every entered cell with `fill`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stroke {
    fill: bool,
    last: Coordinate,
}

#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    simulation: Simulation,
    canvas_width: u32,
    canvas_height: u32,
    zoom_step: u32,
    stroke: Option<Stroke>,
    status: Option<String>,
}

impl Session {
    pub fn new(board: &BoardConfig, speed: Speed) -> Result<Self, GridError> {
        let grid = Grid::for_canvas(board.canvas_width, board.canvas_height, board.cell_size)?;
        Ok(Self {
            grid,
            simulation: Simulation::new(speed),
            canvas_width: board.canvas_width,
            canvas_height: board.canvas_height,
            zoom_step: board.zoom_step,
            stroke: None,
            status: None,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GridError> {
        Self::new(&settings.board, settings.simulation.speed)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Last diagnostic left by a rejected operation
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            width: self.grid.width,
            height: self.grid.height,
            cell_size: self.grid.cell_size,
            generation: self.simulation.generation(),
            running: self.simulation.is_running(),
            speed: self.simulation.speed(),
            live_cells: self.grid.to_coordinates(),
            status: self.status.clone(),
        }
    }

    /// Translate a key press; unmapped keys are ignored
    pub fn handle_key(&mut self, key: &str, now: Instant) -> bool {
        match Command::from_key(key) {
            Some(command) => self.dispatch(command, now),
            None => false,
        }
    }

    /// Apply a command, returning whether a redraw is needed
    pub fn dispatch(&mut self, command: Command, now: Instant) -> bool {
        self.status = None;
        match command {
            Command::ToggleRun => {
                self.simulation.toggle(&mut self.grid, now);
                true
            }
            Command::Step => {
                self.step();
                true
            }
            Command::Clear => self.clear(),
            Command::SelectSpeed(position) => match Speed::from_position(position) {
                Some(speed) => {
                    self.simulation.select_speed(speed, now);
                    true
                }
                None => {
                    warn!(position, "No speed at this position");
                    false
                }
            },
            Command::ZoomIn => self.zoom(i64::from(self.zoom_step)),
            Command::ZoomOut => self.zoom(-i64::from(self.zoom_step)),
            Command::Shift(direction) => {
                self.grid.shift(direction);
                true
            }
        }
    }

    pub fn start(&mut self, now: Instant) -> bool {
        self.simulation.start(&mut self.grid, now)
    }

    pub fn stop(&mut self) -> bool {
        self.simulation.stop()
    }

    pub fn step(&mut self) {
        self.simulation.step(&mut self.grid);
    }

    /// Advance if the periodic timer is due
    pub fn tick(&mut self, now: Instant) -> bool {
        self.simulation.tick(&mut self.grid, now)
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.simulation.time_until_tick(now)
    }

    /// Select a speed by name; unknown names are ignored
    pub fn set_speed(&mut self, name: &str, now: Instant) -> bool {
        self.simulation.set_speed(name, now)
    }

    /// Clear the board and generation counter unless running
    pub fn clear(&mut self) -> bool {
        match self.simulation.clear(&mut self.grid) {
            Ok(()) => true,
            Err(err) => {
                self.status = Some(err.to_string());
                false
            }
        }
    }

    /// Resize cells by `delta` pixels and regrow the board to fill the canvas
    pub fn zoom(&mut self, delta: i64) -> bool {
        match self.grid.zoom(delta) {
            Ok(cell_size) => {
                let width = (self.canvas_width / cell_size) as usize;
                let height = (self.canvas_height / cell_size) as usize;
                self.grid.resize(width, height, false);
                info!(cell_size, width = self.grid.width, height = self.grid.height, "Zoomed");
                true
            }
            Err(err) => {
                warn!(%err, "Zoom rejected");
                self.status = Some(err.to_string());
                false
            }
        }
    }

    /// Begin a paint stroke: flip the cell under the pointer and remember
    /// whether the stroke fills or erases
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let Some((col, row)) = self.grid.cell_at_pixel(x, y) else {
            return false;
        };
        match self.grid.toggle(col, row) {
            Ok(fill) => {
                self.stroke = Some(Stroke { fill, last: (col, row) });
                true
            }
            Err(_) => false,
        }
    }

    /// Continue a stroke into the cell under the pointer
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let Some(stroke) = self.stroke else {
            return false;
        };
        let Some(cell) = self.grid.cell_at_pixel(x, y) else {
            return false;
        };
        if cell == stroke.last {
            return false;
        }
        self.stroke = Some(Stroke { last: cell, ..stroke });
        self.grid.set_live(cell.0, cell.1, stroke.fill).is_ok()
    }

    pub fn pointer_up(&mut self) {
        self.stroke = None;
    }

    /// Replace the live set with `coordinates`, rejecting any out of bounds
    pub fn load_coordinates(&mut self, coordinates: &[Coordinate]) -> Result<(), GridError> {
        self.grid.set_from_coordinates(coordinates)
    }

    /// Import a JSON coordinate list; on failure nothing changes and the
    /// reason is left in [`Session::status`]
    pub fn import(&mut self, json: &str) -> bool {
        match io::import_coordinates(&mut self.grid, json) {
            Ok(count) => {
                info!(count, "Imported live cells");
                self.status = None;
                true
            }
            Err(err) => {
                warn!(%err, "Import aborted");
                self.status = Some(format!("Import failed: {err}"));
                false
            }
        }
    }

    pub fn export(&self) -> Result<String, serde_json::Error> {
        io::export_coordinates(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Direction;

    fn session() -> Session {
        let board = BoardConfig {
            canvas_width: 100,
            canvas_height: 80,
            cell_size: 10,
            zoom_step: 5,
        };
        Session::new(&board, Speed::Normal).unwrap()
    }

    #[test]
    fn test_board_fills_canvas() {
        let session = session();
        let frame = session.frame();
        assert_eq!((frame.width, frame.height, frame.cell_size), (10, 8, 10));
        assert_eq!(frame.generation, 0);
        assert!(!frame.running);
        assert!(frame.live_cells.is_empty());
    }

    #[test]
    fn test_session_rejects_zero_cell_size() {
        let board = BoardConfig {
            canvas_width: 100,
            canvas_height: 80,
            cell_size: 0,
            zoom_step: 1,
        };
        assert!(Session::new(&board, Speed::Normal).is_err());
    }

    #[test]
    fn test_session_rejects_canvas_smaller_than_a_cell() {
        let board = BoardConfig {
            canvas_width: 5,
            canvas_height: 5,
            cell_size: 10,
            zoom_step: 1,
        };
        assert!(Session::new(&board, Speed::Normal).is_err());

        let board = BoardConfig {
            canvas_width: 10,
            canvas_height: 10,
            cell_size: 10,
            zoom_step: 1,
        };
        let session = Session::new(&board, Speed::Normal).unwrap();
        assert_eq!((session.grid().width, session.grid().height), (1, 1));
    }

    #[test]
    fn test_space_runs_and_pauses() {
        let mut session = session();
        session.load_coordinates(&[(4, 5), (5, 5), (6, 5)]).unwrap();
        let now = Instant::now();

        assert!(session.handle_key(" ", now));
        let frame = session.frame();
        assert!(frame.running);
        assert_eq!(frame.generation, 1);
        assert_eq!(frame.live_cells, vec![(5, 4), (5, 5), (5, 6)]);

        assert!(session.tick(now + Speed::Normal.period()));
        assert_eq!(session.frame().live_cells, vec![(4, 5), (5, 5), (6, 5)]);

        assert!(session.handle_key(" ", now));
        assert!(!session.frame().running);
        assert_eq!(session.time_until_tick(now), None);
    }

    #[test]
    fn test_step_key_works_in_both_states() {
        let mut session = session();
        let now = Instant::now();

        assert!(session.handle_key("n", now));
        assert_eq!(session.simulation().generation(), 1);

        session.start(now);
        assert!(session.handle_key("n", now));
        assert_eq!(session.simulation().generation(), 3);
        assert!(session.simulation().is_running());
    }

    #[test]
    fn test_clear_only_while_stopped() {
        let mut session = session();
        session.load_coordinates(&[(1, 1), (2, 1), (1, 2), (2, 2)]).unwrap();
        let now = Instant::now();

        session.start(now);
        assert!(!session.handle_key("Delete", now));
        assert!(session.status().is_some());
        assert_eq!(session.grid().living_count(), 4);

        session.stop();
        assert!(session.handle_key("Delete", now));
        assert_eq!(session.status(), None);
        assert!(session.grid().is_empty());
        assert_eq!(session.simulation().generation(), 0);
    }

    #[test]
    fn test_digit_selects_speed() {
        let mut session = session();
        let now = Instant::now();

        assert!(session.handle_key("3", now));
        assert_eq!(session.frame().speed, Speed::Hyper);
        assert!(!session.handle_key("7", now));
        assert_eq!(session.frame().speed, Speed::Hyper);
    }

    #[test]
    fn test_set_speed_by_name() {
        let mut session = session();
        let now = Instant::now();
        assert!(session.set_speed("fast", now));
        assert!(!session.set_speed("turbo", now));
        assert_eq!(session.simulation().speed(), Speed::Fast);
    }

    #[test]
    fn test_zoom_regrows_without_clearing() {
        let mut session = session();
        session.load_coordinates(&[(9, 7), (0, 0)]).unwrap();
        let now = Instant::now();

        // 10px -> 5px cells: the 100x80 canvas now holds 20x16 cells
        assert!(session.dispatch(Command::ZoomOut, now));
        let frame = session.frame();
        assert_eq!((frame.width, frame.height, frame.cell_size), (20, 16, 5));
        assert_eq!(frame.live_cells, vec![(0, 0), (9, 7)]);

        // Bigger cells never shrink the board
        assert!(session.dispatch(Command::ZoomIn, now));
        let frame = session.frame();
        assert_eq!((frame.width, frame.height, frame.cell_size), (20, 16, 10));
        assert_eq!(frame.live_cells, vec![(0, 0), (9, 7)]);
    }

    #[test]
    fn test_zoom_rejects_non_positive_cell_size() {
        let mut session = session();
        let now = Instant::now();

        assert!(session.dispatch(Command::ZoomOut, now));
        assert!(!session.dispatch(Command::ZoomOut, now));
        assert_eq!(session.grid().cell_size, 5);
        assert!(session.status().is_some());
    }

    #[test]
    fn test_arrow_keys_shift_board() {
        let mut session = session();
        session.load_coordinates(&[(3, 3)]).unwrap();
        let now = Instant::now();

        assert!(session.dispatch(Command::Shift(Direction::Right), now));
        assert!(session.handle_key("ArrowDown", now));
        assert_eq!(session.frame().live_cells, vec![(4, 4)]);
    }

    #[test]
    fn test_drag_paints_with_initial_fill() {
        let mut session = session();
        session.load_coordinates(&[(2, 0)]).unwrap();

        // Starting on a dead cell: the stroke fills
        assert!(session.pointer_down(5.0, 5.0));
        assert!(!session.pointer_move(8.0, 2.0));
        assert!(session.pointer_move(15.0, 5.0));
        assert!(session.pointer_move(25.0, 5.0));
        session.pointer_up();
        assert_eq!(session.grid().to_coordinates(), vec![(0, 0), (1, 0), (2, 0)]);

        assert!(!session.pointer_move(35.0, 5.0));

        // Starting on a live cell: the stroke erases
        assert!(session.pointer_down(15.0, 5.0));
        assert!(session.pointer_move(5.0, 5.0));
        session.pointer_up();
        assert_eq!(session.grid().to_coordinates(), vec![(2, 0)]);
    }

    #[test]
    fn test_pointer_outside_board_is_ignored() {
        let mut session = session();
        assert!(!session.pointer_down(-3.0, 5.0));
        assert!(!session.pointer_down(100.0, 5.0));
        assert!(session.grid().is_empty());

        assert!(session.pointer_down(95.0, 75.0));
        assert!(!session.pointer_move(120.0, 75.0));
        assert_eq!(session.grid().to_coordinates(), vec![(9, 7)]);
    }

    #[test]
    fn test_import_and_export() {
        let mut session = session();
        assert!(session.import("[[1,2],[3,4]]"));
        assert_eq!(session.export().unwrap(), "[[1,2],[3,4]]");

        assert!(!session.import("[[1,2],[3]]"));
        let status = session.status().unwrap();
        assert!(status.starts_with("Import failed"));
        assert_eq!(session.export().unwrap(), "[[1,2],[3,4]]");

        assert!(!session.import("[[50,50]]"));
        assert_eq!(session.frame().live_cells, vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn test_frame_serializes_for_renderers() {
        let mut session = session();
        session.load_coordinates(&[(1, 2)]).unwrap();
        let json = serde_json::to_value(session.frame()).unwrap();
        assert_eq!(json["live_cells"], serde_json::json!([[1, 2]]));
        assert_eq!(json["speed"], "normal");
        assert_eq!(json["generation"], 0);
    }
}
