//! Grid representation and utilities for Game of Life

use anyhow::Result;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A live cell position as `(col, row)`
pub type Coordinate = (usize, usize);

/// Errors raised by bounds-checked grid operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Coordinates ({col}, {row}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    },
    #[error("Cell size must stay positive, got {0}")]
    InvalidCellSize(i64),
    #[error("Canvas {canvas_width}x{canvas_height} cannot hold a single {cell_size}px cell")]
    EmptyBoard {
        canvas_width: u32,
        canvas_height: u32,
        cell_size: u32,
    },
}

/// Direction of a one-cell board translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Column and row offset applied to every cell
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Represents a Game of Life board drawn with square cells of `cell_size` pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cell_size: u32,
    /// Row-major cell states, `height` rows of `width` cells
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![false; width * height],
        }
    }

    /// Create an empty grid covering a canvas of the given pixel size.
    ///
    /// The canvas must fit at least one whole cell on each axis.
    pub fn for_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Result<Self, GridError> {
        if cell_size == 0 {
            return Err(GridError::InvalidCellSize(0));
        }
        let width = (canvas_width / cell_size) as usize;
        let height = (canvas_height / cell_size) as usize;
        if width == 0 || height == 0 {
            return Err(GridError::EmptyBoard {
                canvas_width,
                canvas_height,
                cell_size,
            });
        }
        Ok(Self::new(width, height, cell_size))
    }

    /// Create a grid from rows of boolean cells
    pub fn from_cells(cells: Vec<Vec<bool>>, cell_size: u32) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let height = cells.len();
        let width = cells[0].len();

        if width == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            width,
            height,
            cell_size,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Convert 2D coordinates to the row-major index into `cells`
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    /// Whether `(col, row)` lies on the board
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    fn check_bounds(&self, col: usize, row: usize) -> Result<(), GridError> {
        if self.contains(col, row) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get cell value at coordinates; cells outside the grid are dead
    pub fn get(&self, col: usize, row: usize) -> bool {
        self.contains(col, row) && self.cells[self.index(col, row)]
    }

    /// Set a single cell to the given state
    pub fn set_live(&mut self, col: usize, row: usize, alive: bool) -> Result<(), GridError> {
        self.check_bounds(col, row)?;
        let idx = self.index(col, row);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip a single cell, returning its new state
    pub fn toggle(&mut self, col: usize, row: usize) -> Result<bool, GridError> {
        self.check_bounds(col, row)?;
        let idx = self.index(col, row);
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Kill every cell without changing the dimensions
    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    /// Resize the board.
    ///
    /// With `clear` the grid takes exactly the new dimensions, all dead.
    /// Otherwise the grid only grows: each axis becomes the larger of the
    /// current and requested size and existing cells keep their coordinates.
    pub fn resize(&mut self, new_width: usize, new_height: usize, clear: bool) {
        if clear {
            *self = Self::new(new_width, new_height, self.cell_size);
            return;
        }

        let width = self.width.max(new_width);
        let height = self.height.max(new_height);
        if width == self.width && height == self.height {
            return;
        }

        let mut grown = Self::new(width, height, self.cell_size);
        for (col, row) in self.to_coordinates() {
            let idx = grown.index(col, row);
            grown.cells[idx] = true;
        }
        *self = grown;
    }

    /// Replace the live set with `coordinates`.
    ///
    /// Every pair is checked before anything changes, so a rejected list
    /// leaves the grid untouched.
    pub fn set_from_coordinates(&mut self, coordinates: &[Coordinate]) -> Result<(), GridError> {
        for &(col, row) in coordinates {
            self.check_bounds(col, row)?;
        }

        self.reset();
        for &(col, row) in coordinates {
            let idx = self.index(col, row);
            self.cells[idx] = true;
        }
        Ok(())
    }

    /// All live cells as `(col, row)`, row-ascending then column-ascending
    pub fn to_coordinates(&self) -> Vec<Coordinate> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(row, col)| self.cells[self.index(col, row)])
            .map(|(row, col)| (col, row))
            .collect()
    }

    /// Count live cells in the Moore neighborhood, clipped at the edges.
    ///
    /// Positions off the board only see neighbors that are on it.
    pub fn count_live_neighbors(&self, col: usize, row: usize) -> u8 {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter(|&(dc, dr)| self.is_alive_at_offset(col, row, dc, dr))
            .count() as u8
    }

    fn is_alive_at_offset(&self, col: usize, row: usize, dc: isize, dr: isize) -> bool {
        match (col.checked_add_signed(dc), row.checked_add_signed(dr)) {
            (Some(col), Some(row)) => self.get(col, row),
            _ => false,
        }
    }

    /// Translate the whole board by one cell.
    ///
    /// Cells pushed past an edge are dropped and the opposite edge fills
    /// with dead cells; nothing wraps.
    pub fn shift(&mut self, direction: Direction) {
        let (dc, dr) = direction.offset();
        let shifted = iproduct!(0..self.height, 0..self.width)
            .map(|(row, col)| self.is_alive_at_offset(col, row, -dc, -dr))
            .collect();
        self.cells = shifted;
    }

    /// Change the cell size by `delta` pixels, returning the new size.
    ///
    /// Dimensions are left alone; callers regrow against their canvas.
    pub fn zoom(&mut self, delta: i64) -> Result<u32, GridError> {
        let requested = i64::from(self.cell_size) + delta;
        if requested <= 0 || requested > i64::from(u32::MAX) {
            return Err(GridError::InvalidCellSize(requested));
        }
        self.cell_size = requested as u32;
        Ok(self.cell_size)
    }

    /// Map a pixel offset on the rendering surface to the cell under it
    pub fn cell_at_pixel(&self, x: f64, y: f64) -> Option<Coordinate> {
        if self.cell_size == 0 || !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let size = f64::from(self.cell_size);
        let col = (x / size).floor() as usize;
        let row = (y / size).floor() as usize;
        self.contains(col, row).then_some((col, row))
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}
