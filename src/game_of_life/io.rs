//! Import and export of live cell sets
//!
//! The portable format is a JSON array of `[col, row]` pairs, one per live
//! cell. Plain-text patterns (one line per row, `1` alive and `0` dead) are
//! accepted as an authoring format and converted to coordinates.

use super::grid::{Coordinate, GridError};
use super::Grid;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Reasons an import is aborted; the grid is never touched when one occurs
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("Expected an array of [col, row] pairs")]
    NotAnArray,
    #[error("Entry {index} is not a [col, row] pair")]
    MalformedEntry { index: usize },
    #[error("Entry {index} has a component that is not a non-negative integer")]
    InvalidComponent { index: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parse a coordinate list, validating its shape
pub fn parse_coordinates(json: &str) -> Result<Vec<Coordinate>, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let entries = value.as_array().ok_or(ImportError::NotAnArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<Coordinate, ImportError> {
            match entry.as_array().map(Vec::as_slice) {
                Some([col, row]) => {
                    let component = |v: &Value| {
                        v.as_u64()
                            .and_then(|n| usize::try_from(n).ok())
                            .ok_or(ImportError::InvalidComponent { index })
                    };
                    Ok((component(col)?, component(row)?))
                }
                _ => Err(ImportError::MalformedEntry { index }),
            }
        })
        .collect()
}

/// Serialize coordinates as a compact JSON array of pairs
pub fn coordinates_to_json(coordinates: &[Coordinate]) -> Result<String, serde_json::Error> {
    let pairs: Vec<[usize; 2]> = coordinates.iter().map(|&(col, row)| [col, row]).collect();
    serde_json::to_string(&pairs)
}

/// Replace the grid's live set with the cells listed in `json`.
///
/// Returns the number of live cells on success.
pub fn import_coordinates(grid: &mut Grid, json: &str) -> Result<usize, ImportError> {
    let coordinates = parse_coordinates(json)?;
    grid.set_from_coordinates(&coordinates)?;
    Ok(coordinates.len())
}

/// Export every live cell in row-major order
pub fn export_coordinates(grid: &Grid) -> Result<String, serde_json::Error> {
    coordinates_to_json(&grid.to_coordinates())
}

/// Parse a plain-text pattern into a grid
pub fn parse_pattern_from_string(content: &str, cell_size: u32) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at column {}, row {}. Only '0' and '1' are allowed",
                    ch,
                    col_idx,
                    row_idx
                ),
            })
            .collect::<Result<Vec<bool>>>()?;
        cells.push(row);
    }

    Grid::from_cells(cells, cell_size)
}

/// Convert a grid to its plain-text pattern
pub fn pattern_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height * (grid.width + 1));

    for row in 0..grid.height {
        for col in 0..grid.width {
            result.push(if grid.get(col, row) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Load live coordinates from a `.json` coordinate file or a `.txt` pattern
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Coordinate>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file: {}", path.display()))?;

    let is_text = path.extension().is_some_and(|ext| ext == "txt");
    if is_text {
        let grid = parse_pattern_from_string(&content, 1)
            .with_context(|| format!("Failed to parse pattern from file: {}", path.display()))?;
        Ok(grid.to_coordinates())
    } else {
        parse_coordinates(&content)
            .with_context(|| format!("Failed to parse coordinates from file: {}", path.display()))
    }
}

/// Save the grid's live cells as a coordinate file
pub fn save_coordinates_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = export_coordinates(grid).context("Failed to serialize live cells")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write coordinates to file: {}", path.display()))?;

    Ok(())
}

/// Write the bundled example patterns, in both formats
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        ("glider", "00100\n10100\n01100\n00000\n00000\n"),
        ("blinker", "000\n111\n000\n"),
        ("block", "0000\n0110\n0110\n0000\n"),
        ("beacon", "110000\n110000\n001100\n001100\n"),
    ];

    for (name, text) in patterns {
        std::fs::write(dir.join(format!("{name}.txt")), text)
            .with_context(|| format!("Failed to write {name}.txt"))?;

        let grid = parse_pattern_from_string(text, 1)?;
        save_coordinates_to_file(&grid, dir.join(format!("{name}.json")))?;
    }

    Ok(())
}
