//! Configuration settings for the board and simulation

use crate::simulation::Speed;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Pixel geometry of the rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    /// Pixels added or removed per zoom command
    pub zoom_step: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub speed: Speed,
    /// Generation at which a headless run stops
    pub generations: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub export_file: Option<PathBuf>,
    pub show_frames: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                canvas_width: 800,
                canvas_height: 600,
                cell_size: 10,
                zoom_step: 1,
            },
            simulation: SimulationConfig {
                speed: Speed::Normal,
                generations: 100,
            },
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            settings.resolve_paths(base);
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Anchor relative file paths at `base`, the directory holding the config
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.input.pattern_file, &mut self.output.export_file]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let board = &self.board;
        if board.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        if board.canvas_width < board.cell_size || board.canvas_height < board.cell_size {
            anyhow::bail!(
                "Canvas {}x{} cannot hold a single {}px cell",
                board.canvas_width,
                board.canvas_height,
                board.cell_size
            );
        }

        if board.zoom_step == 0 {
            anyhow::bail!("Zoom step must be positive");
        }

        if let Some(pattern) = &self.input.pattern_file {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(cell_size) = cli_overrides.cell_size {
            self.board.cell_size = cell_size;
        }
        if let Some(speed) = cli_overrides.speed {
            self.simulation.speed = speed;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref pattern) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern.clone());
        }
        if let Some(ref export) = cli_overrides.export_file {
            self.output.export_file = Some(export.clone());
        }
        if cli_overrides.show_frames {
            self.output.show_frames = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub cell_size: Option<u32>,
    pub speed: Option<Speed>,
    pub generations: Option<u64>,
    pub pattern_file: Option<PathBuf>,
    pub export_file: Option<PathBuf>,
    pub show_frames: bool,
}
