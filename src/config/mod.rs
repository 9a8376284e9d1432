//! Configuration management for the board and simulation

pub mod settings;

pub use settings::{BoardConfig, CliOverrides, InputConfig, OutputConfig, Settings, SimulationConfig};
