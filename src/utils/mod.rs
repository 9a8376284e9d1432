//! Output formatting helpers for the terminal driver

pub mod display;

pub use display::{Color, ColorOutput, FrameFormatter};
