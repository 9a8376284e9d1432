//! Keyboard command surface

use crate::game_of_life::Direction;

/// A user intent the presentation layer forwards to a [`super::Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRun,
    Step,
    Clear,
    /// 1-based position in the speed list
    SelectSpeed(usize),
    ZoomIn,
    ZoomOut,
    Shift(Direction),
}

impl Command {
    /// Map a `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            " " | "Spacebar" => Command::ToggleRun,
            "n" | "N" => Command::Step,
            "Delete" | "Del" => Command::Clear,
            "+" | "=" => Command::ZoomIn,
            "-" | "_" => Command::ZoomOut,
            "ArrowLeft" => Command::Shift(Direction::Left),
            "ArrowUp" => Command::Shift(Direction::Up),
            "ArrowRight" => Command::Shift(Direction::Right),
            "ArrowDown" => Command::Shift(Direction::Down),
            digit => {
                let position = digit.parse::<usize>().ok().filter(|d| (1..=9).contains(d))?;
                Command::SelectSpeed(position)
            }
        };
        Some(command)
    }
}
