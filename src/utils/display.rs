//! Terminal rendering of frames and colored status output

use crate::control::Frame;

/// Formats boards for console output
pub struct FrameFormatter;

impl FrameFormatter {
    /// Render a frame as a header line followed by the board
    pub fn format_frame(frame: &Frame) -> String {
        let mut output = String::with_capacity((frame.width + 1) * (frame.height + 1));

        output.push_str(&format!(
            "Generation {} | {} | speed {} | {} live\n",
            frame.generation,
            if frame.running { "running" } else { "paused" },
            frame.speed,
            frame.live_cells.len()
        ));

        let mut rows = vec![vec!['·'; frame.width]; frame.height];
        for &(col, row) in &frame.live_cells {
            if let Some(cell) = rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = '█';
            }
        }
        for row in rows {
            output.extend(row);
            output.push('\n');
        }

        if let Some(status) = &frame.status {
            output.push_str(status);
            output.push('\n');
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
