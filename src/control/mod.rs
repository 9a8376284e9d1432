//! Event dispatch between a presentation layer and the board

pub mod command;
pub mod session;

pub use command::Command;
pub use session::{Frame, Session};
