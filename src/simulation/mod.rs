//! Simulation control: speeds, periodic timer and the run state machine

pub mod engine;
pub mod speed;
pub mod timer;

pub use engine::{RunState, Simulation, SimulationError};
pub use speed::Speed;
pub use timer::PeriodicTimer;
