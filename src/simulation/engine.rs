//! Generation counter and run control

use super::{PeriodicTimer, Speed};
use crate::game_of_life::{GameOfLifeRules, Grid};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("Cannot clear the board while the simulation is running")]
    ClearWhileRunning,
}

/// Stopped, or running under an armed periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running(PeriodicTimer),
}

/// Advances a [`Grid`] one generation at a time, manually or on a timer
#[derive(Debug, Clone)]
pub struct Simulation {
    generation: u64,
    speed: Speed,
    state: RunState,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Speed::default())
    }
}

impl Simulation {
    /// A stopped simulation at generation 0
    pub fn new(speed: Speed) -> Self {
        Self {
            generation: 0,
            speed,
            state: RunState::Stopped,
        }
    }

    /// Steps applied since creation or the last clear
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Currently selected tick speed
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Run state, including the armed timer while running
    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running(_))
    }

    /// Apply the transition rule once; valid in either run state
    pub fn step(&mut self, grid: &mut Grid) {
        *grid = GameOfLifeRules::evolve(grid);
        self.generation += 1;
        debug!(generation = self.generation, live = grid.living_count(), "Stepped");
    }

    /// Start running: one immediate step, then arm the periodic timer.
    ///
    /// Returns `false` when already running.
    pub fn start(&mut self, grid: &mut Grid, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.step(grid);
        self.state = RunState::Running(PeriodicTimer::arm(self.speed.period(), now));
        info!(speed = %self.speed, generation = self.generation, "Simulation started");
        true
    }

    /// Disarm the timer; no tick fires after this returns.
    ///
    /// Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Stopped;
        info!(generation = self.generation, "Simulation stopped");
        true
    }

    /// Switch between running and stopped, returning whether it now runs
    pub fn toggle(&mut self, grid: &mut Grid, now: Instant) -> bool {
        if self.is_running() {
            self.stop();
        } else {
            self.start(grid, now);
        }
        self.is_running()
    }

    /// Select a speed by name. Unknown names are ignored.
    pub fn set_speed(&mut self, name: &str, now: Instant) -> bool {
        match Speed::from_name(name) {
            Some(speed) => {
                self.select_speed(speed, now);
                true
            }
            None => {
                warn!(requested = name, current = %self.speed, "Ignoring unknown speed");
                false
            }
        }
    }

    /// Select a speed; a running timer is replaced, never stacked
    pub fn select_speed(&mut self, speed: Speed, now: Instant) {
        self.speed = speed;
        if let RunState::Running(_) = self.state {
            self.state = RunState::Running(PeriodicTimer::arm(speed.period(), now));
        }
        info!(speed = %speed, running = self.is_running(), "Speed selected");
    }

    /// Step if the periodic timer is due at `now`
    pub fn tick(&mut self, grid: &mut Grid, now: Instant) -> bool {
        let fired = match &mut self.state {
            RunState::Running(timer) => timer.fire(now),
            RunState::Stopped => false,
        };
        if fired {
            self.step(grid);
        }
        fired
    }

    /// Time left before the next periodic tick, if running
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        match &self.state {
            RunState::Running(timer) => Some(timer.time_until_due(now)),
            RunState::Stopped => None,
        }
    }

    /// Kill every cell and reset the generation counter; refused while running
    pub fn clear(&mut self, grid: &mut Grid) -> Result<(), SimulationError> {
        if self.is_running() {
            warn!("Refusing to clear a running simulation");
            return Err(SimulationError::ClearWhileRunning);
        }
        grid.reset();
        self.generation = 0;
        info!("Board cleared");
        Ok(())
    }
}
