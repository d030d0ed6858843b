use serde::{Deserialize, Serialize};

use crate::state::TemporalState;

/// One classification, as recorded in episodic memory.
///
/// Fields are private so an event cannot change after the engine emits it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemporalEvent {
    step: u64,
    error: f64,
    coherence: f64,
    delta: f64,
    state: TemporalState,
}

impl TemporalEvent {
    pub fn new(step: u64, error: f64, coherence: f64, delta: f64, state: TemporalState) -> Self {
        Self {
            step,
            error,
            coherence,
            delta,
            state,
        }
    }

    /// Physical step (1-based) at which the event happened.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Error value the engine actually used (negative inputs clamped to zero).
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn coherence(&self) -> f64 {
        self.coherence
    }

    /// Raw coherence change `|c - prev|`. Zero when nothing was compared.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn state(&self) -> TemporalState {
        self.state
    }
}
