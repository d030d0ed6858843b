//! Coherence engine: an adaptive-threshold change detector over an error
//! stream that accumulates relational age.
//!
//! Each tick maps the error to a coherence `c = 1 / (1 + error)` in (0, 1]
//! and compares it with the previous coherence. The change is weighted by
//! the current coherence, so a chaotic but stationary stream (high error,
//! small relative change) does not manufacture lived time. The threshold it
//! is judged against has two parts:
//!
//! - a maturation term `base · (1 + aging_gain · ln(1 + age))` that makes an
//!   older engine harder to impress, and
//! - a reactive term `reactive_coefficient · ema_delta` that desensitizes
//!   the engine to chronically noisy streams.
//!
//! Age only moves on LIVING and AWAKENING ticks, and the gain is passed
//! through a logistic gate so it is continuous across the threshold.
//! Quarantined ticks advance the step counter and nothing else.

use serde::{Deserialize, Serialize};

use crate::config::ClockConfig;
use crate::error::{ConfigError, InvalidSampleError};
use crate::event::TemporalEvent;
use crate::state::TemporalState;

/// Mutable state of one engine. Returned by value from [`CoherenceEngine::state`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub step_counter: u64,
    pub relational_age: f64,
    pub ema_delta: f64,
    /// Coherence of the last classified tick. `None` until the detector is seeded.
    pub prev_signal: Option<f64>,
    /// Coherence of the most recent tick of any kind.
    pub last_coherence: f64,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            step_counter: 0,
            relational_age: 0.0,
            ema_delta: 0.0,
            prev_signal: None,
            last_coherence: 1.0,
        }
    }
}

/// Everything a single tick produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    pub state: TemporalState,
    /// Relational age after this tick.
    pub relational_age: f64,
    /// `relational_age / step_counter` after this tick.
    pub density: f64,
    pub event: TemporalEvent,
    /// Dynamic threshold used for classification (0 when nothing was classified).
    pub threshold: f64,
    pub weighted_delta: f64,
    /// Age credited by this tick, after gating and clamping.
    pub age_gain: f64,
}

/// Per-agent temporal classifier. Single owner; all mutation goes through `&mut self`.
#[derive(Clone, Debug)]
pub struct CoherenceEngine {
    cfg: ClockConfig,
    state: EngineState,
}

impl CoherenceEngine {
    pub fn new(cfg: ClockConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            state: EngineState::default(),
        })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.cfg
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn step_counter(&self) -> u64 {
        self.state.step_counter
    }

    pub fn relational_age(&self) -> f64 {
        self.state.relational_age
    }

    /// Lived time per physical step. Zero before the first tick.
    pub fn density(&self) -> f64 {
        if self.state.step_counter == 0 {
            return 0.0;
        }
        self.state.relational_age / self.state.step_counter as f64
    }

    /// Threshold the next classified tick would use, before its own EMA update.
    pub fn current_threshold(&self) -> f64 {
        self.threshold_for(self.state.ema_delta)
    }

    /// Drop all accumulated state, keeping the configuration.
    pub fn reset(&mut self) {
        self.state = EngineState::default();
    }

    /// Advance the engine by one observation.
    ///
    /// `error` is a magnitude: negative finite values are clamped to zero.
    /// Non-finite values are rejected and leave the engine untouched.
    /// `quarantine` marks the sample as garbage from an upstream classifier:
    /// the step counter advances, but age, `ema_delta` and the detector's
    /// reference signal do not move.
    pub fn tick(&mut self, error: f64, quarantine: bool) -> Result<TickOutcome, InvalidSampleError> {
        if !error.is_finite() {
            tracing::warn!(value = error, step = self.state.step_counter, "rejected non-finite sample");
            return Err(InvalidSampleError { value: error });
        }
        let error = error.max(0.0);

        self.state.step_counter += 1;
        let step = self.state.step_counter;
        let coherence = 1.0 / (1.0 + error);
        self.state.last_coherence = coherence;

        if quarantine {
            return Ok(self.unclassified(step, error, coherence, TemporalState::Quarantine));
        }

        let Some(prev) = self.state.prev_signal else {
            // Seed the detector without claiming a shift.
            self.state.prev_signal = Some(coherence);
            return Ok(self.unclassified(step, error, coherence, TemporalState::Living));
        };

        let raw_delta = (coherence - prev).abs();
        let alpha = self.cfg.smoothing_alpha;
        self.state.ema_delta = (1.0 - alpha) * self.state.ema_delta + alpha * raw_delta;

        let threshold = self.threshold_for(self.state.ema_delta);
        let weighted_delta = raw_delta * coherence.max(self.cfg.epsilon);
        let (state, age_gain) = self.classify(weighted_delta, threshold);

        self.state.relational_age += age_gain;
        self.state.prev_signal = Some(coherence);

        if state == TemporalState::Awakening {
            tracing::debug!(
                step,
                weighted_delta,
                threshold,
                age_gain,
                age = self.state.relational_age,
                "awakening"
            );
        } else {
            tracing::trace!(step, %state, weighted_delta, threshold, age_gain, "tick");
        }

        Ok(TickOutcome {
            state,
            relational_age: self.state.relational_age,
            density: self.density(),
            event: TemporalEvent::new(step, error, coherence, raw_delta, state),
            threshold,
            weighted_delta,
            age_gain,
        })
    }

    /// Maturation law plus reactive term.
    fn threshold_for(&self, ema_delta: f64) -> f64 {
        let maturity = 1.0 + self.cfg.aging_gain * self.state.relational_age.ln_1p();
        self.cfg.base_threshold * maturity + self.cfg.reactive_coefficient * ema_delta
    }

    fn classify(&self, weighted_delta: f64, threshold: f64) -> (TemporalState, f64) {
        let state = if weighted_delta <= threshold {
            TemporalState::Stagnant
        } else if weighted_delta < self.cfg.massive_multiplier * threshold {
            TemporalState::Living
        } else {
            TemporalState::Awakening
        };

        let excess = weighted_delta - threshold;
        let raw_gain = match state {
            TemporalState::Stagnant | TemporalState::Quarantine => 0.0,
            TemporalState::Living => self.cfg.living_gain * excess,
            TemporalState::Awakening => {
                self.cfg.awakening_age_bonus + self.cfg.awakening_gain * excess
            }
        };
        if raw_gain <= 0.0 {
            return (state, 0.0);
        }

        let gated = raw_gain * self.gate(excess);
        let gain = match self.cfg.max_age_gain {
            Some(cap) => gated.min(cap),
            None => gated,
        };
        (state, gain)
    }

    /// Logistic gate in (0, 1), centred on the threshold.
    fn gate(&self, excess: f64) -> f64 {
        1.0 / (1.0 + (-self.cfg.gate_steepness * excess).exp())
    }

    /// Outcome for a tick that neither classifies nor ages.
    fn unclassified(
        &self,
        step: u64,
        error: f64,
        coherence: f64,
        state: TemporalState,
    ) -> TickOutcome {
        TickOutcome {
            state,
            relational_age: self.state.relational_age,
            density: self.density(),
            event: TemporalEvent::new(step, error, coherence, 0.0, state),
            threshold: 0.0,
            weighted_delta: 0.0,
            age_gain: 0.0,
        }
    }
}
