//! Plasticity policy: how hard the optimizer should learn in each regime.
//!
//! Pure and stateless. The policy only emits numbers and decisions; applying
//! them to an optimizer is the caller's job.

use crate::config::PolicyConfig;
use crate::error::ConfigError;
use crate::state::TemporalState;

#[derive(Clone, Debug, Default)]
pub struct PlasticityPolicy {
    cfg: PolicyConfig,
}

impl PlasticityPolicy {
    pub fn new(cfg: PolicyConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.cfg
    }

    /// Multiplier applied to `base_lr` for `state`.
    pub fn factor(&self, state: TemporalState) -> f64 {
        match state {
            TemporalState::Stagnant => self.cfg.stagnant_factor,
            TemporalState::Living => self.cfg.living_factor,
            TemporalState::Awakening => self.cfg.awakening_factor,
            TemporalState::Quarantine => self.cfg.quarantine_factor,
        }
    }

    pub fn lr_for_state(&self, state: TemporalState) -> f64 {
        self.cfg.base_lr * self.factor(state)
    }

    /// Whether the caller should run one extra optimizer iteration on the
    /// same batch before moving on.
    pub fn should_bonus_step(&self, state: TemporalState) -> bool {
        match state {
            TemporalState::Awakening => self.cfg.awakening_bonus_step,
            TemporalState::Stagnant | TemporalState::Living | TemporalState::Quarantine => false,
        }
    }
}
