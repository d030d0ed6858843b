//! Parameter sets for the engine, policy and memory.
//!
//! Every struct deserializes with `#[serde(default)]`, so a TOML file only
//! needs the keys it overrides. Nothing downstream accepts an unvalidated
//! config: `CoherenceEngine::new`, `PlasticityPolicy::new` and
//! `EpisodicMemory::new` all call `validate` first.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{ConfigError, Result};

/// Classifier and maturation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Base threshold for a meaningful weighted coherence change. > 0.
    pub base_threshold: f64,
    /// Maturation strength. >= 0; zero disables aging.
    pub aging_gain: f64,
    /// Awakening cutoff relative to the dynamic threshold. > 1.
    pub massive_multiplier: f64,
    pub living_gain: f64,
    pub awakening_gain: f64,
    /// Fixed age credit on awakening (before gating).
    pub awakening_age_bonus: f64,
    /// EMA factor for the reactive threshold term. In (0, 1).
    pub smoothing_alpha: f64,
    /// Per-tick ceiling on age gain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_gain: Option<f64>,
    /// Floor for the coherence weight. > 0.
    pub epsilon: f64,
    /// Logistic gate steepness. > 0.
    pub gate_steepness: f64,
    /// Weight of `ema_delta` in the dynamic threshold. >= 0.
    pub reactive_coefficient: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            base_threshold: constants::BASE_THRESHOLD,
            aging_gain: constants::AGING_GAIN,
            massive_multiplier: constants::MASSIVE_MULTIPLIER,
            living_gain: constants::LIVING_GAIN,
            awakening_gain: constants::AWAKENING_GAIN,
            awakening_age_bonus: constants::AWAKENING_AGE_BONUS,
            smoothing_alpha: constants::SMOOTHING_ALPHA,
            max_age_gain: None,
            epsilon: constants::EPSILON,
            gate_steepness: constants::GATE_STEEPNESS,
            reactive_coefficient: constants::REACTIVE_COEFFICIENT,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<()> {
        positive("base_threshold", self.base_threshold)?;
        non_negative("aging_gain", self.aging_gain)?;
        finite("massive_multiplier", self.massive_multiplier)?;
        if self.massive_multiplier <= 1.0 {
            return Err(ConfigError::invalid(
                "massive_multiplier",
                self.massive_multiplier,
                "must be greater than 1",
            ));
        }
        non_negative("living_gain", self.living_gain)?;
        non_negative("awakening_gain", self.awakening_gain)?;
        non_negative("awakening_age_bonus", self.awakening_age_bonus)?;
        finite("smoothing_alpha", self.smoothing_alpha)?;
        if self.smoothing_alpha <= 0.0 || self.smoothing_alpha >= 1.0 {
            return Err(ConfigError::invalid(
                "smoothing_alpha",
                self.smoothing_alpha,
                "must lie in (0, 1)",
            ));
        }
        if let Some(cap) = self.max_age_gain {
            non_negative("max_age_gain", cap)?;
        }
        positive("epsilon", self.epsilon)?;
        positive("gate_steepness", self.gate_steepness)?;
        non_negative("reactive_coefficient", self.reactive_coefficient)?;
        Ok(())
    }
}

/// State → learning-rate mapping parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub base_lr: f64,
    pub stagnant_factor: f64,
    pub living_factor: f64,
    pub awakening_factor: f64,
    pub quarantine_factor: f64,
    /// Ask the caller for one extra optimizer iteration on awakening.
    pub awakening_bonus_step: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            base_lr: constants::BASE_LR,
            stagnant_factor: constants::STAGNANT_FACTOR,
            living_factor: constants::LIVING_FACTOR,
            awakening_factor: constants::AWAKENING_FACTOR,
            quarantine_factor: constants::QUARANTINE_FACTOR,
            awakening_bonus_step: true,
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        positive("base_lr", self.base_lr)?;
        non_negative("stagnant_factor", self.stagnant_factor)?;
        non_negative("living_factor", self.living_factor)?;
        non_negative("awakening_factor", self.awakening_factor)?;
        non_negative("quarantine_factor", self.quarantine_factor)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: constants::MEMORY_CAPACITY,
        }
    }
}

impl MemoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity(self.capacity));
        }
        Ok(())
    }
}

/// Everything one agent needs, loadable from a single TOML document:
///
/// ```toml
/// [clock]
/// base_threshold = 0.005
/// max_age_gain = 5.0
///
/// [policy]
/// base_lr = 0.001
///
/// [memory]
/// capacity = 1000
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub clock: ClockConfig,
    pub policy: PolicyConfig,
    pub memory: MemoryConfig,
}

impl AgentConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: AgentConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&content)?;
        tracing::debug!("loaded agent config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.clock.validate()?;
        self.policy.validate()?;
        self.memory.validate()
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value, "must be finite"))
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value, "must be positive"))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value, "must not be negative"))
    }
}
