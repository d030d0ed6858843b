use serde::{Deserialize, Serialize};

use crate::config::AgentConfig;
use crate::engine::{CoherenceEngine, TickOutcome};
use crate::error::{ConfigError, InvalidSampleError};
use crate::memory::EpisodicMemory;
use crate::policy::PlasticityPolicy;
use crate::state::TemporalState;

/// Summary row for one agent's run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub steps: u64,
    pub age: f64,
    pub density: f64,
    pub stagnant: usize,
    pub living: usize,
    pub awakenings: usize,
    pub quarantines: usize,
}

/// One logical learner: an engine, its memory, and the policy reading both.
///
/// Each agent owns its state outright. Run as many as you like in parallel;
/// to share one across threads, wrap it in a lock.
#[derive(Clone, Debug)]
pub struct TemporalAgent {
    pub name: String,
    engine: CoherenceEngine,
    memory: EpisodicMemory,
    policy: PlasticityPolicy,
}

impl TemporalAgent {
    pub fn new(name: &str, cfg: AgentConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let agent = Self {
            name: name.to_string(),
            engine: CoherenceEngine::new(cfg.clock)?,
            memory: EpisodicMemory::from_config(&cfg.memory)?,
            policy: PlasticityPolicy::new(cfg.policy)?,
        };
        tracing::info!(
            agent = %agent.name,
            capacity = agent.memory.capacity(),
            "temporal agent ready"
        );
        Ok(agent)
    }

    /// Tick the engine and record the event.
    pub fn observe(&mut self, error: f64) -> Result<TickOutcome, InvalidSampleError> {
        self.observe_with(error, false)
    }

    /// Tick with the sample flagged as garbage by an upstream classifier.
    pub fn observe_quarantined(&mut self, error: f64) -> Result<TickOutcome, InvalidSampleError> {
        self.observe_with(error, true)
    }

    fn observe_with(
        &mut self,
        error: f64,
        quarantine: bool,
    ) -> Result<TickOutcome, InvalidSampleError> {
        let outcome = self.engine.tick(error, quarantine)?;
        self.memory.record(outcome.event);
        Ok(outcome)
    }

    pub fn lr_for_state(&self, state: TemporalState) -> f64 {
        self.policy.lr_for_state(state)
    }

    pub fn should_bonus_step(&self, state: TemporalState) -> bool {
        self.policy.should_bonus_step(state)
    }

    pub fn physical_steps(&self) -> u64 {
        self.engine.step_counter()
    }

    pub fn age(&self) -> f64 {
        self.engine.relational_age()
    }

    pub fn time_density(&self) -> f64 {
        self.engine.density()
    }

    pub fn engine(&self) -> &CoherenceEngine {
        &self.engine
    }

    pub fn memory(&self) -> &EpisodicMemory {
        &self.memory
    }

    pub fn policy(&self) -> &PlasticityPolicy {
        &self.policy
    }

    /// Counts cover the retained memory window only.
    pub fn stats(&self) -> AgentStats {
        let counts = self.memory.state_counts();
        AgentStats {
            name: self.name.clone(),
            steps: self.physical_steps(),
            age: self.age(),
            density: self.time_density(),
            stagnant: counts.stagnant,
            living: counts.living,
            awakenings: counts.awakening,
            quarantines: counts.quarantine,
        }
    }
}
