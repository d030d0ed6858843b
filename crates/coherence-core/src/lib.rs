//! Temporal coherence engine.
//!
//! Turns a stream of prediction errors into regime states (stagnant, living,
//! awakening, quarantine) and a relational age that only advances when the
//! error changes meaningfully. A plasticity policy maps each state to a
//! learning-rate multiplier, and a bounded episodic memory keeps the recent
//! history of classifications.
//!
//! Zero I/O on the tick path. Config files are read only when asked for.

pub mod agent;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod event;
pub mod memory;
pub mod policy;
pub mod state;

pub use agent::{AgentStats, TemporalAgent};
pub use config::{AgentConfig, ClockConfig, MemoryConfig, PolicyConfig};
pub use engine::{CoherenceEngine, EngineState, TickOutcome};
pub use error::{ConfigError, InvalidSampleError};
pub use event::TemporalEvent;
pub use memory::{EpisodicMemory, Events, StateCounts};
pub use policy::PlasticityPolicy;
pub use state::TemporalState;
