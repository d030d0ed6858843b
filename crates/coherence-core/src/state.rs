use std::fmt;

use serde::{Deserialize, Serialize};

/// Regime emitted per tick.
///
/// `Quarantine` is never produced by classification. It only appears when an
/// upstream noise classifier flags the sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemporalState {
    /// Change stayed under the dynamic threshold; no lived time passes.
    Stagnant,
    /// Moderate meaningful change; age advances proportionally.
    Living,
    /// Shift beyond the massive cutoff; age jumps by a bonus plus excess.
    Awakening,
    /// Externally flagged garbage; excluded from age and threshold.
    Quarantine,
}

impl TemporalState {
    pub const ALL: [TemporalState; 4] = [
        TemporalState::Stagnant,
        TemporalState::Living,
        TemporalState::Awakening,
        TemporalState::Quarantine,
    ];

    /// Dense index for per-state counter tables.
    pub const fn index(self) -> usize {
        match self {
            TemporalState::Stagnant => 0,
            TemporalState::Living => 1,
            TemporalState::Awakening => 2,
            TemporalState::Quarantine => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TemporalState::Stagnant => "STAGNANT",
            TemporalState::Living => "LIVING",
            TemporalState::Awakening => "AWAKENING",
            TemporalState::Quarantine => "QUARANTINE",
        }
    }

    /// True for states produced by the classifier (everything but quarantine).
    pub const fn is_classified(self) -> bool {
        !matches!(self, TemporalState::Quarantine)
    }
}

impl fmt::Display for TemporalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
