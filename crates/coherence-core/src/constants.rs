/// Base "meaningful change" threshold on the weighted coherence delta.
pub const BASE_THRESHOLD: f64 = 0.005;

/// Maturation strength: how fast the threshold grows with relational age.
pub const AGING_GAIN: f64 = 1.0;

/// Awakening cutoff as a multiple of the dynamic threshold.
pub const MASSIVE_MULTIPLIER: f64 = 3.0;

/// Age credit per unit of excess delta in the LIVING regime.
pub const LIVING_GAIN: f64 = 1.0;

/// Age credit per unit of excess delta in the AWAKENING regime.
pub const AWAKENING_GAIN: f64 = 8.0;

/// Fixed extra age credit granted on every awakening.
pub const AWAKENING_AGE_BONUS: f64 = 2.0;

/// EMA factor for the reactive part of the threshold.
/// Small is stable, large is reactive.
pub const SMOOTHING_ALPHA: f64 = 0.12;

/// Weight of the smoothed delta in the dynamic threshold.
pub const REACTIVE_COEFFICIENT: f64 = 0.25;

/// Steepness of the logistic gate applied to non-zero age gain.
pub const GATE_STEEPNESS: f64 = 10.0;

/// Numerical floor for the coherence weight.
pub const EPSILON: f64 = 1e-12;

/// Default episodic memory capacity.
pub const MEMORY_CAPACITY: usize = 5000;

/// Default base learning rate handed to the optimizer.
pub const BASE_LR: f64 = 1e-3;

/// Learning-rate multiplier while the regime is stagnant.
pub const STAGNANT_FACTOR: f64 = 0.25;

/// Learning-rate multiplier while the regime is living.
pub const LIVING_FACTOR: f64 = 1.0;

/// Learning-rate multiplier on awakening.
pub const AWAKENING_FACTOR: f64 = 3.0;

/// Learning-rate multiplier for quarantined samples (no learning from garbage).
pub const QUARANTINE_FACTOR: f64 = 0.0;
