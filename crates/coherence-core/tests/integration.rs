//! Integration tests exercising the full pipeline:
//! error stream → engine → memory → policy, across module boundaries.

use approx::assert_relative_eq;
use coherence_core::{
    AgentConfig, ClockConfig, CoherenceEngine, ConfigError, EpisodicMemory, TemporalAgent,
    TemporalState,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn scenario_config() -> ClockConfig {
    ClockConfig {
        base_threshold: 0.005,
        aging_gain: 1.0,
        massive_multiplier: 3.0,
        living_gain: 1.0,
        awakening_gain: 8.0,
        awakening_age_bonus: 2.0,
        smoothing_alpha: 0.12,
        ..Default::default()
    }
}

/// Test 1: the reference loss sequence. Small wobble around 0.20 barely
/// registers, the jump to 0.60 awakens the engine.
#[test]
fn reference_sequence_awakens_on_jump() {
    let mut engine = CoherenceEngine::new(scenario_config()).unwrap();
    let mut memory = EpisodicMemory::new(16).unwrap();

    let losses = [0.20, 0.21, 0.19, 0.20, 0.60];
    let mut outcomes = Vec::new();
    for &loss in &losses {
        let out = engine.tick(loss, false).unwrap();
        memory.record(out.event);
        outcomes.push(out);
    }

    assert_eq!(outcomes[0].state, TemporalState::Living);
    assert_eq!(outcomes[0].relational_age, 0.0);

    // The wobble never reaches the awakening cutoff and adds negligible age.
    for out in &outcomes[1..4] {
        assert_ne!(out.state, TemporalState::Awakening);
        assert!(out.relational_age < 0.01, "age {}", out.relational_age);
    }

    let last = outcomes[4];
    assert_eq!(last.state, TemporalState::Awakening);
    assert!(last.relational_age > 2.0);
    assert_relative_eq!(last.relational_age, 2.258_762_224_874, epsilon = 1e-9);
    assert_relative_eq!(last.density, last.relational_age / 5.0);
    assert_eq!(engine.step_counter(), 5);

    assert_eq!(memory.len(), 5);
    assert_eq!(memory.count_state(TemporalState::Awakening), 1);
    let steps: Vec<u64> = memory.events().map(|e| e.step()).collect();
    assert_eq!(steps, vec![1, 2, 3, 4, 5]);
}

/// Test 2: a constant stream never ages after the seeding tick.
#[test]
fn stationary_stream_stagnates() {
    let mut agent = TemporalAgent::new("flat", AgentConfig::default()).unwrap();
    agent.observe(0.37).unwrap();
    for _ in 0..200 {
        let out = agent.observe(0.37).unwrap();
        assert_eq!(out.state, TemporalState::Stagnant);
        assert_eq!(out.age_gain, 0.0);
    }
    assert_eq!(agent.age(), 0.0);
    assert_eq!(agent.time_density(), 0.0);
    assert_eq!(agent.memory().count_state(TemporalState::Stagnant), 200);
}

/// Test 3: a shock after a long flat baseline awakens with more than the
/// fixed bonus, and the policy asks for a bonus step.
#[test]
fn shock_after_baseline_awakens() {
    let mut agent = TemporalAgent::new("shock", AgentConfig::default()).unwrap();
    for _ in 0..30 {
        agent.observe(0.0).unwrap();
    }
    let out = agent.observe(1.0).unwrap();
    assert_eq!(out.state, TemporalState::Awakening);
    assert!(out.weighted_delta >= 3.0 * out.threshold);
    assert!(out.age_gain > agent.engine().config().awakening_age_bonus);
    assert!(agent.should_bonus_step(out.state));
    assert_relative_eq!(agent.lr_for_state(out.state), 3e-3);
}

/// Test 4: a quarantine window in the middle of a noisy stream changes
/// neither age nor the adaptive threshold, but is counted and stepped.
#[test]
fn quarantine_window_is_isolated() {
    let mut rng = rng();
    let mut agent = TemporalAgent::new("noise", AgentConfig::default()).unwrap();
    for _ in 0..50 {
        agent.observe(0.3 + rng.random_range(-0.05..0.05)).unwrap();
    }
    let before = agent.engine().state();

    for _ in 0..20 {
        let garbage = 200.0 + rng.random_range(-50.0..50.0);
        let out = agent.observe_quarantined(garbage).unwrap();
        assert_eq!(out.state, TemporalState::Quarantine);
        assert_eq!(agent.lr_for_state(out.state), 0.0);
    }

    let after = agent.engine().state();
    assert_eq!(after.step_counter, before.step_counter + 20);
    assert_eq!(after.relational_age, before.relational_age);
    assert_eq!(after.ema_delta, before.ema_delta);
    assert_eq!(after.prev_signal, before.prev_signal);
    assert_eq!(agent.stats().quarantines, 20);
}

/// Test 5: memory bound over a long run keeps only the newest window and
/// counts match a recount of that window.
#[test]
fn memory_bound_over_long_run() {
    let mut rng = rng();
    let cfg = AgentConfig::from_toml_str("[memory]\ncapacity = 64\n").unwrap();
    let mut agent = TemporalAgent::new("bounded", cfg).unwrap();

    for i in 0..500 {
        let err = if i % 97 == 0 {
            5.0
        } else {
            0.2 + rng.random_range(0.0..0.02)
        };
        if i % 13 == 0 {
            agent.observe_quarantined(err).unwrap();
        } else {
            agent.observe(err).unwrap();
        }
    }

    let memory = agent.memory();
    assert_eq!(memory.len(), 64);
    assert_eq!(memory.total_recorded(), 500);
    assert_eq!(memory.events().next().map(|e| e.step()), Some(437));
    for state in TemporalState::ALL {
        let recount = memory.events().filter(|e| e.state() == state).count();
        assert_eq!(memory.count_state(state), recount, "state {state}");
    }
}

/// Test 6: rejection leaves everything as it was, and the stream can continue.
#[test]
fn nan_rejected_then_stream_continues() {
    let mut agent = TemporalAgent::new("nan", AgentConfig::default()).unwrap();
    agent.observe(0.4).unwrap();
    agent.observe(0.9).unwrap();
    let steps = agent.physical_steps();
    let age = agent.age();

    let err = agent.observe(f64::NAN).unwrap_err();
    assert!(err.value.is_nan());
    assert_eq!(agent.physical_steps(), steps);
    assert_eq!(agent.age(), age);
    assert_eq!(agent.memory().len(), 2);

    agent.observe(0.9).unwrap();
    assert_eq!(agent.physical_steps(), steps + 1);
}

/// Test 7: the regime-shift benchmark shape. A shifted stream lives more
/// than a flat one, and awakenings cluster at the shift.
#[test]
fn shift_ages_more_than_stagnation() {
    let mut rng = rng();
    let mut flat = TemporalAgent::new("A: stagnation", AgentConfig::default()).unwrap();
    let mut shift = TemporalAgent::new("B: shift", AgentConfig::default()).unwrap();

    let mut first_awakening = None;
    for step in 1..=200u64 {
        flat.observe(0.5).unwrap();
        let base = if step < 120 { 0.5 } else { 3.0 };
        let out = shift.observe(base + rng.random_range(-0.005..0.005)).unwrap();
        if out.state == TemporalState::Awakening && first_awakening.is_none() {
            first_awakening = Some(step);
        }
    }

    assert_eq!(flat.stats().age, 0.0);
    assert!(shift.stats().age > flat.stats().age);
    assert_eq!(first_awakening, Some(120));
}

/// Test 8: config file round trip through the filesystem.
#[test]
fn load_config_from_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("agent.toml");
    std::fs::write(
        &path,
        "[clock]\nmax_age_gain = 0.75\n\n[policy]\nbase_lr = 0.01\nawakening_bonus_step = false\n",
    )?;

    let cfg = AgentConfig::load(&path)?;
    let mut agent = TemporalAgent::new("file", cfg)?;
    agent.observe(0.0)?;
    let out = agent.observe(1.0)?;
    assert_eq!(out.state, TemporalState::Awakening);
    assert_eq!(out.age_gain, 0.75);
    assert!(!agent.should_bonus_step(out.state));
    assert_relative_eq!(agent.lr_for_state(TemporalState::Living), 0.01);
    Ok(())
}

/// Test 9: a bad file fails setup before anything is built.
#[test]
fn invalid_config_file_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[clock]\nbase_threshold = -1.0\n").unwrap();
    let err = AgentConfig::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidParameter {
            name: "base_threshold",
            ..
        }
    ));
}

/// Test 10: events serialize for diagnostics dumps.
#[test]
fn memory_dump_as_json() {
    let mut agent = TemporalAgent::new("dump", AgentConfig::default()).unwrap();
    for loss in [0.1, 0.1, 0.8] {
        agent.observe(loss).unwrap();
    }
    let events: Vec<_> = agent.memory().events().collect();
    let json = serde_json::to_string(&events).unwrap();
    assert!(json.contains("\"AWAKENING\""));
    let stats = serde_json::to_value(agent.stats()).unwrap();
    assert_eq!(stats["steps"], 3);
}
