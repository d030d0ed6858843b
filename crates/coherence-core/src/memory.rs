//! Bounded episodic memory of classification events.
//!
//! A FIFO ring over `VecDeque` with one counter per state. Counters move on
//! insert and on eviction, so `count_state` is O(1) and always reflects only
//! the events still held.

use std::collections::VecDeque;
use std::collections::vec_deque;

use serde::{Deserialize, Serialize};

use crate::config::MemoryConfig;
use crate::error::ConfigError;
use crate::event::TemporalEvent;
use crate::state::TemporalState;

/// Per-state tallies over the retained window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub stagnant: usize,
    pub living: usize,
    pub awakening: usize,
    pub quarantine: usize,
}

impl StateCounts {
    pub fn total(&self) -> usize {
        self.stagnant + self.living + self.awakening + self.quarantine
    }
}

#[derive(Clone, Debug)]
pub struct EpisodicMemory {
    capacity: usize,
    events: VecDeque<TemporalEvent>,
    counts: [usize; 4],
    total_recorded: u64,
}

impl EpisodicMemory {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::from_config(&MemoryConfig { capacity })
    }

    pub fn from_config(cfg: &MemoryConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            capacity: cfg.capacity,
            events: VecDeque::with_capacity(cfg.capacity.min(1024)),
            counts: [0; 4],
            total_recorded: 0,
        })
    }

    /// Append an event, evicting the oldest once capacity is exceeded.
    pub fn record(&mut self, event: TemporalEvent) {
        self.counts[event.state().index()] += 1;
        self.events.push_back(event);
        self.total_recorded += 1;

        while self.events.len() > self.capacity {
            if let Some(evicted) = self.events.pop_front() {
                self.counts[evicted.state().index()] -= 1;
            }
        }
    }

    pub fn count_state(&self, state: TemporalState) -> usize {
        self.counts[state.index()]
    }

    pub fn state_counts(&self) -> StateCounts {
        StateCounts {
            stagnant: self.count_state(TemporalState::Stagnant),
            living: self.count_state(TemporalState::Living),
            awakening: self.count_state(TemporalState::Awakening),
            quarantine: self.count_state(TemporalState::Quarantine),
        }
    }

    /// Retained events, oldest first. Clone the iterator to walk it again.
    pub fn events(&self) -> Events<'_> {
        Events {
            inner: self.events.iter(),
        }
    }

    pub fn latest(&self) -> Option<&TemporalEvent> {
        self.events.back()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events ever recorded, evicted ones included.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }
}

/// Read-only, restartable view over the retained events.
#[derive(Clone, Debug)]
pub struct Events<'a> {
    inner: vec_deque::Iter<'a, TemporalEvent>,
}

impl<'a> Iterator for Events<'a> {
    type Item = &'a TemporalEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Events<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Events<'_> {}

impl<'a> IntoIterator for &'a EpisodicMemory {
    type Item = &'a TemporalEvent;
    type IntoIter = Events<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.events()
    }
}
