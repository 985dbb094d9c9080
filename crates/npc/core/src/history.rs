//! Bounded decision history.

use std::collections::VecDeque;

use crate::{Mode, Strategy};

/// Maximum number of records kept per agent.
pub const HISTORY_CAPACITY: usize = 100;

/// Snapshot of one completed think cycle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionRecord {
    /// Simulation time in seconds.
    pub timestamp: f32,
    pub strategy: Strategy,
    pub state: Mode,
    pub threat_level: f32,
    pub health_percent: f32,
    pub confidence: f32,
}

/// FIFO log of [`DecisionRecord`]s; the oldest entry is evicted once full.
#[derive(Clone, Debug)]
pub struct DecisionHistory {
    records: VecDeque<DecisionRecord>,
    capacity: usize,
}

impl Default for DecisionHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl DecisionHistory {
    /// Records are allocated on first push, not up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, record: DecisionRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&DecisionRecord> {
        self.records.back()
    }

    pub fn oldest(&self) -> Option<&DecisionRecord> {
        self.records.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecisionRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: f32) -> DecisionRecord {
        DecisionRecord {
            timestamp,
            strategy: Strategy::Aggressive,
            state: Mode::Combat,
            threat_level: 0.5,
            health_percent: 1.0,
            confidence: 0.8,
        }
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let mut history = DecisionHistory::default();
        for i in 0..=HISTORY_CAPACITY {
            history.push(record(i as f32));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.oldest().map(|r| r.timestamp), Some(1.0));
        assert_eq!(
            history.latest().map(|r| r.timestamp),
            Some(HISTORY_CAPACITY as f32)
        );
    }

    #[test]
    fn empty_history_holds_no_buffer() {
        let history = DecisionHistory::default();
        assert_eq!(history.records.capacity(), 0);
        assert_eq!(history.capacity(), HISTORY_CAPACITY);
    }
}
