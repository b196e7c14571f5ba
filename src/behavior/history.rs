//! Ring buffer of recently run actions, for diagnostics only
//!
//! The engine appends an entry on every switch; nothing in the decision
//! logic reads it back.

use crate::core::types::Tick;
use serde::Serialize;
use std::collections::VecDeque;

/// One recorded action start
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub action: String,
    pub tick: Tick,
}

/// Bounded history of action starts; oldest entries are dropped
#[derive(Debug, Clone, Serialize)]
pub struct ActionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ActionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, action: impl Into<String>, tick: Tick) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            action: action.into(),
            tick,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
