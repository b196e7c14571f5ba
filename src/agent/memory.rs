//! Per-actor memories and reputation tags
//!
//! Agents remember what other actors did to them or near them. Each actor
//! gets a bounded record of weighted entries; the weakest entry is evicted
//! when a stronger one arrives. Salience decays over time so old grudges
//! fade unless refreshed.

use crate::core::types::ActorId;
use ahash::AHashMap;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Per-tick salience multiplier; at 0.9995 a memory fades to ~5% of its
/// weight in about two simulated minutes
const SALIENCE_DECAY: f32 = 0.9995;

/// Salience below which an entry is forgotten entirely
const SALIENCE_FLOOR: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MemoryKind {
    #[display(fmt = "witnessed_crime")]
    WitnessedCrime,
    #[display(fmt = "threatened")]
    Threatened,
    #[display(fmt = "suspicious_activity")]
    SuspiciousActivity,
    #[display(fmt = "conversation")]
    Conversation,
}

/// One remembered event involving another actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub kind: MemoryKind,
    pub note: String,
    /// How impactful the event was (0.0 to 1.0)
    pub weight: f32,
    /// Current importance, decays over time (0.0 to 1.0)
    pub salience: f32,
}

impl MemoryEntry {
    pub fn weighted_importance(&self) -> f32 {
        self.weight * self.salience
    }
}

/// Everything one agent remembers about a specific actor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorRecord {
    pub entries: Vec<MemoryEntry>,
    pub tags: Vec<String>,
}

/// Memory store for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryModel {
    records: AHashMap<ActorId, ActorRecord>,
    max_entries_per_actor: usize,
}

impl Default for MemoryModel {
    fn default() -> Self {
        Self {
            records: AHashMap::new(),
            max_entries_per_actor: 8,
        }
    }
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event about `actor`; evicts the weakest existing entry if
    /// the record is full and the new entry is stronger
    pub fn add_memory(
        &mut self,
        actor: ActorId,
        kind: MemoryKind,
        note: impl Into<String>,
        weight: f32,
    ) {
        let entry = MemoryEntry {
            kind,
            note: note.into(),
            weight: weight.clamp(0.0, 1.0),
            salience: 1.0,
        };
        let record = self.records.entry(actor).or_default();

        if record.entries.len() >= self.max_entries_per_actor {
            if let Some(pos) = record
                .entries
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    a.weighted_importance()
                        .partial_cmp(&b.weighted_importance())
                        .unwrap()
                })
                .map(|(i, _)| i)
            {
                if record.entries[pos].weighted_importance() < entry.weighted_importance() {
                    record.entries.remove(pos);
                } else {
                    return;
                }
            }
        }
        record.entries.push(entry);
    }

    /// Attach a reputation tag to an actor; duplicates are ignored
    pub fn add_tag(&mut self, actor: ActorId, tag: impl Into<String>) {
        let tag = tag.into();
        let record = self.records.entry(actor).or_default();
        if !record.tags.contains(&tag) {
            record.tags.push(tag);
        }
    }

    pub fn has_tag(&self, actor: ActorId, tag: &str) -> bool {
        self.records
            .get(&actor)
            .map(|r| r.tags.iter().any(|t| t == tag))
            .unwrap_or(false)
    }

    pub fn record(&self, actor: ActorId) -> Option<&ActorRecord> {
        self.records.get(&actor)
    }

    /// Total weighted importance of everything remembered about an actor
    pub fn weight_against(&self, actor: ActorId) -> f32 {
        self.records
            .get(&actor)
            .map(|r| r.entries.iter().map(|e| e.weighted_importance()).sum())
            .unwrap_or(0.0)
    }

    /// Per-tick salience decay; fully faded entries are dropped, empty
    /// untagged records are removed
    pub fn decay_tick(&mut self) {
        for record in self.records.values_mut() {
            for entry in &mut record.entries {
                entry.salience *= SALIENCE_DECAY;
            }
            record.entries.retain(|e| e.salience > SALIENCE_FLOOR);
        }
        self.records
            .retain(|_, r| !r.entries.is_empty() || !r.tags.is_empty());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
