//! Physical and social needs consumed by the decision engine
//!
//! Needs are satisfaction levels on a 0-100 scale: 100 means fully safe,
//! fed, rested or socially content; 0 is desperate. The engine only reads
//! them; external events (threats, completed actions) write them.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum NeedKind {
    #[display(fmt = "safety")]
    Safety,
    #[display(fmt = "food")]
    Food,
    #[display(fmt = "rest")]
    Rest,
    #[display(fmt = "social")]
    Social,
}

/// Need satisfaction levels for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeedsModel {
    safety: f32,
    food: f32,
    rest: f32,
    social: f32,
    /// Below this level a need counts as critical
    critical_threshold: f32,
    /// Passive safety recovery per tick once the danger is gone
    safety_recovery: f32,
}

impl Default for NeedsModel {
    fn default() -> Self {
        Self {
            safety: 100.0,
            food: 80.0,
            rest: 80.0,
            social: 70.0,
            critical_threshold: 20.0,
            safety_recovery: 0.05,
        }
    }
}

impl NeedsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: NeedKind) -> f32 {
        match kind {
            NeedKind::Safety => self.safety,
            NeedKind::Food => self.food,
            NeedKind::Rest => self.rest,
            NeedKind::Social => self.social,
        }
    }

    pub fn safety(&self) -> f32 {
        self.safety
    }

    pub fn is_critical(&self, kind: NeedKind) -> bool {
        self.get(kind) < self.critical_threshold
    }

    pub fn modify(&mut self, kind: NeedKind, delta: f32) {
        let slot = match kind {
            NeedKind::Safety => &mut self.safety,
            NeedKind::Food => &mut self.food,
            NeedKind::Rest => &mut self.rest,
            NeedKind::Social => &mut self.social,
        };
        *slot = (*slot + delta).clamp(0.0, 100.0);
    }

    pub fn modify_safety(&mut self, delta: f32) {
        self.modify(NeedKind::Safety, delta);
    }

    pub fn set(&mut self, kind: NeedKind, value: f32) {
        let slot = match kind {
            NeedKind::Safety => &mut self.safety,
            NeedKind::Food => &mut self.food,
            NeedKind::Rest => &mut self.rest,
            NeedKind::Social => &mut self.social,
        };
        *slot = value.clamp(0.0, 100.0);
    }

    /// Need with the lowest satisfaction
    pub fn most_pressing(&self) -> (NeedKind, f32) {
        [
            (NeedKind::Safety, self.safety),
            (NeedKind::Food, self.food),
            (NeedKind::Rest, self.rest),
            (NeedKind::Social, self.social),
        ]
        .into_iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .unwrap()
    }

    /// Per-tick drift: safety recovers, the rest erode slowly
    pub fn tick(&mut self) {
        self.safety = (self.safety + self.safety_recovery).min(100.0);
        self.food = (self.food - 0.010).max(0.0);
        self.rest = (self.rest - 0.008).max(0.0);
        self.social = (self.social - 0.006).max(0.0);
    }
}
