//! Short-lived emotional reactions that steer behavior decisions
//!
//! Emotions are triggered by witnessed events and decay over time. The
//! engine's situational cascade and the reference actions query them
//! through coarse predicates (`would_flee`, `would_call_police`) rather
//! than reading raw intensities.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Base lifetime of a full-intensity emotion (20 s)
const BASE_EMOTION_DURATION: u32 = 400;

/// Minimum lifetime so even faint emotions register for a moment
const MIN_EMOTION_DURATION: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum EmotionKind {
    #[display(fmt = "fear")]
    Fear,
    #[display(fmt = "suspicion")]
    Suspicion,
    #[display(fmt = "anger")]
    Anger,
    #[display(fmt = "relief")]
    Relief,
}

/// A single active emotion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emotion {
    pub kind: EmotionKind,
    /// 0.0 to 1.0
    pub intensity: f32,
    pub ticks_remaining: u32,
}

/// Active emotions for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionModel {
    active: Vec<Emotion>,
    /// Fear intensity at which the agent would rather run than think
    flee_threshold: f32,
}

impl Default for EmotionModel {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            flee_threshold: 0.6,
        }
    }
}

impl EmotionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger an emotion; a repeat trigger keeps the strongest intensity
    /// and the longest remaining lifetime
    pub fn trigger(&mut self, kind: EmotionKind, intensity: f32) {
        let intensity = intensity.clamp(0.0, 1.0);
        let duration =
            MIN_EMOTION_DURATION + (intensity * BASE_EMOTION_DURATION as f32) as u32;

        if let Some(existing) = self.active.iter_mut().find(|e| e.kind == kind) {
            existing.intensity = existing.intensity.max(intensity);
            existing.ticks_remaining = existing.ticks_remaining.max(duration);
        } else {
            self.active.push(Emotion {
                kind,
                intensity,
                ticks_remaining: duration,
            });
        }
    }

    /// Advance one tick; expired emotions are dropped
    pub fn tick(&mut self) {
        for emotion in &mut self.active {
            emotion.ticks_remaining = emotion.ticks_remaining.saturating_sub(1);
        }
        self.active.retain(|e| e.ticks_remaining > 0);
    }

    pub fn intensity_of(&self, kind: EmotionKind) -> f32 {
        self.active
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.intensity)
            .unwrap_or(0.0)
    }

    pub fn has_active_emotion(&self, kind: EmotionKind) -> bool {
        self.active.iter().any(|e| e.kind == kind)
    }

    pub fn strongest(&self) -> Option<&Emotion> {
        self.active
            .iter()
            .max_by(|a, b| a.intensity.partial_cmp(&b.intensity).unwrap())
    }

    pub fn would_flee(&self) -> bool {
        self.intensity_of(EmotionKind::Fear) >= self.flee_threshold
    }

    pub fn would_call_police(&self) -> bool {
        self.intensity_of(EmotionKind::Fear)
            .max(self.intensity_of(EmotionKind::Anger))
            >= 0.3
    }

    pub fn clear(&mut self, kind: EmotionKind) {
        self.active.retain(|e| e.kind != kind);
    }

    pub fn clear_all(&mut self) {
        self.active.clear();
    }

    pub fn set_flee_threshold(&mut self, threshold: f32) {
        self.flee_threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Emotion> {
        self.active.iter()
    }
}
