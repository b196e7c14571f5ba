//! Engine configuration with documented constants
//!
//! All tunables of the behavior engine are collected here with explanations
//! of their purpose and how they interact with each other. Durations are in
//! ticks; the simulation runs at [`TICKS_PER_SECOND`].

use crate::core::error::{HearthwardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of simulation ticks per simulated second
pub const TICKS_PER_SECOND: u32 = 20;

/// Configuration for a behavior engine instance
///
/// These values have been tuned so that agents react promptly to danger
/// without thrashing between actions. Changing them affects pacing and feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === SCHEDULER ===
    /// Ticks between decision passes
    ///
    /// The engine only re-evaluates the best action at this cadence;
    /// external triggers can still switch actions at any tick. Lower values
    /// mean snappier agents at the cost of running `can_run` across the
    /// pool more often.
    pub decision_interval: u32,

    /// Ticks the emergency flag stays set after entering an emergency state
    ///
    /// At 200 (10 s), an agent that fled stays "rattled" long enough to
    /// refuse interactions even after the flee action itself completes.
    pub emergency_duration: u32,

    /// Ticks before an agent accepts another interaction
    ///
    /// Prevents rapid re-interaction from monopolizing an agent.
    pub interaction_cooldown: u32,

    /// Probability per decision pass that a curious agent starts investigating
    ///
    /// Applied only after the trait model already said the agent would
    /// investigate, so most curious agents still go about their business.
    pub investigate_chance: f32,

    /// Capacity of the diagnostic ring buffer of recently run actions
    pub history_capacity: usize,

    /// Seed for the engine's deterministic RNG
    ///
    /// Per-agent engines should get distinct seeds or all curious agents
    /// investigate in lockstep.
    pub rng_seed: u64,

    /// Intensity of the fear spike applied when an emergency begins
    pub fear_spike: f32,

    // === FLEE ===
    /// Distance in world units a fleeing agent tries to put between itself
    /// and the threat
    pub flee_distance: f32,

    /// Movement speed while fleeing (units per tick)
    pub flee_speed: f32,

    /// If the threat closes within this distance, the flee direction is
    /// recomputed
    pub flee_repath_distance: f32,

    /// Ticks without navigation progress before a fleeing agent picks a new
    /// random direction at half distance
    pub flee_stall_ticks: u32,

    /// Safety need level above which fleeing completes
    pub flee_safety_threshold: f32,

    /// Hard timeout for the flee action (60 s)
    pub flee_timeout: u32,

    // === ALERT ===
    /// Wind-up before the alert fires (2 s of shouting/waving)
    pub alert_windup: u32,

    /// Total duration of the alert action; it always ends by this timeout
    pub alert_duration: u32,

    /// Radius within which authority actors are redirected toward the
    /// offender
    pub authority_radius: f32,

    // === INVESTIGATE ===
    /// Ticks spent looking around after arriving at the point of interest
    pub investigate_look_duration: u32,

    /// Hard timeout for the investigate action
    pub investigate_timeout: u32,

    /// Radius for the synthesized point of interest when no target is known
    pub investigate_wander_radius: f32,

    // === HIDE ===
    /// Safety need level above which hiding completes
    ///
    /// Intentionally below `flee_safety_threshold`: an agent leaves its
    /// hiding spot sooner than it stops running.
    pub hide_safety_threshold: f32,

    /// Hard timeout for the hide action (2 min)
    pub hide_timeout: u32,

    /// Radius for the synthesized hiding spot when the agent has no home
    pub hide_fallback_radius: f32,

    // === MOVEMENT ===
    /// Ordinary walking speed (units per tick)
    pub walk_speed: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decision_interval: 10,
            emergency_duration: 10 * TICKS_PER_SECOND,
            interaction_cooldown: 5 * TICKS_PER_SECOND,
            investigate_chance: 0.3,
            history_capacity: 16,
            rng_seed: 0,
            fear_spike: 0.8,

            flee_distance: 24.0,
            flee_speed: 0.5,
            flee_repath_distance: 10.0,
            flee_stall_ticks: 20,
            flee_safety_threshold: 70.0,
            flee_timeout: 60 * TICKS_PER_SECOND,

            alert_windup: 2 * TICKS_PER_SECOND,
            alert_duration: 10 * TICKS_PER_SECOND,
            authority_radius: 48.0,

            investigate_look_duration: 5 * TICKS_PER_SECOND,
            investigate_timeout: 30 * TICKS_PER_SECOND,
            investigate_wander_radius: 8.0,

            hide_safety_threshold: 60.0,
            hide_timeout: 120 * TICKS_PER_SECOND,
            hide_fallback_radius: 12.0,

            walk_speed: 0.3,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for
    /// unspecified fields
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.decision_interval == 0 {
            return Err(HearthwardError::InvalidConfig(
                "decision_interval must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.investigate_chance) {
            return Err(HearthwardError::InvalidConfig(format!(
                "investigate_chance ({}) must be within 0.0..=1.0",
                self.investigate_chance
            )));
        }
        if self.history_capacity == 0 {
            return Err(HearthwardError::InvalidConfig(
                "history_capacity must be at least 1".into(),
            ));
        }
        if self.hide_safety_threshold > self.flee_safety_threshold {
            return Err(HearthwardError::InvalidConfig(format!(
                "hide_safety_threshold ({}) should be <= flee_safety_threshold ({})",
                self.hide_safety_threshold, self.flee_safety_threshold
            )));
        }
        if self.flee_repath_distance >= self.flee_distance {
            return Err(HearthwardError::InvalidConfig(format!(
                "flee_repath_distance ({}) should be < flee_distance ({})",
                self.flee_repath_distance, self.flee_distance
            )));
        }
        Ok(())
    }
}
