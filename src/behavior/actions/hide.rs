//! Retreat somewhere safe until the danger passes

use crate::agent::Agent;
use crate::behavior::action::{Action, ActionCtx};
use crate::behavior::priority::PriorityLevel;
use crate::behavior::state::BehaviorState;
use crate::core::config::EngineConfig;
use crate::core::types::random_direction;
use crate::world::WorldView;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Head home (or to a synthesized nearby spot) and stay put until the
/// safety need recovers
pub struct HideAction {
    safety_threshold: f32,
    timeout: u32,
    walk_speed: f32,
    fallback_radius: f32,
    rng: ChaCha8Rng,
}

impl HideAction {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            safety_threshold: config.hide_safety_threshold,
            timeout: config.hide_timeout,
            walk_speed: config.walk_speed,
            fallback_radius: config.hide_fallback_radius,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed.wrapping_add(3)),
        }
    }
}

impl Action for HideAction {
    fn id(&self) -> &str {
        "hide"
    }

    fn display_name(&self) -> &str {
        "Hide"
    }

    fn priority(&self) -> PriorityLevel {
        PriorityLevel::High
    }

    fn result_state(&self) -> BehaviorState {
        BehaviorState::Hiding
    }

    fn max_duration_ticks(&self) -> Option<u32> {
        Some(self.timeout)
    }

    fn can_run(&self, agent: &Agent, _world: &WorldView) -> bool {
        agent.needs.safety() < self.safety_threshold
    }

    fn start(&mut self, agent: &mut Agent, _world: &mut WorldView, _ctx: &ActionCtx) {
        let destination = agent.home.unwrap_or_else(|| {
            agent.position + random_direction(&mut self.rng) * self.fallback_radius
        });
        agent.navigation.navigate_to(destination, self.walk_speed);
        tracing::debug!(agent = %agent.name, ?destination, "hiding");
    }

    fn step(&mut self, agent: &mut Agent, _world: &mut WorldView, _ctx: &ActionCtx) -> bool {
        agent.needs.safety() <= self.safety_threshold
    }

    fn stop(&mut self, agent: &mut Agent, _world: &mut WorldView, _interrupted: bool) {
        agent.navigation.stop();
    }
}
