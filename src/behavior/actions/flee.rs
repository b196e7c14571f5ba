//! Run away from a threat

use crate::agent::Agent;
use crate::behavior::action::{Action, ActionCtx};
use crate::behavior::priority::PriorityLevel;
use crate::behavior::state::BehaviorState;
use crate::core::config::EngineConfig;
use crate::core::types::{random_direction, Vec2};
use crate::world::WorldView;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Put distance between the agent and its target threat
///
/// Picks a heading directly away from the threat (random when no threat
/// handle is set), re-aims if the threat closes in, and breaks out of dead
/// ends by trying a fresh random heading at half distance once navigation
/// stalls. Completes when the agent feels safe again or has clearly
/// outrun the threat.
pub struct FleeAction {
    flee_distance: f32,
    speed: f32,
    repath_distance: f32,
    stall_ticks: u32,
    safety_threshold: f32,
    timeout: u32,
    rng: ChaCha8Rng,
}

impl FleeAction {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            flee_distance: config.flee_distance,
            speed: config.flee_speed,
            repath_distance: config.flee_repath_distance,
            stall_ticks: config.flee_stall_ticks,
            safety_threshold: config.flee_safety_threshold,
            timeout: config.flee_timeout,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed.wrapping_add(1)),
        }
    }

    fn heading_away(&mut self, from: Vec2, threat: Vec2) -> Vec2 {
        let away = from - threat;
        if away.length() > 0.0001 {
            away.normalize()
        } else {
            // standing exactly on the threat; any direction will do
            random_direction(&mut self.rng)
        }
    }
}

impl Action for FleeAction {
    fn id(&self) -> &str {
        "flee"
    }

    fn display_name(&self) -> &str {
        "Flee"
    }

    fn priority(&self) -> PriorityLevel {
        PriorityLevel::Critical
    }

    fn result_state(&self) -> BehaviorState {
        BehaviorState::Fleeing
    }

    fn max_duration_ticks(&self) -> Option<u32> {
        Some(self.timeout)
    }

    fn can_run(&self, agent: &Agent, _world: &WorldView) -> bool {
        agent.emotions.would_flee()
    }

    fn start(&mut self, agent: &mut Agent, world: &mut WorldView, ctx: &ActionCtx) {
        let heading = match ctx.target.and_then(|t| world.actor_position(t)) {
            Some(threat) => self.heading_away(agent.position, threat),
            None => random_direction(&mut self.rng),
        };
        let destination = agent.position + heading * self.flee_distance;
        agent.navigation.navigate_to(destination, self.speed);
        tracing::debug!(agent = %agent.name, ?destination, "fleeing");
    }

    fn step(&mut self, agent: &mut Agent, world: &mut WorldView, ctx: &ActionCtx) -> bool {
        if agent.needs.safety() > self.safety_threshold {
            return false;
        }

        if let Some(threat) = ctx.target.and_then(|t| world.actor_position(t)) {
            let distance = agent.position.distance(&threat);
            if distance > self.flee_distance * 1.5 {
                return false;
            }
            if distance < self.repath_distance {
                let heading = self.heading_away(agent.position, threat);
                agent
                    .navigation
                    .navigate_to(agent.position + heading * self.flee_distance, self.speed);
            }
        }

        if agent.navigation.ticks_without_progress() >= self.stall_ticks {
            let heading = random_direction(&mut self.rng);
            let destination = agent.position + heading * (self.flee_distance * 0.5);
            agent.navigation.navigate_to(destination, self.speed);
            tracing::debug!(agent = %agent.name, "flee path stalled, rerouting");
        }

        true
    }

    fn stop(&mut self, agent: &mut Agent, _world: &mut WorldView, _interrupted: bool) {
        agent.navigation.stop();
    }
}
