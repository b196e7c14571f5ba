//! Check out something suspicious

use crate::agent::{Agent, EmotionKind};
use crate::behavior::action::{Action, ActionCtx};
use crate::behavior::priority::PriorityLevel;
use crate::behavior::state::BehaviorState;
use crate::core::config::EngineConfig;
use crate::core::types::random_direction;
use crate::world::WorldView;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Ticks between glances while looking around
const LOOK_INTERVAL: u32 = 20;

/// Walk to the point of interest and look around for a while
///
/// Heads for the target actor's position, or a random nearby point when
/// nothing specific drew the agent's attention. After arriving it scans
/// its surroundings, then completes. Finishing the look-around undisturbed
/// leaves a residual suspicion that keeps the agent watchful.
pub struct InvestigateAction {
    wander_radius: f32,
    look_duration: u32,
    timeout: u32,
    walk_speed: f32,
    looking_since: Option<u32>,
    rng: ChaCha8Rng,
}

impl InvestigateAction {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            wander_radius: config.investigate_wander_radius,
            look_duration: config.investigate_look_duration,
            timeout: config.investigate_timeout,
            walk_speed: config.walk_speed,
            looking_since: None,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed.wrapping_add(2)),
        }
    }
}

impl Action for InvestigateAction {
    fn id(&self) -> &str {
        "investigate"
    }

    fn display_name(&self) -> &str {
        "Investigate"
    }

    fn priority(&self) -> PriorityLevel {
        PriorityLevel::Normal
    }

    fn result_state(&self) -> BehaviorState {
        BehaviorState::Investigating
    }

    fn max_duration_ticks(&self) -> Option<u32> {
        Some(self.timeout)
    }

    fn can_run(&self, agent: &Agent, _world: &WorldView) -> bool {
        agent.emotions.has_active_emotion(EmotionKind::Suspicion)
    }

    fn start(&mut self, agent: &mut Agent, world: &mut WorldView, ctx: &ActionCtx) {
        self.looking_since = None;
        let destination = match ctx.target.and_then(|t| world.actor_position(t)) {
            Some(position) => position,
            None => {
                let offset = random_direction(&mut self.rng)
                    * self.rng.gen_range(2.0..self.wander_radius);
                agent.position + offset
            }
        };
        agent.navigation.navigate_to(destination, self.walk_speed);
        tracing::debug!(agent = %agent.name, ?destination, "investigating");
    }

    fn step(&mut self, agent: &mut Agent, _world: &mut WorldView, ctx: &ActionCtx) -> bool {
        match self.looking_since {
            Some(since) => {
                let looking_for = ctx.ticks_running.saturating_sub(since);
                if looking_for >= self.look_duration {
                    return false;
                }
                if looking_for % LOOK_INTERVAL == 0 {
                    let glance = agent.position + random_direction(&mut self.rng) * 4.0;
                    agent.navigation.look_at(glance);
                }
            }
            None => {
                if !agent.navigation.is_moving() {
                    self.looking_since = Some(ctx.ticks_running);
                }
            }
        }
        true
    }

    fn stop(&mut self, agent: &mut Agent, _world: &mut WorldView, interrupted: bool) {
        agent.navigation.stop();
        if !interrupted {
            // an undisturbed look-around leaves the agent watchful
            agent.emotions.trigger(EmotionKind::Suspicion, 0.3);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ActorId, Vec2};

    fn fixture() -> (Agent, WorldView, InvestigateAction) {
        let agent = Agent::new("villager", Vec2::default());
        let world = WorldView::new();
        let investigate = InvestigateAction::new(&EngineConfig::default());
        (agent, world, investigate)
    }

    #[test]
    fn test_heads_to_target_position() {
        let (mut agent, mut world, mut investigate) = fixture();
        let lurker = ActorId::new();
        world.insert_actor(lurker, Vec2::new(7.0, 3.0), false);

        let ctx = ActionCtx {
            target: Some(lurker),
            ticks_running: 0,
        };
        investigate.start(&mut agent, &mut world, &ctx);
        assert_eq!(agent.navigation.destination(), Some(Vec2::new(7.0, 3.0)));
    }

    #[test]
    fn test_synthesizes_point_without_target() {
        let (mut agent, mut world, mut investigate) = fixture();
        let ctx = ActionCtx::default();
        investigate.start(&mut agent, &mut world, &ctx);

        let destination = agent.navigation.destination().unwrap();
        let distance = destination.distance(&agent.position);
        assert!(distance >= 2.0 && distance <= investigate.wander_radius);
    }

    #[test]
    fn test_completes_after_look_around() {
        let (mut agent, mut world, mut investigate) = fixture();
        let ctx = ActionCtx::default();
        investigate.start(&mut agent, &mut world, &ctx);
        agent.navigation.stop();

        let mut tick = 0;
        loop {
            tick += 1;
            let ctx = ActionCtx {
                target: None,
                ticks_running: tick,
            };
            if !investigate.step(&mut agent, &mut world, &ctx) {
                break;
            }
            assert!(tick < investigate.timeout, "should finish before timeout");
        }
        // arrival on tick 1, then a full look-around
        assert_eq!(tick, 1 + investigate.look_duration);
    }

    #[test]
    fn test_residual_suspicion_only_when_not_interrupted() {
        let (mut agent, mut world, mut investigate) = fixture();
        investigate.stop(&mut agent, &mut world, true);
        assert!(!agent.emotions.has_active_emotion(EmotionKind::Suspicion));

        investigate.stop(&mut agent, &mut world, false);
        assert!(agent.emotions.has_active_emotion(EmotionKind::Suspicion));
    }

    #[test]
    fn test_can_run_requires_suspicion() {
        let (mut agent, world, investigate) = fixture();
        assert!(!investigate.can_run(&agent, &world));
        agent.emotions.trigger(EmotionKind::Suspicion, 0.4);
        assert!(investigate.can_run(&agent, &world));
    }
}
