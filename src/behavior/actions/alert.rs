//! Call the authorities on an offender

use crate::agent::Agent;
use crate::behavior::action::{Action, ActionCtx};
use crate::behavior::priority::PriorityLevel;
use crate::behavior::state::BehaviorState;
use crate::core::config::EngineConfig;
use crate::world::WorldView;

/// Raise the alarm about the target actor
///
/// After a short wind-up the alert fires exactly once: the target's wanted
/// level goes up, nearby authority actors are redirected toward it, and a
/// witness record is filed. The action then keeps "shouting" until its
/// timeout; it never completes voluntarily.
pub struct AlertAuthoritiesAction {
    windup: u32,
    duration: u32,
    authority_radius: f32,
    fired: bool,
}

impl AlertAuthoritiesAction {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            windup: config.alert_windup,
            duration: config.alert_duration,
            authority_radius: config.authority_radius,
            fired: false,
        }
    }

    fn fire(&mut self, agent: &Agent, world: &mut WorldView, ctx: &ActionCtx) {
        let Some(target) = ctx.target else {
            tracing::debug!(agent = %agent.name, "alert with no target, nothing to report");
            return;
        };
        world.raise_wanted_level(target, 1);
        let nearby = world.authorities_near(agent.position, self.authority_radius);
        for authority in &nearby {
            world.assign_pursuit(*authority, target);
        }
        world.register_witness(agent.id, target);
        tracing::info!(
            agent = %agent.name,
            ?target,
            authorities = nearby.len(),
            "alert raised"
        );
    }
}

impl Action for AlertAuthoritiesAction {
    fn id(&self) -> &str {
        "alert_authorities"
    }

    fn display_name(&self) -> &str {
        "Alert Authorities"
    }

    fn priority(&self) -> PriorityLevel {
        PriorityLevel::High
    }

    fn result_state(&self) -> BehaviorState {
        BehaviorState::Alerting
    }

    fn max_duration_ticks(&self) -> Option<u32> {
        Some(self.duration)
    }

    fn can_run(&self, agent: &Agent, _world: &WorldView) -> bool {
        agent.emotions.would_call_police()
    }

    fn start(&mut self, agent: &mut Agent, world: &mut WorldView, ctx: &ActionCtx) {
        self.fired = false;
        agent.navigation.stop();
        if let Some(position) = ctx.target.and_then(|t| world.actor_position(t)) {
            agent.navigation.look_at(position);
        }
    }

    fn step(&mut self, agent: &mut Agent, world: &mut WorldView, ctx: &ActionCtx) -> bool {
        if !self.fired && ctx.ticks_running >= self.windup {
            self.fire(agent, world, ctx);
            self.fired = true;
        }
        true
    }

    fn stop(&mut self, _agent: &mut Agent, _world: &mut WorldView, _interrupted: bool) {}
}
