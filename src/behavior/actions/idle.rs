//! The guaranteed fallback action

use crate::agent::Agent;
use crate::behavior::action::{Action, ActionCtx};
use crate::behavior::priority::PriorityLevel;
use crate::behavior::state::BehaviorState;
use crate::world::WorldView;

/// Do nothing, forever. Always executable so the decision pass can never
/// come up empty-handed.
#[derive(Debug, Default)]
pub struct IdleAction;

impl IdleAction {
    pub fn new() -> Self {
        Self
    }
}

impl Action for IdleAction {
    fn id(&self) -> &str {
        "idle"
    }

    fn display_name(&self) -> &str {
        "Idle"
    }

    fn priority(&self) -> PriorityLevel {
        PriorityLevel::Lowest
    }

    fn result_state(&self) -> BehaviorState {
        BehaviorState::Idle
    }

    fn can_run(&self, _agent: &Agent, _world: &WorldView) -> bool {
        true
    }

    fn start(&mut self, agent: &mut Agent, _world: &mut WorldView, _ctx: &ActionCtx) {
        agent.navigation.stop();
    }

    fn step(&mut self, _agent: &mut Agent, _world: &mut WorldView, _ctx: &ActionCtx) -> bool {
        true
    }

    fn stop(&mut self, _agent: &mut Agent, _world: &mut WorldView, _interrupted: bool) {}
}
