//! The action contract and its engine-owned wrapper
//!
//! An [`Action`] is a discrete, resumable unit of behavior. Implementations
//! supply a cheap executability query and three lifecycle callbacks; the
//! engine wraps each registered action in an [`ActionEntry`] that owns the
//! runtime bookkeeping (running flag, elapsed ticks, target handle) so no
//! implementation can corrupt it.

use crate::agent::Agent;
use crate::behavior::priority::PriorityLevel;
use crate::behavior::state::BehaviorState;
use crate::core::types::ActorId;
use crate::world::WorldView;

/// Engine-owned runtime context handed to lifecycle callbacks
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionCtx {
    /// Handle to the external actor this action is aimed at, if any.
    /// Resolved lazily through the world; a vanished actor is a no-op.
    pub target: Option<ActorId>,
    /// Ticks since `start`, counting the current one
    pub ticks_running: u32,
}

/// A unit of agent behavior
///
/// All methods are invoked only by the engine and never re-entrantly.
/// `can_run` runs every decision cycle for every candidate, so it must be
/// cheap and side-effect-free. `start` may run again each time the action
/// is reselected, including right after an interruption, and must fully
/// reset internal state. `stop` receives `interrupted == true` on forced
/// termination and `false` on natural completion or timeout.
pub trait Action {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn priority(&self) -> PriorityLevel;
    fn result_state(&self) -> BehaviorState;

    /// Hard tick limit; None means unbounded
    fn max_duration_ticks(&self) -> Option<u32> {
        None
    }

    fn can_run(&self, agent: &Agent, world: &WorldView) -> bool;
    fn start(&mut self, agent: &mut Agent, world: &mut WorldView, ctx: &ActionCtx);
    /// One tick of progress; return false to complete voluntarily
    fn step(&mut self, agent: &mut Agent, world: &mut WorldView, ctx: &ActionCtx) -> bool;
    fn stop(&mut self, agent: &mut Agent, world: &mut WorldView, interrupted: bool);
}

/// A registered action plus the runtime state the engine owns for it
pub struct ActionEntry {
    action: Box<dyn Action>,
    running: bool,
    ticks_running: u32,
    target: Option<ActorId>,
}

impl ActionEntry {
    pub fn new(action: Box<dyn Action>) -> Self {
        Self {
            action,
            running: false,
            ticks_running: 0,
            target: None,
        }
    }

    pub fn id(&self) -> &str {
        self.action.id()
    }

    pub fn display_name(&self) -> &str {
        self.action.display_name()
    }

    pub fn priority(&self) -> PriorityLevel {
        self.action.priority()
    }

    pub fn result_state(&self) -> BehaviorState {
        self.action.result_state()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks_running(&self) -> u32 {
        self.ticks_running
    }

    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<ActorId>) {
        self.target = target;
    }

    pub fn can_run(&self, agent: &Agent, world: &WorldView) -> bool {
        self.action.can_run(agent, world)
    }

    /// Reset counters and start the action
    pub fn begin(&mut self, agent: &mut Agent, world: &mut WorldView) {
        self.running = true;
        self.ticks_running = 0;
        let ctx = ActionCtx {
            target: self.target,
            ticks_running: 0,
        };
        self.action.start(agent, world, &ctx);
    }

    /// Advance one tick; returns false once the action is over, whether by
    /// voluntary completion or by hitting its configured timeout
    pub fn execute_tick(&mut self, agent: &mut Agent, world: &mut WorldView) -> bool {
        if !self.running {
            return false;
        }
        self.ticks_running += 1;

        if let Some(max) = self.action.max_duration_ticks() {
            if self.ticks_running >= max {
                self.end(agent, world, false);
                return false;
            }
        }

        let ctx = ActionCtx {
            target: self.target,
            ticks_running: self.ticks_running,
        };
        self.action.step(agent, world, &ctx)
    }

    /// Stop the action and clear its target handle; idempotent
    pub fn end(&mut self, agent: &mut Agent, world: &mut WorldView, interrupted: bool) {
        if !self.running {
            return;
        }
        self.running = false;
        self.action.stop(agent, world, interrupted);
        self.target = None;
    }

    /// Strict priority override: an absent incumbent is always overridable
    pub fn can_override(&self, other: Option<&ActionEntry>) -> bool {
        match other {
            None => true,
            Some(other) => self.priority().is_higher_than(other.priority()),
        }
    }

    pub fn can_be_overridden_by(&self, other: &ActionEntry) -> bool {
        other.priority().is_higher_than(self.priority())
    }
}

impl std::fmt::Debug for ActionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionEntry")
            .field("id", &self.id())
            .field("priority", &self.priority())
            .field("result_state", &self.result_state())
            .field("running", &self.running)
            .field("ticks_running", &self.ticks_running)
            .field("target", &self.target)
            .finish()
    }
}
