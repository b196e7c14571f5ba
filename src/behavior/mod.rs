//! The behavior decision engine: priorities, states, the action contract,
//! the scheduler, and the reference action set

pub mod action;
pub mod actions;
pub mod engine;
pub mod history;
pub mod priority;
pub mod state;

pub use action::{Action, ActionCtx, ActionEntry};
pub use engine::{BehaviorEngine, CrimeKind};
pub use history::{ActionHistory, HistoryEntry};
pub use priority::PriorityLevel;
pub use state::BehaviorState;
