//! Reference actions exercising the [`Action`](crate::behavior::action::Action) contract

pub mod alert;
pub mod flee;
pub mod hide;
pub mod idle;
pub mod investigate;

pub use alert::AlertAuthoritiesAction;
pub use flee::FleeAction;
pub use hide::HideAction;
pub use idle::IdleAction;
pub use investigate::InvestigateAction;

use crate::behavior::action::Action;
use crate::core::config::EngineConfig;

/// The standard action set for a settlement NPC
///
/// Callers pass this (or their own list) to the engine explicitly; there
/// is no hidden static registration.
pub fn default_action_set(config: &EngineConfig) -> Vec<Box<dyn Action>> {
    vec![
        Box::new(FleeAction::new(config)),
        Box::new(AlertAuthoritiesAction::new(config)),
        Box::new(HideAction::new(config)),
        Box::new(InvestigateAction::new(config)),
        Box::new(IdleAction::new()),
    ]
}
