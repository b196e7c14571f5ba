//! Activity states an agent can be in
//!
//! Declaration order is load-bearing: the ordinal acts as a secondary
//! priority between non-emergency states in [`BehaviorState::higher_priority`].

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Closed set of activity categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[repr(u8)]
pub enum BehaviorState {
    #[display(fmt = "idle")]
    Idle,
    #[display(fmt = "working")]
    Working,
    #[display(fmt = "traveling")]
    Traveling,
    #[display(fmt = "trading")]
    Trading,
    #[display(fmt = "conversing")]
    Conversing,
    #[display(fmt = "investigating")]
    Investigating,
    #[display(fmt = "fleeing")]
    Fleeing,
    #[display(fmt = "alerting")]
    Alerting,
    #[display(fmt = "hiding")]
    Hiding,
    #[display(fmt = "patrolling")]
    Patrolling,
    #[display(fmt = "pursuing")]
    Pursuing,
    #[display(fmt = "sleeping")]
    Sleeping,
    #[display(fmt = "waiting")]
    Waiting,
    #[display(fmt = "socializing")]
    Socializing,
}

impl BehaviorState {
    /// Position in declaration order
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Whether entering this state starts the engine's emergency timer
    pub fn is_emergency(&self) -> bool {
        matches!(
            self,
            BehaviorState::Fleeing | BehaviorState::Alerting | BehaviorState::Hiding
        )
    }

    /// Whether the decision pass may replace an action running in this state
    ///
    /// Alerting is a committed one-shot and Trading is mid-transaction;
    /// everything else yields to a strictly higher-priority candidate.
    pub fn can_be_interrupted(&self) -> bool {
        !matches!(self, BehaviorState::Alerting | BehaviorState::Trading)
    }

    pub fn can_trade(&self) -> bool {
        !self.is_emergency()
            && matches!(
                self,
                BehaviorState::Idle
                    | BehaviorState::Trading
                    | BehaviorState::Waiting
                    | BehaviorState::Socializing
            )
    }

    pub fn can_converse(&self) -> bool {
        !self.is_emergency() && *self != BehaviorState::Sleeping
    }

    pub fn can_follow_schedule(&self) -> bool {
        !self.is_emergency()
            && matches!(
                self,
                BehaviorState::Idle
                    | BehaviorState::Working
                    | BehaviorState::Traveling
                    | BehaviorState::Patrolling
                    | BehaviorState::Sleeping
                    | BehaviorState::Waiting
            )
    }

    /// Emergency states outrank ordinary ones; between two states of the
    /// same kind the later-declared one wins
    pub fn higher_priority(a: BehaviorState, b: BehaviorState) -> BehaviorState {
        match (a.is_emergency(), b.is_emergency()) {
            (true, false) => a,
            (false, true) => b,
            _ => {
                if a.ordinal() >= b.ordinal() {
                    a
                } else {
                    b
                }
            }
        }
    }
}
