//! Movement command interface
//!
//! The engine and its actions issue navigate/stop/look commands; actual
//! pathfinding lives outside this crate. The navigator records the active
//! command, advances the agent in a straight line when the simulation loop
//! asks it to, and tracks stalled progress so actions can detect a stuck
//! agent.

use crate::core::types::Vec2;
use serde::{Deserialize, Serialize};

/// Movement below this per-tick distance counts as no progress
const PROGRESS_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Navigator {
    destination: Option<Vec2>,
    look_target: Option<Vec2>,
    speed: f32,
    ticks_without_progress: u32,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            destination: None,
            look_target: None,
            speed: 0.3,
            ticks_without_progress: 0,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate_to(&mut self, destination: Vec2, speed: f32) {
        self.destination = Some(destination);
        self.speed = speed;
        self.ticks_without_progress = 0;
    }

    pub fn stop(&mut self) {
        self.destination = None;
        self.ticks_without_progress = 0;
    }

    pub fn look_at(&mut self, target: Vec2) {
        self.look_target = Some(target);
    }

    pub fn is_moving(&self) -> bool {
        self.destination.is_some()
    }

    pub fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    pub fn look_target(&self) -> Option<Vec2> {
        self.look_target
    }

    pub fn ticks_without_progress(&self) -> u32 {
        self.ticks_without_progress
    }

    /// Move `position` one tick toward the destination; clears the
    /// destination on arrival and counts stalled ticks otherwise
    pub fn advance(&mut self, position: &mut Vec2) {
        let Some(destination) = self.destination else {
            self.ticks_without_progress = 0;
            return;
        };

        let before = *position;
        let to_destination = destination - before;
        let remaining = to_destination.length();

        if remaining <= self.speed {
            *position = destination;
            self.destination = None;
        } else {
            *position = before + to_destination.normalize() * self.speed;
        }

        if position.distance(&before) < PROGRESS_EPSILON {
            self.ticks_without_progress += 1;
        } else {
            self.ticks_without_progress = 0;
        }
    }
}
