//! World/authority collaborator consumed by the behavior engine
//!
//! Tracks actor positions, authority actors, the wanted-level registry,
//! pursuit assignments and witness records. Agents reference other actors
//! by [`ActorId`] handle; a missing actor resolves to `None` and callers
//! treat that as a no-op, since the actor may have been removed from the
//! world while a handle was still held.

use crate::core::types::{ActorId, Vec2};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Minimal facts the engine needs about any actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorInfo {
    pub position: Vec2,
    pub alive: bool,
    /// Authority actors (guards, watchmen) can be assigned pursuit targets
    pub authority: bool,
}

/// Record of who saw whom commit an offense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitnessRecord {
    pub witness: ActorId,
    pub offender: ActorId,
}

/// Shared view of the world the engine and its actions operate on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldView {
    actors: AHashMap<ActorId, ActorInfo>,
    wanted: AHashMap<ActorId, u32>,
    /// authority -> current pursuit target
    pursuits: AHashMap<ActorId, ActorId>,
    witnesses: Vec<WitnessRecord>,
}

impl WorldView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_actor(&mut self, id: ActorId, position: Vec2, authority: bool) {
        self.actors.insert(
            id,
            ActorInfo {
                position,
                alive: true,
                authority,
            },
        );
    }

    pub fn remove_actor(&mut self, id: ActorId) {
        self.actors.remove(&id);
    }

    pub fn set_position(&mut self, id: ActorId, position: Vec2) {
        if let Some(info) = self.actors.get_mut(&id) {
            info.position = position;
        }
    }

    pub fn set_alive(&mut self, id: ActorId, alive: bool) {
        if let Some(info) = self.actors.get_mut(&id) {
            info.alive = alive;
        }
    }

    /// Position of a living actor; missing or dead actors resolve to None
    pub fn actor_position(&self, id: ActorId) -> Option<Vec2> {
        self.actors
            .get(&id)
            .filter(|info| info.alive)
            .map(|info| info.position)
    }

    /// Living authority actors within `radius` of `position`
    pub fn authorities_near(&self, position: Vec2, radius: f32) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|(_, info)| info.authority && info.alive)
            .filter(|(_, info)| info.position.distance(&position) <= radius)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Point an authority actor at a pursuit target
    pub fn assign_pursuit(&mut self, authority: ActorId, target: ActorId) {
        self.pursuits.insert(authority, target);
        tracing::debug!(?authority, ?target, "pursuit assigned");
    }

    pub fn pursuit_target(&self, authority: ActorId) -> Option<ActorId> {
        self.pursuits.get(&authority).copied()
    }

    pub fn raise_wanted_level(&mut self, actor: ActorId, amount: u32) {
        *self.wanted.entry(actor).or_insert(0) += amount;
    }

    pub fn wanted_level(&self, actor: ActorId) -> u32 {
        self.wanted.get(&actor).copied().unwrap_or(0)
    }

    pub fn register_witness(&mut self, witness: ActorId, offender: ActorId) {
        self.witnesses.push(WitnessRecord { witness, offender });
    }

    pub fn witnesses(&self) -> &[WitnessRecord] {
        &self.witnesses
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_actor_position_is_none() {
        let world = WorldView::new();
        assert_eq!(world.actor_position(ActorId::new()), None);
    }

    #[test]
    fn test_dead_actor_position_is_none() {
        let mut world = WorldView::new();
        let id = ActorId::new();
        world.insert_actor(id, Vec2::new(1.0, 1.0), false);
        world.set_alive(id, false);
        assert_eq!(world.actor_position(id), None);
    }

    #[test]
    fn test_authorities_near_filters_by_radius_and_role() {
        let mut world = WorldView::new();
        let near_guard = ActorId::new();
        let far_guard = ActorId::new();
        let near_civilian = ActorId::new();
        world.insert_actor(near_guard, Vec2::new(5.0, 0.0), true);
        world.insert_actor(far_guard, Vec2::new(100.0, 0.0), true);
        world.insert_actor(near_civilian, Vec2::new(2.0, 0.0), false);

        let found = world.authorities_near(Vec2::default(), 20.0);
        assert_eq!(found, vec![near_guard]);
    }

    #[test]
    fn test_wanted_level_accumulates() {
        let mut world = WorldView::new();
        let thug = ActorId::new();
        assert_eq!(world.wanted_level(thug), 0);
        world.raise_wanted_level(thug, 1);
        world.raise_wanted_level(thug, 2);
        assert_eq!(world.wanted_level(thug), 3);
    }

    #[test]
    fn test_witness_records() {
        let mut world = WorldView::new();
        let witness = ActorId::new();
        let offender = ActorId::new();
        world.register_witness(witness, offender);
        assert_eq!(world.witnesses().len(), 1);
        assert_eq!(world.witnesses()[0].offender, offender);
    }
}
