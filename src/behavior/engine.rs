//! The per-agent behavior scheduler
//!
//! One [`BehaviorEngine`] per agent, ticked once per simulation step.
//! The engine advances the running action, re-evaluates the best candidate
//! at a fixed cadence through a situational cascade, and accepts external
//! trigger calls that can switch actions immediately. All switching paths
//! honor the same rules: a non-interruptible state blocks replacement, and
//! a candidate needs strictly higher priority than the incumbent.

use crate::agent::{Agent, EmotionKind, MemoryKind, NeedKind};
use crate::behavior::action::{Action, ActionEntry};
use crate::behavior::history::ActionHistory;
use crate::behavior::state::BehaviorState;
use crate::core::config::EngineConfig;
use crate::core::error::{HearthwardError, Result};
use crate::core::types::{ActorId, Tick};
use crate::world::WorldView;
use ahash::AHashMap;
use derive_more::Display;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Category of offense a witness can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CrimeKind {
    #[display(fmt = "theft")]
    Theft,
    #[display(fmt = "vandalism")]
    Vandalism,
    #[display(fmt = "assault")]
    Assault,
    #[display(fmt = "trespass")]
    Trespass,
    #[display(fmt = "murder")]
    Murder,
}

/// Priority-driven behavior controller for one agent
pub struct BehaviorEngine {
    current_state: BehaviorState,
    /// Id of the running pool entry; None means no action is active
    current: Option<String>,
    /// Sorted descending by priority value; registration order preserved
    /// among equal priorities
    available_actions: Vec<ActionEntry>,
    /// Partition of the pool by result state, mirroring pool order
    actions_by_state: AHashMap<BehaviorState, Vec<String>>,
    history: ActionHistory,
    in_emergency: bool,
    emergency_ticks_remaining: u32,
    interaction_cooldown: u32,
    /// Ticks since the last decision pass
    tick_counter: u32,
    /// Total ticks this engine has run, for history stamps
    ticks_elapsed: Tick,
    config: EngineConfig,
    rng: ChaCha8Rng,
}

impl BehaviorEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let history = ActionHistory::new(config.history_capacity);
        Self {
            current_state: BehaviorState::Idle,
            current: None,
            available_actions: Vec::new(),
            actions_by_state: AHashMap::new(),
            history,
            in_emergency: false,
            emergency_ticks_remaining: 0,
            interaction_cooldown: 0,
            tick_counter: 0,
            ticks_elapsed: 0,
            config,
            rng,
        }
    }

    /// Build an engine with an explicit action list
    pub fn with_actions(config: EngineConfig, actions: Vec<Box<dyn Action>>) -> Self {
        let mut engine = Self::new(config);
        for action in actions {
            engine.register_action(action);
        }
        engine
    }

    // === REGISTRATION ===

    /// Insert an action into the sorted pool and its state bucket
    ///
    /// Stable descending insertion: the new entry goes after existing
    /// entries of equal priority. The state bucket position mirrors the
    /// pool order.
    pub fn register_action(&mut self, action: Box<dyn Action>) {
        let entry = ActionEntry::new(action);
        let id = entry.id().to_string();
        if self.position_of(&id).is_some() {
            tracing::warn!(action = %id, "duplicate action id registered");
        }

        let value = entry.priority().value();
        let state = entry.result_state();
        let pos = self
            .available_actions
            .iter()
            .position(|e| e.priority().value() < value)
            .unwrap_or(self.available_actions.len());
        let bucket_pos = self.available_actions[..pos]
            .iter()
            .filter(|e| e.result_state() == state)
            .count();

        self.available_actions.insert(pos, entry);
        let bucket = self.actions_by_state.entry(state).or_default();
        bucket.insert(bucket_pos.min(bucket.len()), id.clone());
        tracing::debug!(action = %id, state = %state, "action registered");
    }

    /// Remove an action from the pool and its state bucket
    ///
    /// A running action is ended as interrupted first.
    pub fn unregister_action(
        &mut self,
        agent: &mut Agent,
        world: &mut WorldView,
        id: &str,
    ) -> Result<()> {
        let Some(pos) = self.position_of(id) else {
            return Err(HearthwardError::UnknownAction(id.to_string()));
        };
        if self.current.as_deref() == Some(id) {
            self.finish_current_action(agent, world, true);
        }
        let entry = self.available_actions.remove(pos);
        let state = entry.result_state();
        if let Some(bucket) = self.actions_by_state.get_mut(&state) {
            bucket.retain(|b| b != id);
            if bucket.is_empty() {
                self.actions_by_state.remove(&state);
            }
        }
        tracing::debug!(action = %id, "action unregistered");
        Ok(())
    }

    // === TICK LOOP ===

    /// Advance one simulation step
    pub fn tick(&mut self, agent: &mut Agent, world: &mut WorldView) {
        self.tick_counter += 1;
        self.ticks_elapsed += 1;
        self.interaction_cooldown = self.interaction_cooldown.saturating_sub(1);

        if self.in_emergency {
            self.emergency_ticks_remaining = self.emergency_ticks_remaining.saturating_sub(1);
            if self.emergency_ticks_remaining == 0 {
                // timer-only end; the running action is left alone
                self.in_emergency = false;
                tracing::debug!(agent = %agent.name, "emergency over");
            }
        }

        // a natural completion is resolved before the decision phase so a
        // just-finished action can never also be "overridden"
        if let Some(id) = self.current.clone() {
            let still_running = match self.position_of(&id) {
                Some(pos) => self.available_actions[pos].execute_tick(agent, world),
                None => false,
            };
            if !still_running {
                self.finish_current_action(agent, world, false);
            }
        }

        if self.tick_counter >= self.config.decision_interval {
            self.tick_counter = 0;
            self.make_decision(agent, world);
        }
    }

    /// Re-evaluate which action should be running and switch if allowed
    fn make_decision(&mut self, agent: &mut Agent, world: &mut WorldView) {
        if self.current.is_some() && !self.current_state.can_be_interrupted() {
            return;
        }

        let Some(best) = self.find_best_action(agent, world) else {
            // every can_run returned false, including the fallback's; keep
            // an explicit idle state rather than a dangling action
            if self.current.is_none() {
                self.current_state = BehaviorState::Idle;
            }
            return;
        };

        if self.current.as_deref() == Some(best.as_str()) {
            return;
        }
        let allowed = {
            let Some(candidate) = self.entry(&best) else {
                return;
            };
            candidate.can_override(self.current_entry())
        };
        if allowed {
            self.switch_to_action(agent, world, &best);
        }
    }

    /// Situational cascade over the state-indexed pool
    ///
    /// Checked in fixed order: flee urge, critical safety, curiosity, then
    /// the full pool in priority order. The first three each scan only the
    /// relevant state bucket. The cascade hardcodes settlement policy in
    /// the scheduler; callers that want different policy register actions
    /// whose `can_run` encodes it and rely on the priority scan.
    fn find_best_action(&mut self, agent: &Agent, world: &WorldView) -> Option<String> {
        if agent.emotions.would_flee() {
            if let Some(id) = self.first_executable_in(BehaviorState::Fleeing, agent, world) {
                return Some(id);
            }
        }

        if agent.needs.is_critical(NeedKind::Safety) {
            for state in [BehaviorState::Hiding, BehaviorState::Alerting] {
                if let Some(id) = self.first_executable_in(state, agent, world) {
                    return Some(id);
                }
            }
        }

        if agent.traits.would_investigate()
            && self.rng.gen::<f32>() < self.config.investigate_chance
        {
            if let Some(id) = self.first_executable_in(BehaviorState::Investigating, agent, world)
            {
                return Some(id);
            }
        }

        for entry in &self.available_actions {
            if entry.can_run(agent, world) {
                return Some(entry.id().to_string());
            }
        }

        tracing::error!(
            agent = %agent.name,
            "no executable action in pool; the idle fallback must always run"
        );
        None
    }

    /// Replace the running action with `id`, honoring the lifecycle order:
    /// the outgoing action's stop runs strictly before the incoming start
    fn switch_to_action(&mut self, agent: &mut Agent, world: &mut WorldView, id: &str) {
        if let Some(outgoing) = self.current.take() {
            if let Some(pos) = self.position_of(&outgoing) {
                self.available_actions[pos].end(agent, world, true);
            }
        }

        let Some(pos) = self.position_of(id) else {
            tracing::error!(action = %id, "switch target vanished from pool");
            self.current_state = BehaviorState::Idle;
            return;
        };
        let entry = &mut self.available_actions[pos];
        entry.begin(agent, world);
        let new_state = entry.result_state();

        self.current = Some(id.to_string());
        self.current_state = new_state;
        self.history.push(id, self.ticks_elapsed);
        tracing::info!(agent = %agent.name, action = %id, state = %new_state, "action switch");

        if new_state.is_emergency() && !self.in_emergency {
            self.start_emergency(agent, self.config.emergency_duration);
        }
    }

    /// End the running action and drop back to the idle state
    fn finish_current_action(&mut self, agent: &mut Agent, world: &mut WorldView, interrupted: bool) {
        if let Some(id) = self.current.take() {
            if let Some(pos) = self.position_of(&id) {
                self.available_actions[pos].end(agent, world, interrupted);
            }
            tracing::debug!(agent = %agent.name, action = %id, interrupted, "action finished");
        }
        self.current_state = BehaviorState::Idle;
    }

    fn start_emergency(&mut self, agent: &mut Agent, duration: u32) {
        self.in_emergency = true;
        self.emergency_ticks_remaining = duration;
        agent.emotions.trigger(EmotionKind::Fear, self.config.fear_spike);
        tracing::info!(agent = %agent.name, duration, "emergency started");
    }

    /// Switch immediately from a trigger, subject to the same
    /// interruptibility and override rules as the decision pass
    fn try_switch(
        &mut self,
        agent: &mut Agent,
        world: &mut WorldView,
        id: &str,
        target: Option<ActorId>,
    ) -> bool {
        if self.current.is_some() && !self.current_state.can_be_interrupted() {
            return false;
        }
        if self.current.as_deref() == Some(id) {
            return false;
        }
        let allowed = {
            let Some(candidate) = self.entry(id) else {
                return false;
            };
            candidate.can_override(self.current_entry())
        };
        if !allowed {
            return false;
        }
        if let Some(pos) = self.position_of(id) {
            self.available_actions[pos].set_target(target);
        }
        self.switch_to_action(agent, world, id);
        true
    }

    // === EXTERNAL TRIGGERS ===

    /// Another actor started an interaction (a player right-clicked, a
    /// neighbor walked up)
    ///
    /// Interaction deliberately bypasses the action lifecycle: conversation
    /// sets the state directly, runs no pool entry and leaves no history
    /// record. The next decision pass or `reset_to_idle` clears it.
    pub fn on_interact(&mut self, agent: &mut Agent, world: &WorldView, other: ActorId) {
        if self.interaction_cooldown > 0 || self.in_emergency {
            return;
        }
        self.interaction_cooldown = self.config.interaction_cooldown;

        let willing = self.current_state.can_converse() && !agent.emotions.would_flee();
        if willing {
            self.current_state = BehaviorState::Conversing;
            if let Some(position) = world.actor_position(other) {
                agent.navigation.look_at(position);
            }
            tracing::debug!(agent = %agent.name, ?other, "conversing");
        }
    }

    /// The agent saw `offender` commit a crime of the given severity (0-10)
    pub fn on_witness_crime(
        &mut self,
        agent: &mut Agent,
        world: &mut WorldView,
        offender: ActorId,
        crime: CrimeKind,
        severity: u8,
    ) {
        let weight = f32::from(severity) / 10.0;
        agent.memory.add_memory(
            offender,
            MemoryKind::WitnessedCrime,
            format!("saw {crime} (severity {severity})"),
            weight,
        );
        agent.memory.add_tag(offender, "criminal");

        if severity >= 5 {
            agent.emotions.trigger(EmotionKind::Fear, weight);
        } else {
            agent.emotions.trigger(EmotionKind::Suspicion, weight);
        }
        tracing::debug!(agent = %agent.name, ?offender, %crime, severity, "crime witnessed");

        if agent.traits.would_report(severity) {
            if let Some(id) = self.first_in_bucket(BehaviorState::Alerting) {
                self.try_switch(agent, world, &id, Some(offender));
            }
        } else if severity >= 7 || agent.emotions.would_flee() {
            if let Some(id) = self.first_in_bucket(BehaviorState::Fleeing) {
                self.try_switch(agent, world, &id, Some(offender));
            }
        }
    }

    /// The agent was directly threatened (0-10)
    pub fn on_threatened(
        &mut self,
        agent: &mut Agent,
        world: &mut WorldView,
        aggressor: ActorId,
        threat_level: u8,
    ) {
        let level = f32::from(threat_level);
        agent.needs.modify_safety(-level * 20.0);
        agent.memory.add_memory(
            aggressor,
            MemoryKind::Threatened,
            format!("threatened at level {threat_level}"),
            level / 10.0,
        );
        agent.memory.add_tag(aggressor, "threat");
        agent.emotions.trigger(EmotionKind::Fear, level / 10.0);
        tracing::debug!(agent = %agent.name, ?aggressor, threat_level, "threatened");

        if level * 10.0 > agent.traits.fear_threshold() {
            if let Some(id) = self.first_in_bucket(BehaviorState::Fleeing) {
                self.try_switch(agent, world, &id, Some(aggressor));
            }
        }
    }

    /// Something odd happened nearby, possibly attributable to an actor
    pub fn on_suspicious_activity(
        &mut self,
        agent: &mut Agent,
        world: &mut WorldView,
        actor: Option<ActorId>,
        description: &str,
    ) {
        agent.emotions.trigger(EmotionKind::Suspicion, 0.4);
        if let Some(actor) = actor {
            agent
                .memory
                .add_memory(actor, MemoryKind::SuspiciousActivity, description, 0.3);
        }
        tracing::debug!(agent = %agent.name, ?actor, description, "suspicious activity");

        if agent.traits.would_investigate() {
            if let Some(id) = self.first_in_bucket(BehaviorState::Investigating) {
                self.try_switch(agent, world, &id, actor);
            }
        }
    }

    // === SCRIPTED CONTROL ===

    /// Administrative override: interrupt whatever is running and pin the
    /// state directly
    pub fn force_state(
        &mut self,
        agent: &mut Agent,
        world: &mut WorldView,
        state: BehaviorState,
        duration_ticks: u32,
    ) {
        self.finish_current_action(agent, world, true);
        self.current_state = state;
        tracing::info!(agent = %agent.name, state = %state, "state forced");
        if state.is_emergency() {
            self.start_emergency(agent, duration_ticks);
        }
    }

    /// End the running action as completed and clear any emergency,
    /// regardless of the remaining timer
    pub fn reset_to_idle(&mut self, agent: &mut Agent, world: &mut WorldView) {
        self.finish_current_action(agent, world, false);
        self.current_state = BehaviorState::Idle;
        self.in_emergency = false;
        self.emergency_ticks_remaining = 0;
    }

    // === LOOKUPS ===

    fn position_of(&self, id: &str) -> Option<usize> {
        self.available_actions.iter().position(|e| e.id() == id)
    }

    fn entry(&self, id: &str) -> Option<&ActionEntry> {
        self.position_of(id).map(|pos| &self.available_actions[pos])
    }

    fn current_entry(&self) -> Option<&ActionEntry> {
        self.current.as_deref().and_then(|id| self.entry(id))
    }

    /// First bucket entry whose `can_run` passes, in pool order
    fn first_executable_in(
        &self,
        state: BehaviorState,
        agent: &Agent,
        world: &WorldView,
    ) -> Option<String> {
        let bucket = self.actions_by_state.get(&state)?;
        bucket
            .iter()
            .find(|id| {
                self.entry(id.as_str())
                    .map(|e| e.can_run(agent, world))
                    .unwrap_or(false)
            })
            .cloned()
    }

    /// First bucket entry regardless of `can_run`; trigger paths use this
    /// because the trigger condition itself is the execution gate
    fn first_in_bucket(&self, state: BehaviorState) -> Option<String> {
        self.actions_by_state
            .get(&state)
            .and_then(|bucket| bucket.first())
            .cloned()
    }

    // === ACCESSORS ===

    pub fn current_state(&self) -> BehaviorState {
        self.current_state
    }

    pub fn current_action_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Read-only view of the running pool entry, for diagnostics
    pub fn current_action(&self) -> Option<&ActionEntry> {
        self.current_entry()
    }

    pub fn action(&self, id: &str) -> Option<&ActionEntry> {
        self.entry(id)
    }

    /// Registered action ids in pool (priority) order
    pub fn action_ids(&self) -> Vec<&str> {
        self.available_actions.iter().map(|e| e.id()).collect()
    }

    /// Ids in the bucket for `state`, in pool order
    pub fn action_ids_for_state(&self, state: BehaviorState) -> &[String] {
        self.actions_by_state
            .get(&state)
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_in_emergency(&self) -> bool {
        self.in_emergency
    }

    pub fn emergency_ticks_remaining(&self) -> u32 {
        self.emergency_ticks_remaining
    }

    pub fn interaction_cooldown(&self) -> u32 {
        self.interaction_cooldown
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn ticks_elapsed(&self) -> Tick {
        self.ticks_elapsed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
