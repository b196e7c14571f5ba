//! Hearthward - priority-driven behavior decision engine for settlement NPCs
//!
//! Each agent owns one [`behavior::BehaviorEngine`], ticked once per
//! simulation step. The engine selects, runs and preempts discrete actions
//! from a priority-sorted pool, escalates into a timed emergency mode when
//! a flagged state activates, and merges external triggers (interactions,
//! witnessed crimes, threats, suspicious activity) with the regular
//! decision cadence.

pub mod agent;
pub mod behavior;
pub mod core;
pub mod world;
