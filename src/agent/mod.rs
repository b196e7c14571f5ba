//! The agent: one autonomous character and its sub-models
//!
//! An [`Agent`] owns exactly one of each sub-model. The behavior engine
//! reads them through their query methods and mutates them only inside the
//! current tick's single thread of control.

pub mod emotions;
pub mod memory;
pub mod navigation;
pub mod needs;
pub mod traits;

pub use emotions::{EmotionKind, EmotionModel};
pub use memory::{MemoryKind, MemoryModel};
pub use navigation::Navigator;
pub use needs::{NeedKind, NeedsModel};
pub use traits::TraitProfile;

use crate::core::types::{ActorId, Vec2};

/// One autonomous character
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: ActorId,
    pub name: String,
    pub position: Vec2,
    /// Preferred retreat spot; agents without one synthesize a nearby point
    pub home: Option<Vec2>,
    pub emotions: EmotionModel,
    pub needs: NeedsModel,
    pub traits: TraitProfile,
    pub memory: MemoryModel,
    pub navigation: Navigator,
}

impl Agent {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            position,
            home: None,
            emotions: EmotionModel::new(),
            needs: NeedsModel::new(),
            traits: TraitProfile::new(),
            memory: MemoryModel::new(),
            navigation: Navigator::new(),
        }
    }

    pub fn with_home(mut self, home: Vec2) -> Self {
        self.home = Some(home);
        self
    }

    /// Per-tick upkeep the simulation loop runs before the engine's tick:
    /// movement, emotion decay, need drift, memory fading
    pub fn tick_upkeep(&mut self) {
        self.navigation.advance(&mut self.position);
        self.emotions.tick();
        self.needs.tick();
        self.memory.decay_tick();
    }
}
