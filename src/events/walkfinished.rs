//! Walk completion events.
//!
//! When the gating track of a peep's [`Walk`](crate::components::walk::Walk)
//! reaches its end, [`walk_system`](crate::systems::walk::walk_system)
//! triggers a [`WalkFinishedEvent`]. The crowd observer recycles the peep in
//! response.
//!
//! # Event Flow
//!
//! 1. `walk_system` advances walks and detects completion
//! 2. Emits `WalkFinishedEvent` with the entity and the walk id
//! 3. `walk_finished_observer` queues a retire + activate step
//! 4. The step runs when commands are applied, before the next render
//!
//! # Related
//!
//! - [`crate::systems::crowd::walk_finished_observer`] – observer that handles these events

use bevy_ecs::prelude::*;

/// Event emitted when a peep finishes crossing the stage.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkFinishedEvent {
    /// The peep whose walk finished.
    pub entity: Entity,
    /// Id of the walk that finished.
    pub walk_id: u64,
}
