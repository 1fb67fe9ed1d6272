//! Walk animation system.
//!
//! Advances every peep's [`Walk`](crate::components::walk::Walk) timeline by
//! the frame delta from [`WorldTime`](crate::resources::worldtime::WorldTime),
//! writes the sampled values onto its
//! [`MapPosition`](crate::components::mapposition::MapPosition), and triggers a
//! [`WalkFinishedEvent`] for each walk that completes this frame.
//!
//! Killed walks (idle peeps, or peeps whose walk was cancelled by a resize)
//! are skipped and never report completion.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::peep::Peep;
use crate::components::walk::Walk;
use crate::events::walkfinished::WalkFinishedEvent;
use crate::resources::worldtime::WorldTime;

/// Animate peep positions and report finished walks.
pub fn walk_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut MapPosition, &mut Walk), With<Peep>>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut mp, mut walk) in query.iter_mut() {
        if !walk.is_playing() {
            continue;
        }
        let finished = walk.advance(dt);
        walk.sample(&mut mp.pos);
        if finished {
            commands.trigger(WalkFinishedEvent {
                entity,
                walk_id: walk.id,
            });
        }
    }
}
