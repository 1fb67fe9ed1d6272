//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
//!
//! Long stalls (window dragged, process suspended) are smoothed: a frame
//! longer than [`LAG_THRESHOLD`] advances time by [`LAG_ADJUSTED_DELTA`]
//! only, so walkers do not jump across the stage after a hitch.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Frames longer than this many seconds are treated as a stall.
pub const LAG_THRESHOLD: f32 = 0.5;
/// Delta used in place of a stalled frame.
pub const LAG_ADJUSTED_DELTA: f32 = 1.0 / 30.0;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// smooths stalls, applies the current `time_scale` and writes both
/// `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let dt = if dt > LAG_THRESHOLD {
        LAG_ADJUSTED_DELTA
    } else {
        dt.max(0.0)
    };
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}
