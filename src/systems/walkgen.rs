//! Walk generation.
//!
//! Given a peep's size and the current [`Stage`], [`reset_peep`] rolls the
//! spawn parameters for one traversal (direction, height on screen, depth
//! anchor), and a walk style turns them into a [`Walk`] timeline.
//!
//! Walk styles live in [`WALK_STYLES`] and are picked uniformly, so new
//! styles can be added without touching the scheduler.

use fastrand::Rng;

use crate::components::walk::{Axis, Easing, Repeat, Track, Walk};
use crate::resources::stage::Stage;

/// Upper bound (exclusive) of the downward spawn offset, in pixels.
pub const MAX_LIFT: f32 = 100.0;
/// Timeline units needed to cross the stage at normal speed.
pub const WALK_DURATION: f32 = 10.0;
/// Timeline units for one half of a walking bob.
pub const BOB_DURATION: f32 = 0.25;
/// Height of the walking bob, in pixels.
pub const BOB_HEIGHT: f32 = 10.0;
/// Timeline speed multiplier range.
pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 1.5;

/// Direction of travel across the stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// Spawn parameters for one traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WalkProps {
    pub direction: Direction,
    pub start_x: f32,
    pub end_x: f32,
    /// Fixed vertical position for the whole traversal.
    pub start_y: f32,
    /// Mirror the sprite horizontally.
    pub flip: bool,
    /// Depth ordering value.
    pub anchor: f32,
}

/// Builds a walk timeline from spawn parameters.
pub type WalkStyle = fn(&WalkProps, u64, &mut Rng) -> Walk;

/// Every available walk style.
pub const WALK_STYLES: &[WalkStyle] = &[normal_walk];

#[inline]
fn random_f32_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

/// Roll spawn parameters for a peep of `width` x `height` on `stage`.
///
/// The vertical offset is eased toward 0 so most peeps stand at the bottom
/// of their band, where the missing legs below the crop are hidden.
pub fn reset_peep(stage: &Stage, width: f32, height: f32, rng: &mut Rng) -> WalkProps {
    let direction = if rng.bool() {
        Direction::LeftToRight
    } else {
        Direction::RightToLeft
    };
    let offset_y = MAX_LIFT * Easing::QuadIn.apply(rng.f32());
    let start_y = stage.h - height + offset_y;

    let (start_x, end_x, flip) = match direction {
        Direction::LeftToRight => (-width, stage.w, false),
        Direction::RightToLeft => (stage.w + width, 0.0, true),
    };

    WalkProps {
        direction,
        start_x,
        end_x,
        start_y,
        flip,
        anchor: start_y,
    }
}

/// Steady walk: linear crossing plus a small up/down bob.
///
/// The bob repeats enough to cover the crossing but never gates completion.
pub fn normal_walk(props: &WalkProps, id: u64, rng: &mut Rng) -> Walk {
    let bob_repeats = (WALK_DURATION / BOB_DURATION) as u32;
    Walk::new(id)
        .with_time_scale(random_f32_range(rng, MIN_SPEED, MAX_SPEED))
        .with_track(Track::new(Axis::X, props.start_x, props.end_x, WALK_DURATION))
        .with_track(
            Track::new(
                Axis::Y,
                props.start_y,
                props.start_y - BOB_HEIGHT,
                BOB_DURATION,
            )
            .with_easing(Easing::QuadOut)
            .with_repeat(Repeat::PingPong(bob_repeats))
            .cosmetic(),
        )
}

/// Pick a walk style uniformly.
pub fn pick_walk_style(rng: &mut Rng) -> WalkStyle {
    WALK_STYLES[rng.usize(0..WALK_STYLES.len())]
}
