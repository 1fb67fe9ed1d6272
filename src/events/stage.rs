//! Stage lifecycle events.
//!
//! - [`SheetLoadedEvent`] fires once, when the sprite sheet texture is ready
//!   and its natural size is known. The crowd is built in response.
//! - [`StageResizedEvent`] fires whenever the drawable area changes size. The
//!   crowd is rebuilt in response.

use bevy_ecs::prelude::*;

/// The sprite sheet finished loading.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SheetLoadedEvent {
    /// Texture key the sheet was stored under.
    pub tex_key: String,
    /// Natural width in pixels.
    pub width: f32,
    /// Natural height in pixels.
    pub height: f32,
}

/// The window framebuffer changed size.
///
/// Sizes are in device pixels; the stage divides them by `pixel_ratio`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StageResizedEvent {
    pub fb_w: i32,
    pub fb_h: i32,
    pub pixel_ratio: f32,
}
