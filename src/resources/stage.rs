//! Stage size resource.
//!
//! The stage is the visible drawing area in logical pixels. The walk
//! generator reads it to place peeps and the renderer applies its
//! `pixel_ratio` before drawing.

use bevy_ecs::prelude::Resource;

/// Current drawable area.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    /// Width in logical pixels.
    pub w: f32,
    /// Height in logical pixels.
    pub h: f32,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f32,
}

impl Stage {
    pub fn new(w: f32, h: f32) -> Self {
        Stage {
            w,
            h,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Stage for a framebuffer of `fb_w` x `fb_h` device pixels.
    pub fn from_framebuffer(fb_w: i32, fb_h: i32, pixel_ratio: f32) -> Self {
        let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Stage::new(fb_w as f32 / ratio, fb_h as f32 / ratio).with_pixel_ratio(ratio)
    }
}
