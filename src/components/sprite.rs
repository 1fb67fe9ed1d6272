use bevy_ecs::prelude::Component;
use raylib::prelude::Rectangle;

/// Sprite is identified by a texture key and the rectangle it crops from that
/// texture. The texture itself is shared through the texture store and never
/// mutated. `flip_h` mirrors the sprite horizontally around its left edge.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub rect: Rectangle,
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, rect: Rectangle) -> Self {
        Sprite {
            tex_key: tex_key.into(),
            rect,
            flip_h: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.rect.width
    }

    pub fn height(&self) -> f32 {
        self.rect.height
    }

    /// Horizontal scale applied when drawing.
    pub fn scale_x(&self) -> f32 {
        if self.flip_h { -1.0 } else { 1.0 }
    }
}
