use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Top-left corner of a peep on the stage, in logical pixels.
///
/// For flipped peeps the sprite extends to the left of `pos.x`.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }
}

impl Default for MapPosition {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
