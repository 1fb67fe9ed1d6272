//! Peep marker component.
//!
//! Every pedestrian entity spawned from the sprite sheet carries [`Peep`]
//! together with [`Sprite`](super::sprite::Sprite),
//! [`MapPosition`](super::mapposition::MapPosition),
//! [`Anchor`](super::anchor::Anchor) and [`Walk`](super::walk::Walk).

use bevy_ecs::prelude::Component;

/// Tag component for crowd members. `index` is the cell index in the sheet.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Peep {
    pub index: usize,
}
