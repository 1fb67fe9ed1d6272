//! Depth anchor component for draw ordering.
//!
//! The [`Anchor`] component is a scalar used only to order draw calls. Peeps
//! with a smaller anchor are further up the screen and are drawn first, so
//! peeps closer to the bottom overlap them (painter's algorithm).

use bevy_ecs::prelude::Component;
use std::cmp::Ordering;

/// Draw ordering value. Lower values are drawn earlier (further back).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Anchor(pub f32);

impl Anchor {
    /// Total order over anchors, usable with `sort_by`.
    pub fn cmp_depth(&self, other: &Anchor) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_depth_orders_ascending() {
        let mut anchors = vec![Anchor(500.0), Anchor(-3.0), Anchor(420.5)];
        anchors.sort_by(|a, b| a.cmp_depth(b));
        assert_eq!(anchors, vec![Anchor(-3.0), Anchor(420.5), Anchor(500.0)]);
    }

    #[test]
    fn test_cmp_depth_equal() {
        assert_eq!(Anchor(1.0).cmp_depth(&Anchor(1.0)), Ordering::Equal);
    }
}
