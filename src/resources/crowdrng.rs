//! Random source for the crowd.
//!
//! Wraps a [`fastrand::Rng`] so the scheduler and walk generator share one
//! stream. Seeding it makes a whole crowd reproducible.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use std::ops::{Deref, DerefMut};

#[derive(Resource, Debug)]
pub struct CrowdRng(pub Rng);

impl CrowdRng {
    pub fn new() -> Self {
        CrowdRng(Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        CrowdRng(Rng::with_seed(seed))
    }
}

impl Default for CrowdRng {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for CrowdRng {
    type Target = Rng;
    fn deref(&self) -> &Rng {
        &self.0
    }
}

impl DerefMut for CrowdRng {
    fn deref_mut(&mut self) -> &mut Rng {
        &mut self.0
    }
}
