//! Crowd pool resource.
//!
//! Holds every peep entity and partitions them into two disjoint sets:
//! - `idle` – off-stage peeps waiting to be picked,
//! - `active` – peeps currently walking, kept sorted by depth anchor so the
//!   renderer can draw them in order.
//!
//! `all` is fixed once the sheet has been sliced. Membership only changes
//! through the scheduler in [`crate::systems::crowd`].
//!
//! Membership lookups go through `FxHashMap` indexes. Idle removal is a
//! `swap_remove` that patches the moved entry's slot.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::anchor::Anchor;

/// A walking peep with its cached depth anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivePeep {
    pub entity: Entity,
    pub anchor: Anchor,
}

#[derive(Resource, Debug)]
pub struct CrowdPool {
    all: Vec<Entity>,
    idle: Vec<Entity>,
    /// Slot of each idle peep in `idle`.
    idle_slots: FxHashMap<Entity, usize>,
    active: Vec<ActivePeep>,
    active_set: FxHashSet<Entity>,
    next_walk_id: u64,
}

impl CrowdPool {
    /// Create a pool where every peep starts idle.
    pub fn new(all: Vec<Entity>) -> Self {
        let mut pool = CrowdPool {
            idle: Vec::with_capacity(all.len()),
            idle_slots: FxHashMap::default(),
            all,
            active: Vec::new(),
            active_set: FxHashSet::default(),
            next_walk_id: 1,
        };
        pool.reset();
        pool
    }

    pub fn all(&self) -> &[Entity] {
        &self.all
    }

    pub fn idle(&self) -> &[Entity] {
        &self.idle
    }

    /// Active peeps in draw order (ascending anchor).
    pub fn active(&self) -> &[ActivePeep] {
        &self.active
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.active_set.contains(&entity)
    }

    pub fn is_idle(&self, entity: Entity) -> bool {
        self.idle_slots.contains_key(&entity)
    }

    /// Remove a uniformly chosen idle peep. `None` when nobody is idle.
    pub fn take_random_idle(&mut self, rng: &mut Rng) -> Option<Entity> {
        if self.idle.is_empty() {
            return None;
        }
        let i = rng.usize(0..self.idle.len());
        Some(self.remove_idle_at(i))
    }

    /// Give back a peep taken with [`take_random_idle`](Self::take_random_idle)
    /// that could not be activated.
    pub fn return_idle(&mut self, entity: Entity) {
        if !self.is_idle(entity) && !self.is_active(entity) {
            self.push_idle(entity);
        }
    }

    /// Put a peep in the crowd and restore draw order.
    ///
    /// The sort is stable, so peeps sharing an anchor keep insertion order.
    pub fn insert_active(&mut self, entity: Entity, anchor: Anchor) {
        self.active_set.insert(entity);
        self.active.push(ActivePeep { entity, anchor });
        self.active.sort_by(|a, b| a.anchor.cmp_depth(&b.anchor));
    }

    /// Move a peep from the crowd back to idle.
    ///
    /// Returns `false` if the peep was not active.
    pub fn retire(&mut self, entity: Entity) -> bool {
        if !self.active_set.remove(&entity) {
            return false;
        }
        // Draw order must survive, so this is an ordered remove.
        if let Some(i) = self.active.iter().position(|p| p.entity == entity) {
            self.active.remove(i);
        }
        self.push_idle(entity);
        true
    }

    /// Empty the crowd and mark every peep idle again.
    ///
    /// Returns the peeps that were active.
    pub fn reset(&mut self) -> Vec<Entity> {
        let was_active = self.active.drain(..).map(|p| p.entity).collect();
        self.active_set.clear();
        self.idle.clear();
        self.idle_slots.clear();
        for i in 0..self.all.len() {
            let entity = self.all[i];
            self.push_idle(entity);
        }
        was_active
    }

    /// Hand out a fresh walk id. Id 0 is reserved for idle walks.
    pub fn next_walk_id(&mut self) -> u64 {
        let id = self.next_walk_id;
        self.next_walk_id += 1;
        id
    }

    fn push_idle(&mut self, entity: Entity) {
        self.idle_slots.insert(entity, self.idle.len());
        self.idle.push(entity);
    }

    fn remove_idle_at(&mut self, i: usize) -> Entity {
        let entity = self.idle.swap_remove(i);
        self.idle_slots.remove(&entity);
        if let Some(moved) = self.idle.get(i) {
            self.idle_slots.insert(*moved, i);
        }
        entity
    }
}

impl Default for CrowdPool {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
