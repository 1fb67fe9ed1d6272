//! Crowd scheduler.
//!
//! Moves peeps between the idle set and the walking crowd held by
//! [`CrowdPool`], keeping the on-stage population constant:
//!
//! - [`activate`] – pick a random idle peep, roll a new walk, add it to the crowd
//! - [`retire`] – take a peep out of the crowd and stop its walk
//! - [`refill`] – cancel every walk and rebuild the whole crowd
//! - [`recycle`] – retire a peep whose walk finished and activate a replacement
//!
//! These operate on `&mut World` and run synchronously. Observers never call
//! them directly; they queue them as world commands, which keeps completion
//! handling out of the system that raised the event.
//!
//! # Lifecycle
//!
//! 1. [`SheetLoadedEvent`] → [`init_crowd`]: slice the sheet, spawn one peep
//!    per cell, fill the crowd
//! 2. [`WalkFinishedEvent`] → [`recycle`]: one-for-one replacement
//! 3. [`StageResizedEvent`] → [`refill`] with the new stage size

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::anchor::Anchor;
use crate::components::mapposition::MapPosition;
use crate::components::peep::Peep;
use crate::components::sprite::Sprite;
use crate::components::walk::Walk;
use crate::events::stage::{SheetLoadedEvent, StageResizedEvent};
use crate::events::walkfinished::WalkFinishedEvent;
use crate::resources::crowdconfig::CrowdConfig;
use crate::resources::crowdpool::CrowdPool;
use crate::resources::crowdrng::CrowdRng;
use crate::resources::spritesheet::SpriteSheet;
use crate::resources::stage::Stage;
use crate::systems::walkgen::{pick_walk_style, reset_peep};

/// Put one idle peep on stage with a fresh walk.
///
/// Returns `None` when no peep is idle.
pub fn activate(world: &mut World) -> Option<Entity> {
    let stage = *world.get_resource::<Stage>()?;
    if !world.contains_resource::<CrowdRng>() {
        warn!("No CrowdRng resource, cannot activate peeps");
        return None;
    }
    let entity = world.resource_scope(|world, mut rng: Mut<CrowdRng>| {
        world
            .get_resource_mut::<CrowdPool>()?
            .take_random_idle(&mut rng.0)
    })?;
    let walk_id = world.resource_mut::<CrowdPool>().next_walk_id();

    let Some((width, height)) = world.get::<Sprite>(entity).map(|s| (s.width(), s.height()))
    else {
        warn!("Peep {:?} has no sprite, leaving it idle", entity);
        world.resource_mut::<CrowdPool>().return_idle(entity);
        return None;
    };

    let (props, walk) = world.resource_scope(|_, mut rng: Mut<CrowdRng>| {
        let props = reset_peep(&stage, width, height, &mut rng.0);
        let style = pick_walk_style(&mut rng.0);
        let walk = style(&props, walk_id, &mut rng.0);
        (props, walk)
    });

    let mut pos = MapPosition::new(props.start_x, props.start_y);
    walk.sample(&mut pos.pos);

    let mut peep = world.entity_mut(entity);
    if let Some(mut sprite) = peep.get_mut::<Sprite>() {
        sprite.flip_h = props.flip;
    }
    let anchor = Anchor(props.anchor);
    peep.insert((pos, anchor, walk));

    world
        .resource_mut::<CrowdPool>()
        .insert_active(entity, anchor);
    debug!(
        "Activated peep {:?} walk #{} {:?} anchor={:.1}",
        entity, walk_id, props.direction, props.anchor
    );
    Some(entity)
}

/// Take a peep out of the crowd and kill its walk.
///
/// Returns `false` if the peep was not in the crowd.
pub fn retire(world: &mut World, entity: Entity) -> bool {
    let retired = world
        .get_resource_mut::<CrowdPool>()
        .is_some_and(|mut pool| pool.retire(entity));
    if retired {
        if let Some(mut walk) = world.get_mut::<Walk>(entity) {
            walk.kill();
        }
        debug!("Retired peep {:?}", entity);
    }
    retired
}

/// Replace a peep whose walk finished.
///
/// Ignores the notification if `walk_id` is no longer the peep's current
/// walk, that walk has not finished, or the peep is not in the crowd. Returns the peep that was activated.
pub fn recycle(world: &mut World, entity: Entity, walk_id: u64) -> Option<Entity> {
    let current = world.get::<Walk>(entity).map(|w| (w.id, w.is_finished()));
    if current != Some((walk_id, true)) {
        debug!(
            "Ignoring stale completion of walk #{} on {:?} (current {:?})",
            walk_id, entity, current
        );
        return None;
    }
    if !retire(world, entity) {
        debug!("Ignoring completion for idle peep {:?}", entity);
        return None;
    }
    activate(world)
}

/// Cancel every walk and rebuild the crowd from all peeps.
///
/// Each new walk starts at a random point of its timeline so the crowd is
/// already spread across the stage. Returns the number of active peeps.
pub fn refill(world: &mut World) -> usize {
    let was_active = match world.get_resource_mut::<CrowdPool>() {
        Some(mut pool) => pool.reset(),
        None => return 0,
    };
    for entity in was_active {
        if let Some(mut walk) = world.get_mut::<Walk>(entity) {
            walk.kill();
        }
    }

    let mut positions = world.query::<(&mut Walk, &mut MapPosition)>();
    let mut count = 0;
    while let Some(entity) = activate(world) {
        let progress = world.resource_mut::<CrowdRng>().f32();
        if let Ok((mut walk, mut mp)) = positions.get_mut(world, entity) {
            walk.set_progress(progress);
            walk.sample(&mut mp.pos);
        }
        count += 1;
    }

    if let Some(stage) = world.get_resource::<Stage>() {
        info!(
            "Crowd refilled: {} peeps on a {}x{} stage",
            count, stage.w, stage.h
        );
    }
    count
}

/// Slice the loaded sheet, spawn one peep per cell and fill the crowd.
///
/// Runs once; later calls are ignored with a warning.
pub fn init_crowd(world: &mut World, event: &SheetLoadedEvent) -> usize {
    if world
        .get_resource::<CrowdPool>()
        .is_some_and(|pool| pool.total() > 0)
    {
        warn!("Crowd already initialized, ignoring sheet {}", event.tex_key);
        return 0;
    }

    let (rows, cols) = world
        .get_resource::<CrowdConfig>()
        .map(|c| (c.rows, c.cols))
        .unwrap_or_else(|| {
            let defaults = CrowdConfig::new();
            (defaults.rows, defaults.cols)
        });
    let sheet = SpriteSheet::new(event.tex_key.clone(), event.width, event.height, rows, cols);
    let (cell_w, cell_h) = sheet.cell_size();
    info!(
        "Slicing {} ({}x{}) into {} peeps of {:.1}x{:.1}",
        sheet.tex_key,
        sheet.width,
        sheet.height,
        sheet.len(),
        cell_w,
        cell_h
    );

    let peeps: Vec<Entity> = sheet
        .rects()
        .into_iter()
        .enumerate()
        .map(|(index, rect)| {
            world
                .spawn((
                    Peep { index },
                    Sprite::new(sheet.tex_key.clone(), rect),
                    MapPosition::default(),
                    Anchor::default(),
                    Walk::idle(),
                ))
                .id()
        })
        .collect();

    world.insert_resource(sheet);
    world.insert_resource(CrowdPool::new(peeps));
    if !world.contains_resource::<CrowdRng>() {
        world.insert_resource(CrowdRng::new());
    }
    refill(world)
}

/// Observer that builds the crowd once the sheet is ready.
pub fn sheet_loaded_observer(trigger: On<SheetLoadedEvent>, mut commands: Commands) {
    let event = trigger.event().clone();
    commands.queue(move |world: &mut World| {
        init_crowd(world, &event);
    });
}

/// Observer that records the new stage size and rebuilds the crowd.
pub fn stage_resized_observer(trigger: On<StageResizedEvent>, mut commands: Commands) {
    let event = *trigger.event();
    commands.queue(move |world: &mut World| {
        world.insert_resource(Stage::from_framebuffer(
            event.fb_w,
            event.fb_h,
            event.pixel_ratio,
        ));
        refill(world);
    });
}

/// Observer that recycles a peep when its walk finishes.
pub fn walk_finished_observer(trigger: On<WalkFinishedEvent>, mut commands: Commands) {
    let event = *trigger.event();
    commands.queue(move |world: &mut World| {
        recycle(world, event.entity, event.walk_id);
    });
}
