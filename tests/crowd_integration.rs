//! Crowd scheduler integration tests: sheet loading, recycling, refills and
//! resize handling on a headless world.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;

use crowdwalk::components::anchor::Anchor;
use crowdwalk::components::mapposition::MapPosition;
use crowdwalk::components::peep::Peep;
use crowdwalk::components::sprite::Sprite;
use crowdwalk::components::walk::Walk;
use crowdwalk::events::stage::{SheetLoadedEvent, StageResizedEvent};
use crowdwalk::events::walkfinished::WalkFinishedEvent;
use crowdwalk::resources::crowdconfig::CrowdConfig;
use crowdwalk::resources::crowdpool::CrowdPool;
use crowdwalk::resources::crowdrng::CrowdRng;
use crowdwalk::resources::spritesheet::SpriteSheet;
use crowdwalk::resources::stage::Stage;
use crowdwalk::resources::worldtime::WorldTime;
use crowdwalk::systems::crowd::{
    activate, init_crowd, recycle, refill, retire, sheet_loaded_observer, stage_resized_observer,
    walk_finished_observer,
};
use crowdwalk::systems::time::update_world_time;
use crowdwalk::systems::walk::walk_system;
use crowdwalk::systems::walkgen::{BOB_HEIGHT, MAX_LIFT};

const EPSILON: f32 = 1e-3;

/// Ids of every walk reported finished.
#[derive(Resource, Default)]
struct FinishedWalks(Vec<u64>);

fn record_finished(trigger: On<WalkFinishedEvent>, mut finished: ResMut<FinishedWalks>) {
    finished.0.push(trigger.event().walk_id);
}

fn make_world(w: f32, h: f32, rows: u32, cols: u32, seed: u64) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(Stage::new(w, h));
    world.insert_resource(CrowdRng::with_seed(seed));
    let mut config = CrowdConfig::new();
    config.rows = rows;
    config.cols = cols;
    world.insert_resource(config);
    world.insert_resource(FinishedWalks::default());
    world.spawn(Observer::new(sheet_loaded_observer));
    world.spawn(Observer::new(stage_resized_observer));
    world.spawn(Observer::new(walk_finished_observer));
    world.spawn(Observer::new(record_finished));
    world.flush();
    world
}

fn load_sheet(world: &mut World, width: f32, height: f32) {
    world.trigger(SheetLoadedEvent {
        tex_key: "people".to_string(),
        width,
        height,
    });
    world.flush();
}

/// 15x7 grid of 150x240 peeps on an 800x600 stage.
fn people_world(seed: u64) -> World {
    let mut world = make_world(800.0, 600.0, 15, 7, seed);
    load_sheet(&mut world, 2250.0, 1680.0);
    world
}

fn tick(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(walk_system);
    schedule.run(world);
    world.flush();
}

fn assert_partition(world: &World) {
    let pool = world.resource::<CrowdPool>();
    assert_eq!(pool.idle().len() + pool.active().len(), pool.total());
    for e in pool.all() {
        assert!(
            pool.is_idle(*e) ^ pool.is_active(*e),
            "{:?} must be in exactly one set",
            e
        );
    }
}

fn active_walk_ids(world: &World) -> Vec<u64> {
    let pool = world.resource::<CrowdPool>();
    pool.active()
        .iter()
        .map(|p| world.get::<Walk>(p.entity).unwrap().id)
        .collect()
}

#[test]
fn sheet_loaded_fills_crowd() {
    let world = people_world(1);
    let pool = world.resource::<CrowdPool>();
    assert_eq!(pool.total(), 105);
    assert_eq!(pool.active().len(), 105);
    assert!(pool.idle().is_empty());
    assert_eq!(world.resource::<SpriteSheet>().len(), 105);
    assert_partition(&world);
}

#[test]
fn peeps_spawn_within_stage_band() {
    let world = people_world(2);
    let stage = *world.resource::<Stage>();
    let pool = world.resource::<CrowdPool>();
    for peep in pool.active() {
        let sprite = world.get::<Sprite>(peep.entity).unwrap();
        let pos = world.get::<MapPosition>(peep.entity).unwrap();
        let anchor = world.get::<Anchor>(peep.entity).unwrap();
        let (w, h) = (sprite.width(), sprite.height());

        assert!(pos.pos.x >= -w - EPSILON && pos.pos.x <= stage.w + w + EPSILON);
        assert!(anchor.0 >= stage.h - h - EPSILON);
        assert!(anchor.0 < stage.h - h + MAX_LIFT);
        // The bob only ever lifts the peep above its anchor.
        assert!(pos.pos.y <= anchor.0 + EPSILON);
        assert!(pos.pos.y >= anchor.0 - BOB_HEIGHT - EPSILON);
        assert!((peep.anchor.0 - anchor.0).abs() < EPSILON);
    }
}

#[test]
fn flip_matches_direction() {
    let world = people_world(3);
    let pool = world.resource::<CrowdPool>();
    let mut flipped = 0;
    for peep in pool.active() {
        let sprite = world.get::<Sprite>(peep.entity).unwrap();
        let walk = world.get::<Walk>(peep.entity).unwrap();
        let x = &walk.tracks[0];
        let right_to_left = x.to < x.from;
        assert_eq!(sprite.flip_h, right_to_left);
        if sprite.flip_h {
            flipped += 1;
        }
    }
    assert!(flipped > 0 && flipped < 105);
}

#[test]
fn active_crowd_is_sorted_by_anchor() {
    let world = people_world(4);
    let anchors: Vec<f32> = world
        .resource::<CrowdPool>()
        .active()
        .iter()
        .map(|p| p.anchor.0)
        .collect();
    assert!(anchors.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn refill_spreads_walk_progress() {
    let world = people_world(5);
    let pool = world.resource::<CrowdPool>();
    let started = pool
        .active()
        .iter()
        .filter(|p| world.get::<Walk>(p.entity).unwrap().progress() > 0.05)
        .count();
    assert!(started > 80, "only {} peeps were jittered", started);
}

#[test]
fn population_never_drops_while_walking() {
    let mut world = people_world(6);
    // The slowest walk takes 20s; run 30s of frames.
    for _ in 0..120 {
        tick(&mut world, 0.25);
        let pool = world.resource::<CrowdPool>();
        assert_eq!(pool.active().len(), 105);
        assert!(pool.idle().is_empty());
        assert_partition(&world);
    }
    let finished = &world.resource::<FinishedWalks>().0;
    assert!(finished.len() >= 105, "only {} walks finished", finished.len());
}

#[test]
fn finished_walks_are_replaced_in_same_step() {
    let mut world = people_world(7);
    let before = active_walk_ids(&world);

    // Push one walk to its last instant.
    let target = world.resource::<CrowdPool>().active()[0].entity;
    world.get_mut::<Walk>(target).unwrap().set_progress(0.9999);
    tick(&mut world, 0.1);

    let finished = world.resource::<FinishedWalks>().0.clone();
    assert!(!finished.is_empty());
    let after = active_walk_ids(&world);
    assert_eq!(after.len(), 105);
    for id in &finished {
        assert!(before.contains(id));
        assert!(!after.contains(id));
    }
}

#[test]
fn retire_and_activate_keep_partition() {
    let mut world = people_world(8);
    let victims: Vec<Entity> = world.resource::<CrowdPool>().active()[..10]
        .iter()
        .map(|p| p.entity)
        .collect();
    for e in &victims {
        assert!(retire(&mut world, *e));
        assert!(world.get::<Walk>(*e).unwrap().is_killed());
        assert_partition(&world);
    }
    assert!(!retire(&mut world, victims[0]));
    assert_eq!(world.resource::<CrowdPool>().idle().len(), 10);

    for _ in 0..10 {
        assert!(activate(&mut world).is_some());
        assert_partition(&world);
    }
    assert!(activate(&mut world).is_none());
    assert_eq!(world.resource::<CrowdPool>().active().len(), 105);
}

#[test]
fn refill_restores_full_crowd_from_any_state() {
    let mut world = people_world(9);
    let some: Vec<Entity> = world.resource::<CrowdPool>().active()[..40]
        .iter()
        .map(|p| p.entity)
        .collect();
    for e in some {
        retire(&mut world, e);
    }
    assert_eq!(refill(&mut world), 105);
    assert_eq!(refill(&mut world), 105);
    let pool = world.resource::<CrowdPool>();
    assert_eq!(pool.active().len(), 105);
    assert!(pool.idle().is_empty());
    assert_partition(&world);
}

#[test]
fn resize_cancels_old_walks() {
    let mut world = people_world(10);
    let old_ids = active_walk_ids(&world);

    world.trigger(StageResizedEvent {
        fb_w: 1024,
        fb_h: 768,
        pixel_ratio: 1.0,
    });
    world.flush();

    let stage = *world.resource::<Stage>();
    assert!((stage.w - 1024.0).abs() < EPSILON);
    assert!((stage.h - 768.0).abs() < EPSILON);

    let new_ids = active_walk_ids(&world);
    assert_eq!(new_ids.len(), 105);
    assert!(new_ids.iter().all(|id| !old_ids.contains(id)));

    for _ in 0..100 {
        tick(&mut world, 0.25);
    }
    let finished = &world.resource::<FinishedWalks>().0;
    assert!(!finished.is_empty());
    assert!(finished.iter().all(|id| !old_ids.contains(id)));

    let pool = world.resource::<CrowdPool>();
    for peep in pool.active() {
        let anchor = world.get::<Anchor>(peep.entity).unwrap();
        let h = world.get::<Sprite>(peep.entity).unwrap().height();
        assert!(anchor.0 >= 768.0 - h - EPSILON);
    }
}

#[test]
fn resize_divides_framebuffer_by_pixel_ratio() {
    let mut world = people_world(14);
    world.trigger(StageResizedEvent {
        fb_w: 1280,
        fb_h: 720,
        pixel_ratio: 2.0,
    });
    world.flush();

    let stage = *world.resource::<Stage>();
    assert!((stage.w - 640.0).abs() < EPSILON);
    assert!((stage.h - 360.0).abs() < EPSILON);
    assert!((stage.pixel_ratio - 2.0).abs() < EPSILON);

    // Every peep must land inside the framebuffer once the ratio is applied.
    let pool = world.resource::<CrowdPool>();
    assert_eq!(pool.active().len(), 105);
    for peep in pool.active() {
        let pos = world.get::<MapPosition>(peep.entity).unwrap();
        assert!(pos.pos.y >= 0.0);
        assert!(pos.pos.y * stage.pixel_ratio < 720.0);
        assert!(peep.anchor.0 < stage.h - 240.0 + MAX_LIFT);
    }
}

#[test]
fn stale_completion_is_ignored() {
    let mut world = people_world(11);
    let entity = world.resource::<CrowdPool>().active()[0].entity;
    let old_id = world.get::<Walk>(entity).unwrap().id;

    refill(&mut world);
    let current = world.get::<Walk>(entity).unwrap().id;
    assert_ne!(current, old_id);

    assert!(recycle(&mut world, entity, old_id).is_none());
    world.trigger(WalkFinishedEvent {
        entity,
        walk_id: old_id,
    });
    world.flush();

    assert_eq!(world.get::<Walk>(entity).unwrap().id, current);
    assert_eq!(world.resource::<CrowdPool>().active().len(), 105);
    assert_partition(&world);
}

#[test]
fn completion_of_playing_walk_is_ignored() {
    let mut world = people_world(15);
    let entity = world.resource::<CrowdPool>().active()[0].entity;
    let id = world.get::<Walk>(entity).unwrap().id;

    assert!(recycle(&mut world, entity, id).is_none());
    let walk = world.get::<Walk>(entity).unwrap();
    assert_eq!(walk.id, id);
    assert!(walk.is_playing());
    assert!(world.resource::<CrowdPool>().is_active(entity));
    assert_partition(&world);
}

#[test]
fn single_peep_can_be_reselected() {
    let mut world = make_world(320.0, 240.0, 1, 1, 12);
    load_sheet(&mut world, 64.0, 128.0);
    let entity = world.resource::<CrowdPool>().active()[0].entity;
    let id = world.get::<Walk>(entity).unwrap().id;
    assert!(world.get_mut::<Walk>(entity).unwrap().advance(1000.0));

    let next = recycle(&mut world, entity, id);
    assert_eq!(next, Some(entity));
    let walk = world.get::<Walk>(entity).unwrap();
    assert_ne!(walk.id, id);
    assert!(walk.is_playing());
}

#[test]
fn sheet_is_sliced_only_once() {
    let mut world = people_world(13);
    let peeps = world.query::<&Peep>().iter(&world).count();
    let again = init_crowd(
        &mut world,
        &SheetLoadedEvent {
            tex_key: "people".to_string(),
            width: 100.0,
            height: 100.0,
        },
    );
    assert_eq!(again, 0);
    assert_eq!(world.query::<&Peep>().iter(&world).count(), peeps);
}

#[test]
fn nothing_happens_before_sheet_loads() {
    let mut world = make_world(800.0, 600.0, 15, 7, 14);
    world.insert_resource(CrowdPool::default());
    assert!(activate(&mut world).is_none());
    assert_eq!(refill(&mut world), 0);
    tick(&mut world, 0.1);
    assert_eq!(world.query::<&Peep>().iter(&world).count(), 0);
}

#[test]
fn seeded_crowds_are_reproducible() {
    let a = people_world(99);
    let b = people_world(99);
    let anchors = |w: &World| -> Vec<f32> {
        w.resource::<CrowdPool>()
            .active()
            .iter()
            .map(|p| p.anchor.0)
            .collect()
    };
    assert_eq!(anchors(&a), anchors(&b));
}
