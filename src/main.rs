//! Crowd Walk main entry point.
//!
//! An endless crowd of pedestrians walking across a window, using:
//! - **raylib** for windowing, textures, and drawing
//! - **bevy_ecs** for the peeps, their walks, and the crowd scheduler
//!
//! # Project Structure
//!
//! - [`components`] – peep components (sprite, position, anchor, walk)
//! - [`events`] – sheet loaded, stage resized, walk finished
//! - [`resources`] – pool, stage, config, textures, time
//! - [`systems`] – walk animation, crowd scheduling, rendering
//!
//! # Main Loop
//!
//! 1. Load config (INI + CLI), open the window, load the sprite sheet
//! 2. Trigger `SheetLoadedEvent`, which slices the sheet and fills the crowd
//! 3. Each frame:
//!    - Poll the window size and trigger `StageResizedEvent` on change
//!    - Advance time and walks; finished walks recycle their peep
//!    - Render the crowd back to front
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --sheet ./assets/people.png --rows 15 --cols 7
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use crowdwalk::events::stage::{SheetLoadedEvent, StageResizedEvent};
use crowdwalk::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use crowdwalk::resources::crowdconfig::CrowdConfig;
use crowdwalk::resources::crowdpool::CrowdPool;
use crowdwalk::resources::crowdrng::CrowdRng;
use crowdwalk::resources::stage::Stage;
use crowdwalk::resources::texturestore::TextureStore;
use crowdwalk::resources::worldtime::WorldTime;
use crowdwalk::systems::crowd::{
    sheet_loaded_observer, stage_resized_observer, walk_finished_observer,
};
use crowdwalk::systems::render::{RaylibSurface, render_crowd, render_debug_ui};
use crowdwalk::systems::time::update_world_time;
use crowdwalk::systems::walk::walk_system;
use log::{error, info, warn};
use raylib::prelude::*;
use std::path::PathBuf;

const SHEET_KEY: &str = "people";

/// Crowd Walk
#[derive(Parser)]
#[command(version, about = "An endless crowd of pedestrians cut from one sprite sheet.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./crowd.ini")]
    config: PathBuf,

    /// Sprite sheet image, overrides the config file.
    #[arg(long, value_name = "PATH")]
    sheet: Option<PathBuf>,

    /// Cells along the sheet width.
    #[arg(long)]
    rows: Option<u32>,

    /// Cells along the sheet height.
    #[arg(long)]
    cols: Option<u32>,

    /// Seed for a reproducible crowd.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut CrowdConfig) {
        if let Some(sheet) = &self.sheet {
            config.sheet_path = sheet.clone();
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = CrowdConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    cli.apply(&mut config);
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("Starting crowd with {} peeps", config.crowd_size());

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Crowd Walk")
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(match config.seed {
        Some(seed) => CrowdRng::with_seed(seed),
        None => CrowdRng::new(),
    });
    world.insert_resource(Stage::from_framebuffer(
        rl.get_screen_width(),
        rl.get_screen_height(),
        config.pixel_ratio,
    ));
    world.insert_resource(CrowdPool::default());

    world.spawn(Observer::new(sheet_loaded_observer));
    world.spawn(Observer::new(stage_resized_observer));
    world.spawn(Observer::new(walk_finished_observer));
    world.spawn(Observer::new(switch_debug_observer));
    world.flush();

    // --------------- Sprite sheet ---------------
    let mut textures = TextureStore::new();
    let sheet_path = config.sheet_path.to_string_lossy().into_owned();
    let loaded = match rl.load_texture(&thread, &sheet_path) {
        Ok(texture) => {
            let event = SheetLoadedEvent {
                tex_key: SHEET_KEY.to_string(),
                width: texture.width as f32,
                height: texture.height as f32,
            };
            textures.insert(SHEET_KEY, texture);
            Some(event)
        }
        Err(e) => {
            error!("Failed to load sprite sheet {}: {}", sheet_path, e);
            None
        }
    };
    world.insert_resource(textures);
    world.insert_resource(config);

    if let Some(event) = loaded {
        world.trigger(event);
        world.flush();
    }

    let mut update = Schedule::default();
    update.add_systems(walk_system);
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_F11) {
            world.trigger(SwitchDebugEvent {});
        }

        let (fb_w, fb_h) = (rl.get_screen_width(), rl.get_screen_height());
        let stage = *world.resource::<Stage>();
        if Stage::from_framebuffer(fb_w, fb_h, stage.pixel_ratio) != stage {
            world.trigger(StageResizedEvent {
                fb_w,
                fb_h,
                pixel_ratio: stage.pixel_ratio,
            });
        }
        world.flush();

        update_world_time(&mut world, rl.get_frame_time());
        update.run(&mut world);
        world.flush();

        let mut d = rl.begin_drawing(&thread);
        {
            let textures = world.resource::<TextureStore>();
            let mut surface = RaylibSurface::new(&mut d, textures, Color::WHITE);
            render_crowd(&world, &mut surface);
        }
        render_debug_ui(&world, &mut d);
    }
}
