//! ECS resources made available to systems.
//!
//! Overview
//! - `crowdconfig` – settings loaded from the INI file
//! - `crowdpool` – every peep, split into idle and active sets
//! - `crowdrng` – shared random stream
//! - `debugmode` – presence toggles the debug overlay
//! - `spritesheet` – the loaded sheet and its grid slicing
//! - `stage` – current drawable area in logical pixels
//! - `texturestore` – loaded textures keyed by string IDs
//! - `worldtime` – simulation time and delta
pub mod crowdconfig;
pub mod crowdpool;
pub mod crowdrng;
pub mod debugmode;
pub mod spritesheet;
pub mod stage;
pub mod texturestore;
pub mod worldtime;
