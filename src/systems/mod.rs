//! Crowd systems.
//!
//! Submodules overview
//! - [`crowd`] – activate/retire/refill peeps and the observers driving them
//! - [`render`] – draw the crowd back to front through a [`render::DrawSurface`]
//! - [`time`] – update simulation time and delta
//! - [`walk`] – advance walk timelines and report finished walks
//! - [`walkgen`] – roll spawn parameters and build walk timelines

pub mod crowd;
pub mod render;
pub mod time;
pub mod walk;
pub mod walkgen;
