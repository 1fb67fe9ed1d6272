//! ECS components for crowd entities.
//!
//! Every peep carries the same fixed set of components; nothing is added or
//! removed over its lifetime, only replaced.
//!
//! Submodules overview:
//! - [`anchor`] – depth value used to order draw calls
//! - [`mapposition`] – position of the peep on the stage
//! - [`peep`] – marker for crowd members
//! - [`sprite`] – texture key, crop rectangle and horizontal flip
//! - [`walk`] – walk timeline (the peep's animation handle)

pub mod anchor;
pub mod mapposition;
pub mod peep;
pub mod sprite;
pub mod walk;
