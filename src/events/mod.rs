//! Event types and observers used by the crowd.
//!
//! Events decouple the frame loop, the walk animation and the crowd
//! scheduler. Handlers that mutate the pool are queued as world commands, so
//! a handler never runs inside the system that raised its event.
//!
//! Submodules:
//! - [`stage`] – sheet loaded and stage resized notifications
//! - [`switchdebug`] – toggle the debug overlay on/off
//! - [`walkfinished`] – a peep reached the far side of the stage
pub mod stage;
pub mod switchdebug;
pub mod walkfinished;
