//! Per-category view models.
//!
//! Each view owns its remote-resource slots and its pure UI state, exposes
//! reducer methods that never perform I/O, and an async `refresh` that
//! drives a fetch against any `SpaceApi` implementation. Rendering is
//! someone else's job.

pub mod apod;
pub mod earth;
pub mod neo;
pub mod rover;
