//! Client-side data layer for the gateway's `/api` surface.
//!
//! Holds everything a front-end needs short of rendering: typed payload
//! models, a gateway API client, a generic remote-resource state machine,
//! and per-category view models updated by pure reducers. The only fetch
//! path is through the gateway; no upstream credential exists on this side
//! of the wire.

pub mod api;
pub mod models;
pub mod resource;
pub mod views;

#[cfg(test)]
pub(crate) mod testutils;
