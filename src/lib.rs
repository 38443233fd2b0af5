//! Isogrid - an isometric voxel scene core
//!
//! A 3-D grid of typed cells projected onto a 2-D screen, with per-cell
//! visibility computed incrementally as the grid mutates. Image loading,
//! pixel compositing and the event loop are collaborator concerns behind
//! the traits in [`render`].

pub mod core;
pub mod math;
pub mod voxel;
pub mod visibility;
pub mod viewport;
pub mod render;
pub mod resources;
pub mod generation;
