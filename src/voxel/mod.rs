//! Voxel grid storage and mutation protocol

pub mod voxel;
pub mod grid;
pub mod registry;
pub mod world;

pub use grid::{Grid, GridDimensions};
pub use registry::VoxelRegistry;
pub use voxel::{Block, Voxel, OUTLINE_SLOTS};
pub use world::VoxelWorld;
