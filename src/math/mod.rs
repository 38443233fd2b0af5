//! Coordinate transform pipeline: grid <-> world-pixel, plus the picking aids

pub mod iso;
pub mod probe;

pub use iso::{IsoProjection, VoxelDimensions};
pub use probe::PickProbe;
