//! Error types for the isogrid core

use thiserror::Error;

/// Grid axis, carried by [`Error::OutOfBounds`] to name the offending
/// coordinate component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// A grid coordinate outside `[0, dim)`. Recoverable: callers issuing
    /// coordinates near the grid edge treat this as "no such cell".
    #[error("coordinate out of bounds: {axis} = {value}")]
    OutOfBounds { axis: Axis, value: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
