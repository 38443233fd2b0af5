//! Color-coded picking correction
//!
//! The approximate inverse projection is ambiguous near diamond-tile edges,
//! where neighboring sprite bounding boxes overlap. The probe is a fixed
//! reference image the size of one voxel sprite: each overlap region is
//! painted a key color naming the adjacent cell the click actually belongs
//! to. It is an external asset (id `"mouse-help"` in the stock image pack),
//! never derived at runtime.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::core::types::{IVec2, Result, Vec2};

/// Click belongs to the cell behind: y - 1
pub const PROBE_RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
/// Click belongs to the cell to the right: x - 1
pub const PROBE_GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
/// Click belongs to the cell in front: y + 1
pub const PROBE_BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
/// Click belongs to the cell to the left: x + 1
pub const PROBE_YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

/// Wrapper around the probe reference image.
#[derive(Clone, Debug)]
pub struct PickProbe {
    image: RgbaImage,
}

impl PickProbe {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Load the probe from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(image::open(path)?.to_rgba8()))
    }

    /// Correction for a click at `offset` pixels from the sprite's top-left
    /// corner. Offsets outside the probe image, and any color other than the
    /// four keys, leave the approximation unchanged.
    pub fn nudge(&self, offset: Vec2) -> IVec2 {
        let ix = offset.x.round() as i32;
        let iy = offset.y.round() as i32;
        if ix < 0 || iy < 0 || ix >= self.image.width() as i32 || iy >= self.image.height() as i32 {
            return IVec2::ZERO;
        }
        let color = *self.image.get_pixel(ix as u32, iy as u32);
        if color == PROBE_RED {
            IVec2::new(0, -1)
        } else if color == PROBE_GREEN {
            IVec2::new(-1, 0)
        } else if color == PROBE_BLUE {
            IVec2::new(0, 1)
        } else if color == PROBE_YELLOW {
            IVec2::new(1, 0)
        } else {
            IVec2::ZERO
        }
    }
}
