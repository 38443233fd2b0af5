//! Flat, bounds-checked 3-D voxel storage

use serde::{Deserialize, Serialize};

use crate::core::error::{Axis, Error};
use crate::core::types::{IVec3, Result};
use crate::voxel::voxel::Voxel;

/// Grid extents, fixed for the lifetime of a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl GridDimensions {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cell slots
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }
}

/// Contiguous z-major grid of voxel cells.
///
/// Every in-range slot always holds a voxel; an empty cell is the explicit
/// [`Voxel::Empty`], never an absent value, so any in-bounds coordinate can
/// be queried without a null case.
#[derive(Clone, Debug)]
pub struct Grid {
    dims: GridDimensions,
    slots: Vec<Voxel>,
}

impl Grid {
    /// Create a grid with every slot empty. Dimensions must be positive.
    pub fn new(dims: GridDimensions) -> Self {
        assert!(
            dims.width > 0 && dims.height > 0 && dims.depth > 0,
            "grid dimensions must be positive"
        );
        Self {
            dims,
            slots: vec![Voxel::Empty; dims.volume()],
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Slot index for a coordinate: z-major, y-middle, x-minor
    fn index(&self, coord: IVec3) -> Result<usize> {
        let w = self.dims.width as i32;
        let h = self.dims.height as i32;
        let d = self.dims.depth as i32;
        if coord.x < 0 || coord.x >= w {
            return Err(Error::OutOfBounds {
                axis: Axis::X,
                value: coord.x,
            });
        }
        if coord.y < 0 || coord.y >= h {
            return Err(Error::OutOfBounds {
                axis: Axis::Y,
                value: coord.y,
            });
        }
        if coord.z < 0 || coord.z >= d {
            return Err(Error::OutOfBounds {
                axis: Axis::Z,
                value: coord.z,
            });
        }
        Ok((w * h * coord.z + w * coord.y + coord.x) as usize)
    }

    pub fn contains(&self, coord: IVec3) -> bool {
        self.index(coord).is_ok()
    }

    pub fn get(&self, coord: IVec3) -> Result<&Voxel> {
        let index = self.index(coord)?;
        Ok(&self.slots[index])
    }

    pub fn get_mut(&mut self, coord: IVec3) -> Result<&mut Voxel> {
        let index = self.index(coord)?;
        Ok(&mut self.slots[index])
    }

    /// Swap in a new occupant, returning the old one
    pub fn replace(&mut self, coord: IVec3, voxel: Voxel) -> Result<Voxel> {
        let index = self.index(coord)?;
        Ok(std::mem::replace(&mut self.slots[index], voxel))
    }

    /// Occlusion query: out-of-bounds cells never occlude
    pub fn is_rendered(&self, coord: IVec3) -> bool {
        self.get(coord).map(Voxel::is_rendered).unwrap_or(false)
    }

    /// Whether the cell holds a block; out-of-bounds counts as no
    pub fn is_block(&self, coord: IVec3) -> bool {
        self.get(coord).map(Voxel::is_block).unwrap_or(false)
    }

    /// Whether the cell is void. The world edge counts as solid here: the
    /// interior-occlusion test treats off-grid neighbors as sealing.
    pub fn is_empty_cell(&self, coord: IVec3) -> bool {
        self.get(coord).map(Voxel::is_empty).unwrap_or(false)
    }

    /// All in-range coordinates in canonical order: z ascending outer,
    /// then y, then x
    pub fn coords(&self) -> impl Iterator<Item = IVec3> + use<> {
        let (w, h, d) = (
            self.dims.width as i32,
            self.dims.height as i32,
            self.dims.depth as i32,
        );
        (0..d).flat_map(move |z| {
            (0..h).flat_map(move |y| (0..w).map(move |x| IVec3::new(x, y, z)))
        })
    }

    /// Coordinate/voxel pairs over the whole grid in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &Voxel)> {
        self.coords().zip(self.slots.iter())
    }
}
