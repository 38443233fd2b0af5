//! Isometric projection between grid coordinates and world-pixel space
//!
//! Grid coordinates are integer cell indices; world-pixel coordinates are
//! relative to the top-left corner of the whole grid's rendered image,
//! before any viewport pan or scale.

use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec2, IVec3, Mat3, Vec2};

/// Pixel footprint of a single voxel sprite.
///
/// `width` x `height` is the diamond top face, `depth` the vertical extent of
/// the cube sides below it. The full sprite image is
/// `width` x (`height` + `depth`) pixels. The projection assumes the standard
/// 2:1 diamond, i.e. `width == 2 * height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelDimensions {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Default for VoxelDimensions {
    fn default() -> Self {
        Self {
            width: 72,
            height: 36,
            depth: 36,
        }
    }
}

impl VoxelDimensions {
    /// Pixel size of the full sprite image for one voxel
    pub fn sprite_size(&self) -> IVec2 {
        IVec2::new(self.width, self.height + self.depth)
    }
}

/// Bidirectional mapping between grid cells and world-pixel positions.
///
/// The forward map places a cell's sprite anchor (image top-left). The
/// inverse map is approximate at diamond-tile boundaries, where rectangular
/// sprite bounding boxes overlap; see [`crate::math::probe::PickProbe`] for
/// the correction step.
#[derive(Clone, Debug)]
pub struct IsoProjection {
    dims: VoxelDimensions,
    /// Fixed affine undoing the projection: un-squash the vertical axis by
    /// x2, then the inverse isometric rotation.
    unproject: Mat3,
    /// Edge length of the pre-projection square tile, in rotated pixels.
    side: i32,
}

impl IsoProjection {
    pub fn new(dims: VoxelDimensions) -> Self {
        let unproject = Mat3::from_angle(3.0 * FRAC_PI_4) * Mat3::from_scale(Vec2::new(1.0, 2.0));
        let side = (dims.width as f32 * FRAC_PI_4.sin()).round() as i32;
        Self {
            dims,
            unproject,
            side,
        }
    }

    pub fn voxel_dimensions(&self) -> VoxelDimensions {
        self.dims
    }

    /// Rotated-space edge length of one tile, `round(width * sin 45deg)`
    pub fn tile_side(&self) -> i32 {
        self.side
    }

    /// Grid coordinate -> world-pixel anchor (sprite top-left corner).
    ///
    /// The half-tile offset on the x axis puts grid (0,0,0) with its diamond
    /// straddling world-pixel x = 0.
    pub fn map_to_global(&self, coord: IVec3) -> Vec2 {
        let half_w = self.dims.width as f32 * 0.5;
        let half_h = self.dims.height as f32 * 0.5;
        let gx = (-coord.x + coord.y) as f32 * half_w - half_w;
        let gy = (coord.y + coord.x) as f32 * half_h - (coord.z * self.dims.depth) as f32;
        Vec2::new(gx, gy)
    }

    /// World-pixel point -> approximate grid coordinate at the given layer.
    ///
    /// Lifts the point back onto layer 0, undoes the projection with the
    /// fixed affine, then floor-divides by the tile side. Exact at tile
    /// centers; off by at most one cell near diamond edges.
    pub fn global_to_map(&self, point: Vec2, layer: i32) -> IVec3 {
        let lifted = Vec2::new(point.x, point.y + (layer * self.dims.depth) as f32);
        let rotated = self.unproject.transform_point2(lifted);
        let mx = (-(rotated.y.round() as i32)).div_euclid(self.side);
        let my = (-(rotated.x.round() as i32)).div_euclid(self.side);
        IVec3::new(mx, my, layer)
    }
}

impl Default for IsoProjection {
    fn default() -> Self {
        Self::new(VoxelDimensions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> IsoProjection {
        IsoProjection::default()
    }

    #[test]
    fn test_forward_anchor() {
        let p = projection();
        assert_eq!(p.map_to_global(IVec3::ZERO), Vec2::new(-36.0, 0.0));
        assert_eq!(p.map_to_global(IVec3::new(1, 0, 0)), Vec2::new(-72.0, 18.0));
        assert_eq!(p.map_to_global(IVec3::new(0, 1, 0)), Vec2::new(0.0, 18.0));
        assert_eq!(p.map_to_global(IVec3::new(0, 0, 1)), Vec2::new(-36.0, -36.0));
    }

    #[test]
    fn test_tile_side() {
        // 72 * sin 45 = 50.9 -> 51
        assert_eq!(projection().tile_side(), 51);
    }

    #[test]
    fn test_pick_exact_at_face_centers() {
        let p = projection();
        let face_center = Vec2::new(36.0, 18.0);
        for z in 0..3 {
            for y in 0..8 {
                for x in 0..8 {
                    let coord = IVec3::new(x, y, z);
                    let click = p.map_to_global(coord) + face_center;
                    assert_eq!(p.global_to_map(click, z), coord);
                }
            }
        }
    }

    #[test]
    fn test_pick_within_one_tile_at_anchors() {
        let p = projection();
        for y in 0..8 {
            for x in 0..8 {
                let coord = IVec3::new(x, y, 0);
                let picked = p.global_to_map(p.map_to_global(coord), 0);
                assert!((picked.x - coord.x).abs() <= 1, "{coord} -> {picked}");
                assert!((picked.y - coord.y).abs() <= 1, "{coord} -> {picked}");
            }
        }
    }

    #[test]
    fn test_layer_lift() {
        let p = projection();
        let coord = IVec3::new(2, 3, 2);
        let click = p.map_to_global(coord) + Vec2::new(36.0, 18.0);
        assert_eq!(p.global_to_map(click, 2), coord);
        // Same screen point picked at layer 0 lands on a different cell
        assert_ne!(p.global_to_map(click, 0), coord);
    }
}
