//! World generators
//!
//! Bulk generation issues one mutation per cell, so both generators run with
//! revisibility deferred and commit a single full recompute at the end.

use noise::{NoiseFn, Perlin};

use crate::core::types::{IVec3, Result};
use crate::math::iso::VoxelDimensions;
use crate::voxel::grid::GridDimensions;
use crate::voxel::registry::VoxelRegistry;
use crate::voxel::world::VoxelWorld;

/// Flat world: every cell below `fill_height` holds `block_id`
pub fn generate_flat(
    grid_dims: GridDimensions,
    voxel_dims: VoxelDimensions,
    registry: VoxelRegistry,
    fill_height: u32,
    block_id: &str,
) -> Result<VoxelWorld> {
    let mut world = VoxelWorld::new(grid_dims, voxel_dims, registry);
    let fill = fill_height.min(grid_dims.depth);

    world.begin_deferred_visibility();
    for z in 0..fill as i32 {
        for y in 0..grid_dims.height as i32 {
            for x in 0..grid_dims.width as i32 {
                world.place(IVec3::new(x, y, z), block_id)?;
            }
        }
    }
    world.commit_deferred_visibility();

    log::info!(
        "generated flat {}x{}x{} world, filled to layer {}",
        grid_dims.width,
        grid_dims.height,
        grid_dims.depth,
        fill
    );
    Ok(world)
}

/// Rolling terrain: per-column fill height sampled from Perlin noise.
///
/// `frequency` is the noise step per cell; small values give wide hills.
/// Every column keeps at least one layer so the floor has no holes.
pub fn generate_heightmap(
    grid_dims: GridDimensions,
    voxel_dims: VoxelDimensions,
    registry: VoxelRegistry,
    seed: u32,
    frequency: f64,
    block_id: &str,
) -> Result<VoxelWorld> {
    let mut world = VoxelWorld::new(grid_dims, voxel_dims, registry);
    let perlin = Perlin::new(seed);
    let depth = grid_dims.depth as i32;

    world.begin_deferred_visibility();
    for y in 0..grid_dims.height as i32 {
        for x in 0..grid_dims.width as i32 {
            let sample = perlin.get([x as f64 * frequency, y as f64 * frequency]);
            let column = (((sample + 1.0) * 0.5 * depth as f64).round() as i32).clamp(1, depth);
            for z in 0..column {
                world.place(IVec3::new(x, y, z), block_id)?;
            }
        }
    }
    world.commit_deferred_visibility();

    log::info!(
        "generated {}x{} heightmap world (seed {seed})",
        grid_dims.width,
        grid_dims.height
    );
    Ok(world)
}
