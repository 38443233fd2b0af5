//! The voxel world: grid, projection, active layer and mutation protocol

use crate::core::types::{IVec3, Result, Vec2};
use crate::math::iso::{IsoProjection, VoxelDimensions};
use crate::math::probe::PickProbe;
use crate::visibility::{self, VisibilityMode};
use crate::voxel::grid::{Grid, GridDimensions};
use crate::voxel::registry::VoxelRegistry;
use crate::voxel::voxel::Voxel;

/// A single editable isometric voxel scene.
///
/// Owns the grid, the voxel type registry, the grid-to-pixel projection and
/// the per-world view state (active layer, visibility mode). All mutation
/// goes through [`set_voxel`](Self::set_voxel), which keeps the visibility
/// state of the affected neighborhood current.
pub struct VoxelWorld {
    grid: Grid,
    registry: VoxelRegistry,
    projection: IsoProjection,
    mode: VisibilityMode,
    active_layer: i32,
    probe: Option<PickProbe>,
    deferred: bool,
}

impl VoxelWorld {
    pub fn new(
        grid_dims: GridDimensions,
        voxel_dims: VoxelDimensions,
        registry: VoxelRegistry,
    ) -> Self {
        Self {
            grid: Grid::new(grid_dims),
            registry,
            projection: IsoProjection::new(voxel_dims),
            mode: VisibilityMode::default(),
            active_layer: 0,
            probe: None,
            deferred: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.grid.dimensions()
    }

    pub fn projection(&self) -> &IsoProjection {
        &self.projection
    }

    pub fn visibility_mode(&self) -> VisibilityMode {
        self.mode
    }

    /// Change the visibility mode and recompute the whole grid under it
    pub fn set_visibility_mode(&mut self, mode: VisibilityMode) {
        self.mode = mode;
        self.refresh_all();
    }

    /// Install the picking correction asset
    pub fn set_pick_probe(&mut self, probe: PickProbe) {
        self.probe = Some(probe);
    }

    // --- cell access -----------------------------------------------------

    pub fn get(&self, coord: IVec3) -> Result<&Voxel> {
        self.grid.get(coord)
    }

    /// Whether the cell currently draws; out-of-bounds is simply not drawn
    pub fn is_rendered(&self, coord: IVec3) -> bool {
        self.grid.is_rendered(coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &Voxel)> {
        self.grid.iter()
    }

    // --- mutation protocol -----------------------------------------------

    /// Construct a voxel by type id and install it. An unknown id places a
    /// void cell (registry fallback), which makes `place` with a bad id
    /// equivalent to `remove`.
    pub fn place(&mut self, coord: IVec3, id: &str) -> Result<()> {
        let voxel = self.registry.construct(id);
        self.set_voxel(coord, voxel)
    }

    /// Clear a cell back to void
    pub fn remove(&mut self, coord: IVec3) -> Result<()> {
        self.set_voxel(coord, Voxel::Empty)
    }

    /// Install `voxel` at `coord`, replacing the current occupant.
    ///
    /// Order matters: the new occupant is installed (coordinate and cached
    /// anchor assigned) before either hook runs, so both the old occupant's
    /// destroy pass and the new one's create pass read the post-mutation
    /// grid.
    pub fn set_voxel(&mut self, coord: IVec3, mut voxel: Voxel) -> Result<()> {
        if let Voxel::Block(block) = &mut voxel {
            block.coordinate = coord;
            block.anchor = self.projection.map_to_global(coord);
        }
        let old = self.grid.replace(coord, voxel)?;
        if self.deferred {
            return Ok(());
        }
        // Destroy and create hooks resolve to the same local pass: a block
        // came or went, so the inclusive 3x3x3 neighborhood is recomputed
        // from the post-mutation grid.
        if old.is_block() || self.grid.is_block(coord) {
            self.refresh_neighborhood(coord);
        }
        Ok(())
    }

    /// Toggle a block's highlight; a void cell ignores the request
    pub fn highlight(&mut self, coord: IVec3) -> Result<()> {
        if let Some(block) = self.grid.get_mut(coord)?.as_block_mut() {
            block.toggle_highlight();
        }
        Ok(())
    }

    // --- active layer ----------------------------------------------------

    pub fn active_layer(&self) -> i32 {
        self.active_layer
    }

    pub fn is_top_layer(&self, coord: IVec3) -> bool {
        coord.z == self.active_layer
    }

    /// Move the active layer by `delta`; a request leaving `[0, depth)` is
    /// silently ignored
    pub fn scroll_layer(&mut self, delta: i32) {
        let target = self.active_layer + delta;
        if target >= 0 && target < self.grid.dimensions().depth as i32 {
            self.active_layer = target;
        }
    }

    // --- picking ---------------------------------------------------------

    /// Grid coordinate -> world-pixel anchor
    pub fn map_to_global(&self, coord: IVec3) -> Vec2 {
        self.projection.map_to_global(coord)
    }

    /// World-pixel point -> grid coordinate at the active layer.
    ///
    /// Applies the probe correction when a probe is installed: the forward
    /// transform of the approximate cell gives the sprite corner, and the
    /// probe color at the click offset names the neighbor the click really
    /// belongs to. The result may be out of bounds near the grid edge;
    /// callers treat that as "no cell".
    pub fn global_to_map(&self, point: Vec2) -> IVec3 {
        let approx = self.projection.global_to_map(point, self.active_layer);
        let Some(probe) = &self.probe else {
            return approx;
        };
        let corner = self.projection.map_to_global(approx);
        let nudge = probe.nudge(point - corner);
        IVec3::new(approx.x + nudge.x, approx.y + nudge.y, approx.z)
    }

    // --- visibility maintenance ------------------------------------------

    /// Suppress per-mutation revisibility for a bulk edit
    pub fn begin_deferred_visibility(&mut self) {
        self.deferred = true;
    }

    /// Re-enable eager revisibility and recompute the whole grid once
    pub fn commit_deferred_visibility(&mut self) {
        self.deferred = false;
        self.refresh_all();
    }

    /// Recompute every block in the inclusive 3x3x3 neighborhood; candidates
    /// out of range or void skip silently
    fn refresh_neighborhood(&mut self, coord: IVec3) {
        let mut cells = Vec::with_capacity(27);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let candidate = coord + IVec3::new(dx, dy, dz);
                    if self.grid.is_block(candidate) {
                        cells.push(candidate);
                    }
                }
            }
        }
        self.refresh_cells(&cells);
    }

    /// Full-grid recompute, used by deferred commits and mode changes
    fn refresh_all(&mut self) {
        let cells: Vec<IVec3> = self
            .grid
            .iter()
            .filter(|(_, voxel)| voxel.is_block())
            .map(|(coord, _)| coord)
            .collect();
        self.refresh_cells(&cells);
        log::debug!("recomputed visibility for {} blocks", cells.len());
    }

    /// Two passes over the given block cells: render eligibility for all of
    /// them first, then outline flags, so outline inputs never see a stale
    /// occlusion flag from earlier in the same pass
    fn refresh_cells(&mut self, cells: &[IVec3]) {
        for &coord in cells {
            let rendered = visibility::render_eligibility(&self.grid, self.mode, coord);
            if let Ok(voxel) = self.grid.get_mut(coord) {
                if let Some(block) = voxel.as_block_mut() {
                    block.rendered = rendered;
                }
            }
        }
        for &coord in cells {
            let outline = visibility::outline_flags(&self.grid, coord);
            if let Ok(voxel) = self.grid.get_mut(coord) {
                if let Some(block) = voxel.as_block_mut() {
                    block.outline = outline;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::voxel::voxel::OUTLINE_SLOTS;

    fn registry() -> VoxelRegistry {
        let mut registry = VoxelRegistry::new();
        registry.register_block("grass-block");
        registry
    }

    fn world(w: u32, h: u32, d: u32) -> VoxelWorld {
        VoxelWorld::new(
            GridDimensions::new(w, h, d),
            VoxelDimensions::default(),
            registry(),
        )
    }

    fn snapshot(world: &VoxelWorld) -> Vec<(IVec3, bool, [bool; OUTLINE_SLOTS])> {
        world
            .iter()
            .filter_map(|(coord, voxel)| {
                voxel
                    .as_block()
                    .map(|b| (coord, b.is_rendered(), *b.outline()))
            })
            .collect()
    }

    #[test]
    fn test_place_assigns_coordinate_and_anchor() {
        let mut world = world(3, 3, 3);
        let coord = IVec3::new(2, 1, 1);
        world.place(coord, "grass-block").unwrap();
        let block = world.get(coord).unwrap().as_block().unwrap();
        assert_eq!(block.coordinate(), coord);
        assert_eq!(block.anchor(), world.map_to_global(coord));
    }

    #[test]
    fn test_place_out_of_bounds_is_error() {
        let mut world = world(3, 3, 3);
        match world.place(IVec3::new(0, 0, 3), "grass-block") {
            Err(Error::OutOfBounds { .. }) => {}
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_place_unknown_id_is_void() {
        let mut world = world(3, 3, 3);
        world.place(IVec3::ZERO, "no-such-block").unwrap();
        assert!(world.get(IVec3::ZERO).unwrap().is_empty());
    }

    #[test]
    fn test_place_remove_round_trip_restores_neighbors() {
        let mut world = world(5, 5, 5);
        // A small uneven cluster around the target
        for coord in [
            IVec3::new(1, 2, 2),
            IVec3::new(3, 2, 2),
            IVec3::new(2, 1, 2),
            IVec3::new(2, 2, 1),
            IVec3::new(3, 3, 2),
        ] {
            world.place(coord, "grass-block").unwrap();
        }
        let before = snapshot(&world);

        let target = IVec3::new(2, 2, 2);
        world.place(target, "grass-block").unwrap();
        assert_ne!(snapshot(&world).len(), before.len());
        world.remove(target).unwrap();

        assert!(world.get(target).unwrap().is_empty());
        assert_eq!(snapshot(&world), before);
    }

    #[test]
    fn test_enclosed_block_hidden_until_lateral_opens() {
        let mut world = world(3, 3, 2);
        let center = IVec3::new(1, 1, 0);
        for coord in [
            center,
            center + IVec3::Z,
            center + IVec3::X,
            center + IVec3::Y,
            center - IVec3::X,
            center - IVec3::Y,
        ] {
            world.place(coord, "grass-block").unwrap();
        }
        assert!(!world.is_rendered(center));

        world.remove(center + IVec3::Y).unwrap();
        assert!(world.is_rendered(center));
    }

    #[test]
    fn test_capped_floor_hides_exactly_the_center() {
        // 3x3 solid floor at z = 0 plus one capping block over the middle:
        // the middle cell is the only fully enclosed one, every edge block
        // keeps drawing
        let mut world = world(3, 3, 3);
        for y in 0..3 {
            for x in 0..3 {
                world.place(IVec3::new(x, y, 0), "grass-block").unwrap();
            }
        }
        world.place(IVec3::new(1, 1, 1), "grass-block").unwrap();

        for (coord, voxel) in world.grid().iter() {
            let Some(block) = voxel.as_block() else {
                continue;
            };
            if coord == IVec3::new(1, 1, 0) {
                assert!(!block.is_rendered(), "center should be enclosed");
            } else {
                assert!(block.is_rendered(), "{coord} should stay rendered");
            }
        }
    }

    #[test]
    fn test_scroll_layer_clamps() {
        let mut world = world(3, 3, 3);
        world.scroll_layer(2);
        assert_eq!(world.active_layer(), 2);
        world.scroll_layer(1);
        assert_eq!(world.active_layer(), 2);
        world.scroll_layer(-5);
        assert_eq!(world.active_layer(), 2);
        world.scroll_layer(-2);
        assert_eq!(world.active_layer(), 0);
    }

    #[test]
    fn test_highlight_toggles_block_only() {
        let mut world = world(3, 3, 3);
        world.place(IVec3::ZERO, "grass-block").unwrap();
        world.highlight(IVec3::ZERO).unwrap();
        assert!(
            world
                .get(IVec3::ZERO)
                .unwrap()
                .as_block()
                .unwrap()
                .is_highlighted()
        );
        // void cell ignores the request
        world.highlight(IVec3::new(1, 0, 0)).unwrap();
        assert!(world.get(IVec3::new(1, 0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_deferred_commit_matches_eager() {
        let blocks: Vec<IVec3> = (0..3)
            .flat_map(|y| (0..3).map(move |x| IVec3::new(x, y, 0)))
            .chain([IVec3::new(1, 1, 1), IVec3::new(2, 2, 1)])
            .collect();

        let mut eager = world(3, 3, 3);
        for &coord in &blocks {
            eager.place(coord, "grass-block").unwrap();
        }

        let mut deferred = world(3, 3, 3);
        deferred.begin_deferred_visibility();
        for &coord in &blocks {
            deferred.place(coord, "grass-block").unwrap();
        }
        deferred.commit_deferred_visibility();

        assert_eq!(snapshot(&eager), snapshot(&deferred));
    }

    #[test]
    fn test_picking_round_trip_at_face_centers() {
        let world = world(4, 4, 2);
        let face_center = Vec2::new(36.0, 18.0);
        for y in 0..4 {
            for x in 0..4 {
                let coord = IVec3::new(x, y, 0);
                let picked = world.global_to_map(world.map_to_global(coord) + face_center);
                assert_eq!(picked, coord);
            }
        }
    }

    #[test]
    fn test_probe_correction_applies() {
        use image::{Rgba, RgbaImage};

        let mut world = world(4, 4, 2);
        // Probe painted entirely green: every in-probe click shifts x by -1
        let size = world.projection().voxel_dimensions().sprite_size();
        world.set_pick_probe(PickProbe::new(RgbaImage::from_pixel(
            size.x as u32,
            size.y as u32,
            Rgba([0, 255, 0, 255]),
        )));

        let coord = IVec3::new(2, 2, 0);
        let click = world.map_to_global(coord) + Vec2::new(36.0, 18.0);
        assert_eq!(world.global_to_map(click), coord - IVec3::X);
    }
}
