//! Face-exposure and dark-outline computation
//!
//! Pure functions over a grid snapshot. The world applies the results to the
//! block afterwards, so reads never alias the write.
//!
//! An occlusion query asks whether a neighbor currently draws. Out-of-bounds
//! coordinates never occlude; the boolean helpers on [`Grid`] encode that.

use crate::core::types::IVec3;
use crate::voxel::grid::Grid;
use crate::voxel::voxel::OUTLINE_SLOTS;

/// Global per-world visibility setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibilityMode {
    /// Every block draws regardless of enclosure
    ShowAll,
    /// Fully enclosed blocks are hidden
    #[default]
    OnlyShowExposed,
}

/// Whether the block at `coord` draws at all.
///
/// In `OnlyShowExposed` mode a block is hidden only when it is fully
/// enclosed: a block sits directly above it and none of the four lateral
/// neighbors is void (the world edge seals). A coarse interior test, not a
/// visibility graph: some invisible faces still render.
pub fn render_eligibility(grid: &Grid, mode: VisibilityMode, coord: IVec3) -> bool {
    match mode {
        VisibilityMode::ShowAll => true,
        VisibilityMode::OnlyShowExposed => {
            let capped = grid.is_block(coord + IVec3::Z);
            let sealed = !grid.is_empty_cell(coord + IVec3::X)
                && !grid.is_empty_cell(coord + IVec3::Y)
                && !grid.is_empty_cell(coord - IVec3::X)
                && !grid.is_empty_cell(coord - IVec3::Y);
            !(capped && sealed)
        }
    }
}

/// Dark-outline flags for the block at `coord`, derived from its 3x3x3
/// neighborhood. Each edge overlay marks a face adjacent to an unoccluded
/// gap.
pub fn outline_flags(grid: &Grid, coord: IVec3) -> [bool; OUTLINE_SLOTS] {
    let occludes = |dx: i32, dy: i32, dz: i32| grid.is_rendered(coord + IVec3::new(dx, dy, dz));
    let mut outline = [false; OUTLINE_SLOTS];

    // Gap behind
    if !occludes(0, -1, 0) {
        if !occludes(1, -1, 0) {
            outline[5] = true;
        }
        if !occludes(0, -1, 1) {
            outline[0] = true;
        }
    }

    // Gap to the right
    if !occludes(-1, 0, 0) {
        if !occludes(-1, 1, 0) {
            outline[2] = true;
        }
        if !occludes(-1, 0, 1) {
            outline[1] = true;
        }
    }

    // Gap below
    if !occludes(0, 0, -1) {
        if !occludes(0, 1, 0) && !occludes(0, 1, -1) {
            outline[3] = true;
        }
        if !occludes(1, 0, 0) && !occludes(1, 0, -1) {
            outline[4] = true;
        }
    }

    outline
}
