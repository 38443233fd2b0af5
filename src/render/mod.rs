//! Render pass over a world through a viewport
//!
//! Pixel work stays behind two collaborator seams: an [`ImageSource`]
//! resolving sprite ids and a [`Surface`] accepting blits. The pass itself
//! only decides what to draw and where.

use crate::core::types::{IVec2, IVec3};
use crate::viewport::Viewport;
use crate::voxel::voxel::OUTLINE_SLOTS;
use crate::voxel::world::VoxelWorld;

/// Sprite id of the highlight overlay
pub const HIGHLIGHT_OVERLAY_ID: &str = "overlay-yellow-highlight";

/// Sprite id of the dark-outline overlay for one edge slot
pub fn outline_overlay_id(slot: usize) -> String {
    format!("overlay-dark-outline-{slot}")
}

/// Resolves sprite images by string id
pub trait ImageSource {
    /// Handles are only ever passed by reference, so unsized image types
    /// are fine
    type Image: ?Sized;

    /// A miss is not an error; the render pass skips the blit
    fn get_image(&self, id: &str) -> Option<&Self::Image>;
}

/// Pixel compositing target
pub trait Surface {
    type Image: ?Sized;

    fn blit(&mut self, image: &Self::Image, position: IVec2);
}

/// Draw every rendered block up to the active layer.
///
/// Canonical painter order: the full grid, z ascending outer then y then x,
/// so deeper layers and farther tiles go down first. Layers above the active
/// one are skipped cell by cell, never by aborting the pass.
pub fn render_world<P, S>(world: &VoxelWorld, viewport: &Viewport, images: &P, surface: &mut S)
where
    P: ImageSource,
    S: Surface<Image = P::Image>,
{
    for (coord, voxel) in world.iter() {
        if coord.z > world.active_layer() {
            continue;
        }
        let Some(block) = voxel.as_block() else {
            continue;
        };
        if !block.is_rendered() {
            continue;
        }

        let position = viewport
            .world_to_screen(block.anchor())
            .round()
            .as_ivec2();

        blit_by_id(images, surface, &block.id, position);

        for slot in 0..OUTLINE_SLOTS {
            if block.outline()[slot] || top_layer_override(world, coord, slot) {
                blit_by_id(images, surface, &outline_overlay_id(slot), position);
            }
        }

        if block.is_highlighted() {
            blit_by_id(images, surface, HIGHLIGHT_OVERLAY_ID, position);
        }
    }
}

/// Presentation-time override for edge slots 0 and 1: on the active layer an
/// open lateral gap still draws the edge, even though the stored flag only
/// tracks gaps with nothing above them
fn top_layer_override(world: &VoxelWorld, coord: IVec3, slot: usize) -> bool {
    if !world.is_top_layer(coord) {
        return false;
    }
    match slot {
        0 => !world.is_rendered(coord - IVec3::Y),
        1 => !world.is_rendered(coord - IVec3::X),
        _ => false,
    }
}

fn blit_by_id<P, S>(images: &P, surface: &mut S, id: &str, position: IVec2)
where
    P: ImageSource,
    S: Surface<Image = P::Image>,
{
    match images.get_image(id) {
        Some(image) => surface.blit(image, position),
        None => log::debug!("no image for id {id:?}, skipping blit"),
    }
}
