//! Chained pixel-space conversions: world-pixel <-> scene <-> screen
//!
//! World-pixel coordinates are relative to the whole grid's rendered image.
//! Scene coordinates are relative to the viewport's drawing surface, after
//! pan and scale. Screen coordinates are relative to the physical display,
//! offset by the viewport's fixed placement.

use crate::core::types::Vec2;

/// Axis-aligned pixel rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl PixelRect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }
}

/// Transform state for one view onto a world.
///
/// Multiple viewports may look at the same world with independent pan state;
/// the screen placement is fixed at construction.
#[derive(Clone, Debug)]
pub struct Viewport {
    screen_placement: Vec2,
    scene_placement: Vec2,
    scene_scale: f32,
}

impl Viewport {
    pub fn new(screen_placement: Vec2) -> Self {
        Self {
            screen_placement,
            scene_placement: Vec2::ZERO,
            scene_scale: 1.0,
        }
    }

    pub fn scene_placement(&self) -> Vec2 {
        self.scene_placement
    }

    pub fn scene_scale(&self) -> f32 {
        self.scene_scale
    }

    /// Uniform scale applied in the world->scene step. Externally controlled;
    /// zoom policy is not this type's concern. The scene->world step divides
    /// by the scale, so non-positive and non-finite values are refused and
    /// the current scale stays in effect.
    pub fn set_scene_scale(&mut self, scale: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("ignoring invalid scene scale {scale}");
            return;
        }
        self.scene_scale = scale;
    }

    /// Shift the scene by `delta` pixels; additive across calls
    pub fn pan(&mut self, delta: Vec2) {
        self.scene_placement += delta;
    }

    /// Hook for centering the view on a world-pixel point.
    // TODO: derive the pan delta once viewports know their scene extents.
    pub fn center_on(&mut self, _world_point: Vec2) {}

    // --- point conversions -----------------------------------------------

    pub fn world_to_scene(&self, point: Vec2) -> Vec2 {
        (point + self.scene_placement) * self.scene_scale
    }

    pub fn scene_to_world(&self, point: Vec2) -> Vec2 {
        point / self.scene_scale - self.scene_placement
    }

    pub fn scene_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.screen_placement
    }

    pub fn screen_to_scene(&self, point: Vec2) -> Vec2 {
        point + self.screen_placement
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        self.scene_to_screen(self.world_to_scene(point))
    }

    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        self.scene_to_world(self.screen_to_scene(point))
    }

    // --- rectangle conversions -------------------------------------------

    /// Scale applies to the size as well as the position
    pub fn world_rect_to_scene(&self, rect: PixelRect) -> PixelRect {
        PixelRect::new(self.world_to_scene(rect.pos), rect.size * self.scene_scale)
    }

    pub fn scene_rect_to_world(&self, rect: PixelRect) -> PixelRect {
        PixelRect::new(self.scene_to_world(rect.pos), rect.size / self.scene_scale)
    }

    /// Placement offset only; size is preserved
    pub fn scene_rect_to_screen(&self, rect: PixelRect) -> PixelRect {
        PixelRect::new(self.scene_to_screen(rect.pos), rect.size)
    }

    pub fn screen_rect_to_scene(&self, rect: PixelRect) -> PixelRect {
        PixelRect::new(self.screen_to_scene(rect.pos), rect.size)
    }

    pub fn world_rect_to_screen(&self, rect: PixelRect) -> PixelRect {
        self.scene_rect_to_screen(self.world_rect_to_scene(rect))
    }

    pub fn screen_rect_to_world(&self, rect: PixelRect) -> PixelRect {
        self.scene_rect_to_world(self.screen_rect_to_scene(rect))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
