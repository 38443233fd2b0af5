//! Voxel cell entities
//!
//! A grid slot always holds a [`Voxel`]: either the non-occluding,
//! non-rendered [`Voxel::Empty`] or a solid [`Block`]. Per-instance render
//! state lives on the block and is maintained by the visibility engine, not
//! by the block itself.

use crate::core::types::{IVec3, Vec2};

/// Number of dark-outline overlay slots per block, one per occlusion edge
pub const OUTLINE_SLOTS: usize = 6;

/// Solid occupant of one grid cell
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Type identifier, doubles as the base sprite id
    pub id: String,
    pub(crate) coordinate: IVec3,
    pub(crate) anchor: Vec2,
    pub(crate) rendered: bool,
    pub(crate) highlighted: bool,
    pub(crate) outline: [bool; OUTLINE_SLOTS],
}

impl Block {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinate: IVec3::ZERO,
            anchor: Vec2::ZERO,
            rendered: true,
            highlighted: false,
            outline: [false; OUTLINE_SLOTS],
        }
    }

    /// Grid coordinate, assigned when the block is placed into a world
    pub fn coordinate(&self) -> IVec3 {
        self.coordinate
    }

    /// Cached world-pixel top-left anchor, derived on placement
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn toggle_highlight(&mut self) {
        self.highlighted = !self.highlighted;
    }

    /// Dark-outline flags, one per occlusion edge
    pub fn outline(&self) -> &[bool; OUTLINE_SLOTS] {
        &self.outline
    }
}

/// Content of one grid cell
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Voxel {
    /// Void cell: never rendered, never occluding
    #[default]
    Empty,
    Block(Block),
}

impl Voxel {
    pub fn block(id: impl Into<String>) -> Self {
        Voxel::Block(Block::new(id))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Voxel::Empty)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Voxel::Block(_))
    }

    /// Whether this cell currently draws (and therefore occludes)
    pub fn is_rendered(&self) -> bool {
        match self {
            Voxel::Empty => false,
            Voxel::Block(block) => block.rendered,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Voxel::Empty => None,
            Voxel::Block(block) => Some(block),
        }
    }

    pub fn as_block_mut(&mut self) -> Option<&mut Block> {
        match self {
            Voxel::Empty => None,
            Voxel::Block(block) => Some(block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let block = Block::new("grass-block");
        assert!(block.is_rendered());
        assert!(!block.is_highlighted());
        assert_eq!(block.outline(), &[false; OUTLINE_SLOTS]);

        assert!(!Voxel::Empty.is_rendered());
        assert!(Voxel::block("grass-block").is_rendered());
    }

    #[test]
    fn test_highlight_toggles() {
        let mut block = Block::new("grass-block");
        block.toggle_highlight();
        assert!(block.is_highlighted());
        block.toggle_highlight();
        assert!(!block.is_highlighted());
    }
}
