//! Voxel type factory keyed by string id

use std::collections::HashMap;

use crate::voxel::voxel::Voxel;

type Constructor = Box<dyn Fn() -> Voxel + Send + Sync>;

/// Id of the mandatory void entry
pub const VOID_ID: &str = "void";

/// Maps type ids to constructors. The `"void"` entry is always present and
/// doubles as the fallback: an unknown id constructs an empty cell, never an
/// error.
pub struct VoxelRegistry {
    types: HashMap<String, Constructor>,
}

impl VoxelRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry.register(VOID_ID, || Voxel::Empty);
        registry
    }

    /// Register a constructor under an id, replacing any previous entry
    pub fn register<F>(&mut self, id: impl Into<String>, constructor: F)
    where
        F: Fn() -> Voxel + Send + Sync + 'static,
    {
        self.types.insert(id.into(), Box::new(constructor));
    }

    /// Register a plain block type whose sprite id equals its type id
    pub fn register_block(&mut self, id: &str) {
        let block_id = id.to_owned();
        self.register(id, move || Voxel::block(block_id.clone()));
    }

    /// Construct a voxel by id, falling back to void on an unknown id
    pub fn construct(&self, id: &str) -> Voxel {
        match self.types.get(id) {
            Some(constructor) => constructor(),
            None => {
                log::warn!("unknown voxel id {id:?}, substituting void");
                Voxel::Empty
            }
        }
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }
}

impl Default for VoxelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
