//! Image pack loading and the id-keyed image cache
//!
//! A pack is a JSON manifest listing sprite ids and the files backing them.
//! The cache itself is storage-only; decoding happens once at load time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Deserialize;

use crate::core::types::Result;
use crate::render::ImageSource;

/// Id-keyed image store, generic over the image handle type
pub struct ImageCache<I> {
    images: HashMap<String, I>,
}

impl<I> ImageCache<I> {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    /// Insert under an id, replacing any previous entry
    pub fn insert(&mut self, id: impl Into<String>, image: I) {
        self.images.insert(id.into(), image);
    }

    pub fn get(&self, id: &str) -> Option<&I> {
        self.images.get(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl<I> Default for ImageCache<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> ImageSource for ImageCache<I> {
    type Image = I;

    fn get_image(&self, id: &str) -> Option<&I> {
        self.get(id)
    }
}

/// One manifest entry: sprite id and image path relative to the manifest
#[derive(Clone, Debug, Deserialize)]
pub struct PackEntry {
    pub id: String,
    pub path: PathBuf,
}

/// Image pack manifest (`pack.json`)
#[derive(Clone, Debug, Deserialize)]
pub struct PackManifest {
    pub images: Vec<PackEntry>,
}

impl PackManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Load every image named by the manifest at `path` into a cache.
///
/// Entry paths resolve relative to the manifest's directory. A missing or
/// undecodable file fails the whole load; sprite lookups at render time are
/// the place where misses downgrade to skips.
pub fn load_image_pack(path: impl AsRef<Path>) -> Result<ImageCache<RgbaImage>> {
    let path = path.as_ref();
    let manifest = PackManifest::from_json(&std::fs::read_to_string(path)?)?;
    let base = path.parent().unwrap_or(Path::new("."));

    let mut cache = ImageCache::new();
    for entry in &manifest.images {
        let image = image::open(base.join(&entry.path))?.to_rgba8();
        cache.insert(entry.id.clone(), image);
    }
    log::info!("loaded image pack {} ({} images)", path.display(), cache.len());
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_manifest_parses() {
        let manifest = PackManifest::from_json(
            r#"{
                "images": [
                    {"id": "grass-block", "path": "grass.png"},
                    {"id": "mouse-help", "path": "probe/mouse_help.png"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.images.len(), 2);
        assert_eq!(manifest.images[0].id, "grass-block");
        assert_eq!(manifest.images[1].path, PathBuf::from("probe/mouse_help.png"));
    }

    #[test]
    fn test_manifest_rejects_garbage() {
        assert!(PackManifest::from_json("not json").is_err());
        assert!(PackManifest::from_json(r#"{"sprites": []}"#).is_err());
    }

    #[test]
    fn test_cache_lookup() {
        let mut cache = ImageCache::new();
        cache.insert("grass-block", "pixels");
        assert_eq!(cache.get("grass-block"), Some(&"pixels"));
        assert_eq!(cache.get_image("grass-block"), Some(&"pixels"));
        assert!(cache.get("dirt-block").is_none());
    }

    #[test]
    fn test_load_image_pack_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([10, 200, 30, 255]))
            .save(dir.path().join("grass.png"))
            .unwrap();
        std::fs::write(
            dir.path().join("pack.json"),
            r#"{"images": [{"id": "grass-block", "path": "grass.png"}]}"#,
        )
        .unwrap();

        let cache = load_image_pack(dir.path().join("pack.json")).unwrap();
        assert_eq!(cache.len(), 1);
        let sprite = cache.get("grass-block").unwrap();
        assert_eq!(sprite.dimensions(), (4, 4));
        assert_eq!(*sprite.get_pixel(0, 0), Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pack.json"),
            r#"{"images": [{"id": "grass-block", "path": "nope.png"}]}"#,
        )
        .unwrap();
        assert!(load_image_pack(dir.path().join("pack.json")).is_err());
    }
}
