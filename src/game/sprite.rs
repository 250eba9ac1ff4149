//! Sprite Metrics
//!
//! Table of art-asset facts the simulation needs: pixel size per image and
//! a vertical correction for images with padding baked in. The asset layer
//! fills this in; anything missing falls back to defaults so a bad asset
//! never aborts a tick.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

/// Pixel dimensions of an image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl SpriteSize {
    /// Create a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Catalog entry for one image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteInfo {
    /// Image size
    pub size: SpriteSize,
    /// Vertical correction applied when bottom-anchoring on the ground
    #[serde(default)]
    pub offset_y: f32,
}

/// Image name -> metrics lookup.
///
/// BTreeMap keeps iteration (and serialization) order stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteCatalog {
    /// Size used for any image not in the table
    pub fallback: SpriteSize,
    /// Known images
    pub entries: BTreeMap<String, SpriteInfo>,
}

/// Name of the optional ground tile image.
pub const GROUND_TILE: &str = "bg_ground";

/// Name of the coin image.
pub const COIN: &str = "coin";

impl SpriteCatalog {
    /// Catalog with no entries.
    pub fn empty(fallback: SpriteSize) -> Self {
        Self {
            fallback,
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, size: SpriteSize, offset_y: f32) {
        self.entries.insert(name.into(), SpriteInfo { size, offset_y });
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, size: SpriteSize, offset_y: f32) -> Self {
        self.insert(name, size, offset_y);
        self
    }

    /// Raw lookup.
    pub fn lookup(&self, name: &str) -> Option<&SpriteInfo> {
        self.entries.get(name)
    }

    /// True if the image is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Size of an image, or the fallback when unknown.
    pub fn size_of(&self, name: &str) -> SpriteSize {
        self.lookup(name).map_or(self.fallback, |info| info.size)
    }

    /// Vertical correction of an image, or 0 when unknown.
    pub fn offset_y(&self, name: &str) -> f32 {
        self.lookup(name).map_or(0.0, |info| info.offset_y)
    }
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        let hero = SpriteSize::new(80.0, 120.0);
        Self::empty(SpriteSize::new(64.0, 64.0))
            .with("hero_idle", hero, 0.0)
            .with("hero_walk1", hero, 0.0)
            .with("hero_walk2", hero, 0.0)
            .with("hero_walk3", hero, 0.0)
            .with("hero_jump", hero, 0.0)
            .with("hero_fall", hero, 0.0)
            .with("enemies/enemy_1", SpriteSize::new(96.0, 96.0), -75.0)
            .with("enemies/enemy_2", SpriteSize::new(96.0, 96.0), -75.0)
            .with(COIN, SpriteSize::new(40.0, 40.0), 0.0)
            .with("tree_1", SpriteSize::new(160.0, 240.0), 0.0)
            .with("tree_2", SpriteSize::new(140.0, 220.0), 0.0)
            .with("heart_full", SpriteSize::new(32.0, 32.0), 0.0)
            .with("heart_empty", SpriteSize::new(32.0, 32.0), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_enemy_offsets() {
        let catalog = SpriteCatalog::default();
        assert_eq!(catalog.offset_y("enemies/enemy_1"), -75.0);
        assert_eq!(catalog.offset_y("enemies/enemy_2"), -75.0);
        assert_eq!(catalog.offset_y("coin"), 0.0);
    }

    #[test]
    fn test_missing_image_falls_back() {
        let catalog = SpriteCatalog::default();
        assert_eq!(catalog.size_of("does_not_exist"), catalog.fallback);
        assert_eq!(catalog.offset_y("does_not_exist"), 0.0);
        assert!(!catalog.contains(GROUND_TILE));
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "fallback": { "width": 10.0, "height": 20.0 },
            "entries": {
                "enemies/bat": { "size": { "width": 50.0, "height": 30.0 }, "offset_y": -12.0 },
                "coin": { "size": { "width": 16.0, "height": 16.0 } }
            }
        }"#;
        let catalog: SpriteCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.offset_y("enemies/bat"), -12.0);
        assert_eq!(catalog.offset_y("coin"), 0.0);
        assert_eq!(catalog.size_of("coin"), SpriteSize::new(16.0, 16.0));
        assert_eq!(catalog.size_of("nope"), SpriteSize::new(10.0, 20.0));
    }
}
