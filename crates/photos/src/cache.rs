use crate::photo::{PhotoError, PhotoUrl};
use fs_err as fs;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Pixel dimensions of a decoded photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}

/// URL-keyed record of dimensions measured from decoded images. These win
/// over the API metadata, which can disagree with the bytes actually served
/// (e.g. a resized `small` rendition). Entries are never evicted; `clear` is
/// the only way to drop them.
#[derive(Debug, Default)]
pub struct SizeCache {
    entries: RwLock<HashMap<PhotoUrl, Dimensions>>,
}

static SHARED: OnceLock<SizeCache> = OnceLock::new();

impl SizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> &'static SizeCache {
        SHARED.get_or_init(SizeCache::new)
    }

    pub fn get(&self, url: &PhotoUrl) -> Option<Dimensions> {
        self.entries.read().get(url).copied()
    }

    pub fn insert(&self, url: PhotoUrl, dimensions: Dimensions) {
        self.entries.write().insert(url, dimensions);
    }

    /// Records every entry of a JSON object mapping image URL to
    /// `{ "width": .., "height": .. }`. Returns how many were recorded.
    pub fn extend_from_json(&self, json: &str) -> Result<usize, PhotoError> {
        let measured: HashMap<PhotoUrl, Dimensions> = serde_json::from_str(json)?;
        let count = measured.len();
        for (url, dimensions) in measured {
            self.insert(url, dimensions);
        }
        log::debug!("Recorded {} measured photo sizes", count);
        Ok(count)
    }

    pub fn load(&self, path: &Path) -> Result<usize, PhotoError> {
        let json = fs::read_to_string(path)?;
        self.extend_from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_from_json() {
        let cache = SizeCache::new();
        let count = cache
            .extend_from_json(
                r#"{
                    "https://images.example/small/a": { "width": 400, "height": 267 },
                    "https://images.example/small/b": { "width": 400, "height": 600 }
                }"#,
            )
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get(&PhotoUrl::new("https://images.example/small/b")),
            Some(Dimensions::new(400, 600))
        );
    }

    #[test]
    fn test_extend_rejects_malformed_entries() {
        let cache = SizeCache::new();
        let result = cache.extend_from_json(r#"{ "u": { "width": 1 } }"#);
        assert!(matches!(result, Err(PhotoError::Decode(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = SizeCache::new().load(Path::new("/nonexistent/sizes.json"));
        assert!(matches!(result, Err(PhotoError::Io(_))));
    }

    #[test]
    fn test_insert_overwrites_and_clear_empties() {
        let cache = SizeCache::new();
        let url = PhotoUrl::new("u");
        cache.insert(url.clone(), Dimensions::new(1, 2));
        cache.insert(url.clone(), Dimensions::new(3, 4));
        assert_eq!(cache.get(&url), Some(Dimensions::new(3, 4)));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&url), None);
    }

    #[test]
    fn test_zero_height_aspect_ratio() {
        assert_eq!(Dimensions::new(10, 0).aspect_ratio(), 0.0);
        assert_eq!(Dimensions::new(10, 5).aspect_ratio(), 2.0);
    }
}
