use crate::cache::Dimensions;
use derive_more::{AsRef, Deref, Display, From, Into};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct PhotoId(String);

crate::impl_string_newtype!(PhotoId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct PhotoUrl(String);

crate::impl_string_newtype!(PhotoUrl);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Urls {
    pub small: PhotoUrl,
    #[serde(default)]
    pub regular: Option<PhotoUrl>,
    #[serde(default)]
    pub full: Option<PhotoUrl>,
}

/// A photo as returned by the random-photos endpoint. Only the fields the
/// grid needs are decoded; everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub urls: Urls,
}

impl Photo {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Width over height. Photos with a zero height report `0.0`.
    pub fn aspect_ratio(&self) -> f64 {
        self.dimensions().aspect_ratio()
    }
}

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Failed to read photo list: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode photo list: {0}")]
    Decode(#[from] serde_json::Error),
}

pub fn parse_photos(json: &str) -> Result<Vec<Photo>, PhotoError> {
    let photos: Vec<Photo> = serde_json::from_str(json)?;
    log::debug!("Decoded {} photos", photos.len());
    Ok(photos)
}

pub fn load_photos(path: &Path) -> Result<Vec<Photo>, PhotoError> {
    let json = fs::read_to_string(path)?;
    parse_photos(&json)
}
