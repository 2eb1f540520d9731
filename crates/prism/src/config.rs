use crate::geometry::Size;
use crate::masonry::{Axis, BalancedGridPacker, LayoutError};
use crate::radial::RadialArc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PickerConfig {
    pub size: f64,
    pub ring_thickness: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            size: 200.0,
            ring_thickness: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RadialConfig {
    pub arc: RadialArc,
    pub angle_offset: f64,
    pub size: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            arc: RadialArc::Leading,
            angle_offset: 0.0,
            size: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MasonryConfig {
    /// Kept signed so a bad value reaches the packer and is reported there.
    pub tracks: i64,
    pub spacing: f64,
    pub axis: Axis,
    pub width: f64,
    pub height: f64,
}

impl Default for MasonryConfig {
    fn default() -> Self {
        Self {
            tracks: 3,
            spacing: 4.0,
            axis: Axis::Vertical,
            width: 360.0,
            height: 360.0,
        }
    }
}

/// Per-invocation values that take precedence over the configured masonry
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MasonryOverrides {
    pub tracks: Option<i64>,
    pub spacing: Option<f64>,
    pub axis: Option<Axis>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl MasonryConfig {
    pub fn merged(&self, overrides: &MasonryOverrides) -> MasonryConfig {
        MasonryConfig {
            tracks: overrides.tracks.unwrap_or(self.tracks),
            spacing: overrides.spacing.unwrap_or(self.spacing),
            axis: overrides.axis.unwrap_or(self.axis),
            width: overrides.width.unwrap_or(self.width),
            height: overrides.height.unwrap_or(self.height),
        }
    }

    pub fn packer(&self) -> Result<BalancedGridPacker, LayoutError> {
        BalancedGridPacker::new(self.tracks, self.spacing, self.axis)
    }

    pub fn container(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub radial: RadialConfig,
    #[serde(default)]
    pub masonry: MasonryConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "prism", "prism").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `PRISM_<SECTION>__<KEY>` variables, e.g. `PRISM_MASONRY__TRACKS=4`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("PRISM")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn layered<S>(file: S, env: config::Environment) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads `path` (or the default location when `None`) layered under
/// `PRISM_*` environment variables. An explicit path must exist; the default
/// one is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (config_path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (get_config_path()?, false),
    };

    layered(
        config::File::from(config_path).required(required),
        environment(),
    )
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default configuration to {}", path.display());
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
