use std::{
    fs, io,
    path::{Path, PathBuf},
};

use atlasmith::{BuildOptions, CanvasSize, Origin, OverflowPolicy};
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

static CONFIG_FILENAME: &str = "atlasmith.toml";

/// Configuration for one atlas, contained in an atlasmith.toml file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The name of the atlas, currently only used in logging.
    pub name: String,

    /// Use a 4096x4096 canvas instead of 2048x2048.
    #[serde(default)]
    pub large_canvas: bool,

    /// Scale factor recorded on every sprite for the renderer's benefit.
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: u32,

    /// Which corner the atlas rows and rects are measured from.
    #[serde(default)]
    pub origin: Origin,

    /// Whether a build where some images don't fit should fail or keep what
    /// fit.
    #[serde(default)]
    pub overflow: OverflowPolicy,

    /// Globs, relative to this file, matching the images to pack.
    #[serde(default)]
    pub inputs: Vec<InputConfig>,

    /// Where to write the atlas image, relative to this file.
    #[serde(default = "default_output_image")]
    pub output_image: PathBuf,

    /// Where to write the atlas manifest, relative to this file.
    #[serde(default = "default_output_manifest")]
    pub output_manifest: PathBuf,

    /// The path that this config came from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut config: Self = toml::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        Ok(config)
    }

    /// The path that paths in this Config should be considered relative to.
    pub fn folder(&self) -> &Path {
        match self.file_path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        }
    }

    pub fn output_image_path(&self) -> PathBuf {
        self.folder().join(&self.output_image)
    }

    pub fn output_manifest_path(&self) -> PathBuf {
        self.folder().join(&self.output_manifest)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            canvas: CanvasSize::from_allow_large(self.large_canvas),
            pixels_per_unit: self.pixels_per_unit,
            origin: self.origin,
            overflow: self.overflow,
        }
    }
}

fn default_pixels_per_unit() -> u32 {
    100
}

fn default_output_image() -> PathBuf {
    PathBuf::from("atlas.png")
}

fn default_output_manifest() -> PathBuf {
    PathBuf::from("atlas-manifest.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct InputConfig {
    /// A glob that will match all files that should be packed, relative to
    /// the config file.
    pub glob: String,
}

impl InputConfig {
    pub fn matcher(&self) -> Result<GlobMatcher, ConfigError> {
        let glob = Glob::new(&self.glob).map_err(|source| ConfigError::Glob {
            glob: self.glob.clone(),
            source,
        })?;

        Ok(glob.compile_matcher())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{source} in {}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid input glob '{glob}': {source}")]
    Glob {
        glob: String,
        source: globset::Error,
    },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
