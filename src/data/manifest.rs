use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};

use atlasmith::{fingerprint, AssetName, AtlasAsset, BuildOptions, Origin, FINGERPRINT_VERSION};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Records what went into an atlas image and where every sprite ended up, as
/// of the last pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Fingerprint of the packed names, as 16 hexadecimal digits.
    pub fingerprint: String,
    pub fingerprint_version: u32,
    pub side: u32,
    pub origin: Origin,
    pub pixels_per_unit: u32,

    /// The atlas image, relative to the atlasmith.toml that produced it.
    pub image: PathBuf,

    pub sprites: BTreeMap<AssetName, SpriteManifest>,

    /// Inputs that didn't fit into the atlas.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<AssetName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpriteManifest {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub pixels_per_unit: u32,

    /// The hexadecimal encoded hash of the input file's contents.
    pub hash: String,
}

pub fn format_fingerprint(value: u64) -> String {
    format!("{:016x}", value)
}

impl Manifest {
    pub fn from_atlas(
        atlas: &AtlasAsset,
        image: PathBuf,
        pixels_per_unit: u32,
        hashes: &BTreeMap<AssetName, String>,
    ) -> Self {
        let sprites = atlas
            .placements()
            .map(|(name, texture)| {
                let sprite = SpriteManifest {
                    x: texture.x,
                    y: texture.y,
                    width: texture.width,
                    height: texture.height,
                    pixels_per_unit: texture.pixels_per_unit,
                    hash: hashes.get(name).cloned().unwrap_or_default(),
                };

                (name.clone(), sprite)
            })
            .collect();

        Self {
            fingerprint: format_fingerprint(atlas.fingerprint()),
            fingerprint_version: FINGERPRINT_VERSION,
            side: atlas.side(),
            origin: atlas.origin(),
            pixels_per_unit,
            image,
            sprites,
            dropped: atlas.dropped().to_vec(),
        }
    }

    /// Reads the manifest at `path`, returning `None` if there isn't one yet.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ManifestError> {
        let path = path.as_ref();

        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ManifestError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };

        let manifest = serde_json::from_slice(&contents).map_err(|source| ManifestError::Json {
            path: path.to_owned(),
            source,
        })?;

        Ok(Some(manifest))
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ManifestError> {
        let path = path.as_ref();

        let serialized = serde_json::to_vec_pretty(self).map_err(|source| ManifestError::Json {
            path: path.to_owned(),
            source,
        })?;
        fs::write(path, serialized).map_err(|source| ManifestError::Io {
            path: path.to_owned(),
            source,
        })?;

        log::trace!("Saved manifest to {}", path.display());

        Ok(())
    }

    /// Tells whether packing `inputs` with `options` would reproduce the atlas
    /// this manifest describes. `inputs` maps each name to its content hash.
    pub fn is_up_to_date(
        &self,
        inputs: &BTreeMap<AssetName, String>,
        options: &BuildOptions,
    ) -> bool {
        if self.fingerprint_version != FINGERPRINT_VERSION
            || self.side != options.side()
            || self.origin != options.origin
            || self.pixels_per_unit != options.pixels_per_unit
        {
            return false;
        }

        // A partial atlas is always rebuilt.
        if !self.dropped.is_empty() {
            return false;
        }

        if self.fingerprint != format_fingerprint(fingerprint(inputs.keys())) {
            return false;
        }

        let previous: BTreeSet<&AssetName> = self.sprites.keys().collect();
        let current: BTreeSet<&AssetName> = inputs.keys().collect();
        if previous != current {
            return false;
        }

        inputs
            .iter()
            .all(|(name, hash)| self.sprites.get(name).map(|sprite| &sprite.hash) == Some(hash))
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{source} in {}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{source} in {}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod test {
    use super::*;

    fn inputs(entries: &[(&str, &str)]) -> BTreeMap<AssetName, String> {
        entries
            .iter()
            .map(|(name, hash)| (AssetName::from(*name), hash.to_string()))
            .collect()
    }

    fn manifest(entries: &[(&str, &str)]) -> Manifest {
        let sprites = entries
            .iter()
            .enumerate()
            .map(|(i, (name, hash))| {
                let sprite = SpriteManifest {
                    x: i as u32 * 10,
                    y: 0,
                    width: 8,
                    height: 8,
                    pixels_per_unit: 100,
                    hash: hash.to_string(),
                };

                (AssetName::from(*name), sprite)
            })
            .collect();

        Manifest {
            fingerprint: format_fingerprint(fingerprint(entries.iter().map(|(name, _)| name))),
            fingerprint_version: FINGERPRINT_VERSION,
            side: 2048,
            origin: Origin::BottomLeft,
            pixels_per_unit: 100,
            image: PathBuf::from("atlas.png"),
            sprites,
            dropped: Vec::new(),
        }
    }

    #[test]
    fn fingerprint_is_sixteen_hex_digits() {
        assert_eq!(format_fingerprint(0xab), "00000000000000ab");
    }

    #[test]
    fn up_to_date() {
        let options = BuildOptions::new(false, 100);
        let manifest = manifest(&[("a.png", "1111"), ("b.png", "2222")]);

        assert!(manifest.is_up_to_date(&inputs(&[("b.png", "2222"), ("a.png", "1111")]), &options));
    }

    #[test]
    fn changed_inputs_are_stale() {
        let options = BuildOptions::new(false, 100);
        let manifest = manifest(&[("a.png", "1111"), ("b.png", "2222")]);

        assert!(!manifest.is_up_to_date(&inputs(&[("a.png", "1111")]), &options));
        assert!(!manifest.is_up_to_date(&inputs(&[("a.png", "1111"), ("b.png", "3333")]), &options));
        assert!(!manifest.is_up_to_date(
            &inputs(&[("a.png", "1111"), ("b.png", "2222"), ("c.png", "3333")]),
            &options
        ));
    }

    #[test]
    fn changed_settings_are_stale() {
        let manifest = manifest(&[("a.png", "1111")]);
        let current = inputs(&[("a.png", "1111")]);

        assert!(!manifest.is_up_to_date(&current, &BuildOptions::new(true, 100)));
        assert!(!manifest.is_up_to_date(&current, &BuildOptions::new(false, 64)));
        assert!(!manifest.is_up_to_date(
            &current,
            &BuildOptions::new(false, 100).origin(Origin::TopLeft)
        ));
    }

    #[test]
    fn partial_atlas_is_stale() {
        let mut manifest = manifest(&[("a.png", "1111")]);
        manifest.dropped.push("b.png".into());

        assert!(!manifest.is_up_to_date(&inputs(&[("a.png", "1111")]), &BuildOptions::new(false, 100)));
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas-manifest.json");

        assert_eq!(Manifest::read_from_file(&path).unwrap(), None);

        let manifest = manifest(&[("a.png", "1111")]);
        manifest.write_to_file(&path).unwrap();

        assert_eq!(Manifest::read_from_file(&path).unwrap(), Some(manifest));
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas-manifest.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Manifest::read_from_file(&path),
            Err(ManifestError::Json { .. })
        ));
    }
}
