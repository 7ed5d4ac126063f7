use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{asset_name::AssetName, fingerprint::fingerprint, image::Image, orientation::Origin};

/// Where one named image lives inside an atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextureAsset {
    pub name: AssetName,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,

    /// Scale factor supplied by whoever requested the atlas. Stored as-is for
    /// downstream consumers.
    pub pixels_per_unit: u32,
}

/// A finished atlas: the composed pixels plus the directory of what went
/// where.
///
/// Atlases are never modified after they're built. Building again produces a
/// new `AtlasAsset`.
#[derive(Debug, Clone)]
pub struct AtlasAsset {
    image: Image,
    origin: Origin,
    textures: Vec<TextureAsset>,
    index: HashMap<AssetName, usize>,
    dropped: Vec<AssetName>,
    fingerprint: u64,
}

impl AtlasAsset {
    pub(crate) fn new(
        image: Image,
        origin: Origin,
        textures: Vec<TextureAsset>,
        dropped: Vec<AssetName>,
    ) -> Self {
        let index = textures
            .iter()
            .enumerate()
            .map(|(i, texture)| (texture.name.clone(), i))
            .collect();

        let fingerprint = fingerprint(textures.iter().map(|texture| &texture.name));

        Self {
            image,
            origin,
            textures,
            index,
            dropped,
            fingerprint,
        }
    }

    /// Side length of the square atlas, in pixels.
    pub fn side(&self) -> u32 {
        self.image.width()
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The composed RGBA buffer, row-major with a stride of `side()` pixels.
    pub fn pixels(&self) -> &[u8] {
        self.image.data()
    }

    /// Which corner row zero of the buffer (and every rect's `y`) is
    /// measured from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Fingerprint of the names actually packed into this atlas.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Placement records in the order the packer produced them.
    pub fn textures(&self) -> &[TextureAsset] {
        &self.textures
    }

    pub fn all_names(&self) -> Vec<AssetName> {
        self.textures
            .iter()
            .map(|texture| texture.name.clone())
            .collect()
    }

    pub fn placement(&self, name: &str) -> Option<&TextureAsset> {
        self.index.get(name).map(|&i| &self.textures[i])
    }

    pub fn placements(&self) -> impl Iterator<Item = (&AssetName, &TextureAsset)> {
        self.textures.iter().map(|texture| (&texture.name, texture))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Images that were requested but didn't fit. Always empty unless the
    /// build was configured to keep partial results.
    pub fn dropped(&self) -> &[AssetName] {
        &self.dropped
    }

    /// Tells whether this atlas holds exactly the given set of names.
    ///
    /// The fingerprint rules out most mismatches cheaply; sets that pass are
    /// compared directly so a hash collision can't produce a false positive.
    pub fn contains_exactly<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();

        if fingerprint(&names) != self.fingerprint {
            return false;
        }

        let wanted: BTreeSet<&str> = names.iter().map(|name| name.as_ref()).collect();
        let present: BTreeSet<&str> = self.index.keys().map(AssetName::as_str).collect();

        wanted == present
    }
}
