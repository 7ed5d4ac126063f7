//! The atlas pipeline: decode, orient, pack, compose, fingerprint.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    asset::{AtlasAsset, TextureAsset},
    asset_name::AssetName,
    compose::AtlasComposer,
    decode::{DecodeError, ImageDecoder, PngDecoder},
    error::BuildError,
    image::Image,
    orientation::{orient, Origin},
    packing::{PackosPacker, PlacementRect, PlacementRequest, RectanglePacker},
};

/// Empty margin kept between neighboring images so texture filtering doesn't
/// bleed one sprite into the next.
pub const ATLAS_PADDING: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasSize {
    /// 2048x2048
    Standard,

    /// 4096x4096
    Large,
}

impl CanvasSize {
    pub fn from_allow_large(allow_large_canvas: bool) -> Self {
        if allow_large_canvas {
            CanvasSize::Large
        } else {
            CanvasSize::Standard
        }
    }

    pub fn side(self) -> u32 {
        match self {
            CanvasSize::Standard => 2048,
            CanvasSize::Large => 4096,
        }
    }
}

/// What to do when some images don't fit in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Fail the build and list the images that didn't fit.
    Fail,

    /// Keep what fit and record the rest in [`AtlasAsset::dropped`]. A build
    /// where nothing fit still fails.
    KeepPlaced,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::Fail
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub canvas: CanvasSize,
    pub pixels_per_unit: u32,
    pub origin: Origin,
    pub overflow: OverflowPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::Standard,
            pixels_per_unit: 100,
            origin: Origin::default(),
            overflow: OverflowPolicy::default(),
        }
    }
}

impl BuildOptions {
    pub fn new(allow_large_canvas: bool, pixels_per_unit: u32) -> Self {
        Self {
            canvas: CanvasSize::from_allow_large(allow_large_canvas),
            pixels_per_unit,
            ..Self::default()
        }
    }

    pub fn origin(self, origin: Origin) -> Self {
        Self { origin, ..self }
    }

    pub fn overflow(self, overflow: OverflowPolicy) -> Self {
        Self { overflow, ..self }
    }

    pub fn side(&self) -> u32 {
        self.canvas.side()
    }
}

/// Builds atlases. Holds no state between builds, so one builder can serve
/// any number of builds, concurrently or not.
#[derive(Debug, Clone)]
pub struct AtlasBuilder<D = PngDecoder, P = PackosPacker> {
    options: BuildOptions,
    decoder: D,
    packer: P,
}

impl AtlasBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            decoder: PngDecoder,
            packer: PackosPacker,
        }
    }
}

impl<D: ImageDecoder, P: RectanglePacker> AtlasBuilder<D, P> {
    pub fn with_decoder<D2: ImageDecoder>(self, decoder: D2) -> AtlasBuilder<D2, P> {
        AtlasBuilder {
            options: self.options,
            decoder,
            packer: self.packer,
        }
    }

    pub fn with_packer<P2: RectanglePacker>(self, packer: P2) -> AtlasBuilder<D, P2> {
        AtlasBuilder {
            options: self.options,
            decoder: self.decoder,
            packer,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds an atlas from encoded images keyed by unique name.
    ///
    /// Either every step succeeds and a new [`AtlasAsset`] comes back, or
    /// the first problem is returned and nothing is produced.
    pub fn build<I, N, B>(&self, images: I) -> Result<AtlasAsset, BuildError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<AssetName>,
        B: AsRef<[u8]> + Sync,
    {
        let side = self.options.side();
        let entries = collect_entries(images)?;

        log::debug!(
            "Building {}x{} atlas from {} images",
            side,
            side,
            entries.len()
        );

        // Decoding is independent per image. Results stay in name order so
        // the error reported for a bad batch doesn't depend on scheduling.
        let prepared: Vec<Result<Image, BuildError>> = entries
            .par_iter()
            .map(|(name, bytes)| self.prepare(name, bytes.as_ref()))
            .collect();

        let (names, images): (Vec<AssetName>, Vec<Image>) = entries
            .into_iter()
            .map(|(name, _)| name)
            .zip(prepared)
            .map(|(name, image)| image.map(|image| (name, image)))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();

        let requests: Vec<PlacementRequest> = images
            .iter()
            .enumerate()
            .map(|(id, image)| PlacementRequest {
                id: id as u32,
                width: image.width(),
                height: image.height(),
            })
            .collect();

        let placements = self.packer.pack(side, ATLAS_PADDING, &requests);
        log::debug!("Packer placed {} of {} images", placements.len(), requests.len());

        let dropped = self.find_dropped(&names, &placements)?;

        if !dropped.is_empty() {
            if placements.is_empty() || self.options.overflow == OverflowPolicy::Fail {
                return Err(BuildError::PackingOverflow {
                    placed: placements.len(),
                    requested: names.len(),
                    side,
                    dropped,
                });
            }

            log::warn!(
                "{} images didn't fit in the {}x{} atlas and were left out: {}",
                dropped.len(),
                side,
                side,
                dropped
                    .iter()
                    .map(AssetName::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let mut composer = AtlasComposer::new(side);
        for placement in &placements {
            composer.place(placement, &images[placement.id as usize])?;
        }
        let buffer = composer.finish();

        let textures = placements
            .iter()
            .map(|placement| TextureAsset {
                name: names[placement.id as usize].clone(),
                x: placement.x,
                y: placement.y,
                width: placement.width,
                height: placement.height,
                pixels_per_unit: self.options.pixels_per_unit,
            })
            .collect();

        Ok(AtlasAsset::new(buffer, self.options.origin, textures, dropped))
    }

    /// Runs [`build`](#method.build) on the rayon thread pool and hands the
    /// result to `on_complete` from there.
    pub fn build_in_background<N, B, F>(self, images: Vec<(N, B)>, on_complete: F)
    where
        D: 'static,
        P: 'static,
        N: Into<AssetName> + Send + 'static,
        B: AsRef<[u8]> + Send + Sync + 'static,
        F: FnOnce(Result<AtlasAsset, BuildError>) + Send + 'static,
    {
        rayon::spawn(move || {
            let result = self.build(images);
            on_complete(result);
        });
    }

    fn prepare(&self, name: &AssetName, bytes: &[u8]) -> Result<Image, BuildError> {
        let side = self.options.side();

        let image = self
            .decoder
            .decode(bytes, side)
            .map_err(|source| match source {
                DecodeError::TooLarge { width, height, .. } => BuildError::SizeExceeded {
                    name: name.clone(),
                    width,
                    height,
                    side,
                },
                source => BuildError::Decode {
                    name: name.clone(),
                    source,
                },
            })?;

        let (width, height) = image.size();

        if width > side || height > side {
            return Err(BuildError::SizeExceeded {
                name: name.clone(),
                width,
                height,
                side,
            });
        }

        log::trace!("Decoded {} ({}x{})", name, width, height);

        Ok(orient(image, self.options.origin))
    }

    /// Checks that every placement refers to a distinct request and returns
    /// the names of the requests that weren't placed.
    fn find_dropped(
        &self,
        names: &[AssetName],
        placements: &[PlacementRect],
    ) -> Result<Vec<AssetName>, BuildError> {
        let side = self.options.side();
        let mut placed = vec![false; names.len()];

        for placement in placements {
            let invalid = |reason| BuildError::InternalConsistency {
                rect: *placement,
                side,
                reason,
            };

            match placed.get_mut(placement.id as usize) {
                None => return Err(invalid("placement has an unknown id")),
                Some(true) => return Err(invalid("id was placed more than once")),
                Some(seen) => *seen = true,
            }
        }

        Ok(names
            .iter()
            .zip(placed)
            .filter(|(_, placed)| !placed)
            .map(|(name, _)| name.clone())
            .collect())
    }
}

/// Builds an atlas with the default PNG decoder and packer.
///
/// Uses a 4096x4096 canvas when `allow_large_canvas` is set and 2048x2048
/// otherwise. `pixels_per_unit` is copied onto every placement untouched.
pub fn build_atlas<I, N, B>(
    images: I,
    allow_large_canvas: bool,
    pixels_per_unit: u32,
) -> Result<AtlasAsset, BuildError>
where
    I: IntoIterator<Item = (N, B)>,
    N: Into<AssetName>,
    B: AsRef<[u8]> + Sync,
{
    AtlasBuilder::new(BuildOptions::new(allow_large_canvas, pixels_per_unit)).build(images)
}

fn collect_entries<I, N, B>(images: I) -> Result<Vec<(AssetName, B)>, BuildError>
where
    I: IntoIterator<Item = (N, B)>,
    N: Into<AssetName>,
{
    let mut entries = BTreeMap::new();

    for (name, bytes) in images {
        let name = name.into();

        if entries.contains_key(&name) {
            return Err(BuildError::DuplicateName { name });
        }

        entries.insert(name, bytes);
    }

    if entries.is_empty() {
        return Err(BuildError::EmptyInput);
    }

    Ok(entries.into_iter().collect())
}
