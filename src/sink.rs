//! Handing a finished atlas to whatever renders it.
//!
//! The atlas pipeline never touches renderer objects itself. Instead the
//! caller supplies a [`PixelSink`] that turns the composed buffer into
//! something renderable, and gets back sub-image views that pair that handle
//! with each sprite's rect.

use std::collections::BTreeMap;

use crate::{
    asset::{AtlasAsset, TextureAsset},
    asset_name::AssetName,
    orientation::Origin,
};

/// Receives an atlas buffer and produces a renderer-specific handle for it.
///
/// Uploads should happen on whatever thread owns the rendering system;
/// everything before this point can run elsewhere.
pub trait PixelSink {
    type Handle;
    type Error;

    /// `pixels` is `width * height` RGBA pixels, row-major, in the atlas's
    /// [`Origin`] convention.
    fn upload(
        &mut self,
        width: u32,
        height: u32,
        origin: Origin,
        pixels: &[u8],
    ) -> Result<Self::Handle, Self::Error>;
}

/// An atlas that has been handed to a [`PixelSink`].
#[derive(Debug)]
pub struct UploadedAtlas<H> {
    handle: H,
    fingerprint: u64,
    sprites: BTreeMap<AssetName, TextureAsset>,
}

/// A renderable view of one sprite: the uploaded texture plus the rect to
/// sample from it.
#[derive(Debug)]
pub struct SubImage<'a, H> {
    pub texture: &'a H,
    pub name: &'a AssetName,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub pixels_per_unit: u32,
}

impl<H> UploadedAtlas<H> {
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn sprite(&self, name: &str) -> Option<SubImage<'_, H>> {
        self.sprites
            .get_key_value(name)
            .map(|(name, texture)| self.view(name, texture))
    }

    /// Every sprite, ordered by name.
    pub fn sprites(&self) -> impl Iterator<Item = SubImage<'_, H>> {
        self.sprites
            .iter()
            .map(move |(name, texture)| self.view(name, texture))
    }

    fn view<'a>(&'a self, name: &'a AssetName, texture: &TextureAsset) -> SubImage<'a, H> {
        SubImage {
            texture: &self.handle,
            name,
            x: texture.x,
            y: texture.y,
            width: texture.width,
            height: texture.height,
            pixels_per_unit: texture.pixels_per_unit,
        }
    }
}

impl AtlasAsset {
    /// Uploads the atlas buffer through `sink` and pairs the resulting handle
    /// with every placement.
    pub fn upload<S: PixelSink>(&self, sink: &mut S) -> Result<UploadedAtlas<S::Handle>, S::Error> {
        log::debug!(
            "Uploading {}x{} atlas with {} sprites",
            self.side(),
            self.side(),
            self.len()
        );

        let handle = sink.upload(self.side(), self.side(), self.origin(), self.pixels())?;

        let sprites = self
            .textures()
            .iter()
            .map(|texture| (texture.name.clone(), texture.clone()))
            .collect();

        Ok(UploadedAtlas {
            handle,
            fingerprint: self.fingerprint(),
            sprites,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::image::Image;

    #[derive(Default)]
    struct RecordingSink {
        uploads: Vec<(u32, u32, usize)>,
    }

    impl PixelSink for RecordingSink {
        type Handle = usize;
        type Error = ();

        fn upload(
            &mut self,
            width: u32,
            height: u32,
            _origin: Origin,
            pixels: &[u8],
        ) -> Result<usize, ()> {
            self.uploads.push((width, height, pixels.len()));
            Ok(self.uploads.len())
        }
    }

    struct FailingSink;

    impl PixelSink for FailingSink {
        type Handle = ();
        type Error = &'static str;

        fn upload(&mut self, _: u32, _: u32, _: Origin, _: &[u8]) -> Result<(), &'static str> {
            Err("device lost")
        }
    }

    fn asset() -> AtlasAsset {
        let textures = vec![
            TextureAsset {
                name: "b".into(),
                x: 0,
                y: 0,
                width: 8,
                height: 4,
                pixels_per_unit: 32,
            },
            TextureAsset {
                name: "a".into(),
                x: 9,
                y: 0,
                width: 2,
                height: 2,
                pixels_per_unit: 32,
            },
        ];

        AtlasAsset::new(
            Image::new_empty_rgba8((16, 16)),
            Origin::BottomLeft,
            textures,
            Vec::new(),
        )
    }

    #[test]
    fn upload_produces_views() {
        let asset = asset();
        let mut sink = RecordingSink::default();

        let uploaded = asset.upload(&mut sink).unwrap();

        assert_eq!(sink.uploads, vec![(16, 16, 16 * 16 * 4)]);
        assert_eq!(*uploaded.handle(), 1);
        assert_eq!(uploaded.fingerprint(), asset.fingerprint());

        let a = uploaded.sprite("a").unwrap();
        assert_eq!(*a.texture, 1);
        assert_eq!((a.x, a.y, a.width, a.height), (9, 0, 2, 2));
        assert_eq!(a.pixels_per_unit, 32);

        assert!(uploaded.sprite("missing").is_none());

        let names: Vec<&str> = uploaded.sprites().map(|sprite| sprite.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn upload_errors_pass_through() {
        let err = asset().upload(&mut FailingSink).unwrap_err();

        assert_eq!(err, "device lost");
    }
}
