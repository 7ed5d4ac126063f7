//! Copies placed images into the atlas pixel buffer.

use crate::{error::BuildError, image::Image, packing::PlacementRect};

/// Owns the atlas buffer while it's being filled in.
///
/// The buffer starts out fully transparent. Each placement is copied in row by
/// row; anything not covered by a placement stays transparent.
#[derive(Debug)]
pub struct AtlasComposer {
    side: u32,
    canvas: Image,
    placed: Vec<PlacementRect>,
}

impl AtlasComposer {
    pub fn new(side: u32) -> Self {
        log::debug!("Allocating {}x{} atlas buffer", side, side);

        Self {
            side,
            canvas: Image::new_empty_rgba8((side, side)),
            placed: Vec::new(),
        }
    }

    /// Copies `source` into the buffer at `rect`.
    ///
    /// Rects that leave the canvas, disagree with the size of `source`, or
    /// overlap an earlier rect are rejected without touching the buffer.
    pub fn place(&mut self, rect: &PlacementRect, source: &Image) -> Result<(), BuildError> {
        let side = self.side;
        let invalid = |reason| BuildError::InternalConsistency {
            rect: *rect,
            side,
            reason,
        };

        if !rect.fits_within(side) {
            return Err(invalid("rect extends past the canvas"));
        }

        if (rect.width, rect.height) != source.size() {
            return Err(invalid("rect size doesn't match its image"));
        }

        if self
            .placed
            .iter()
            .any(|other| rect.overlaps_padded(other, 0))
        {
            return Err(invalid("rect overlaps another placement"));
        }

        self.canvas.blit(source, (rect.x, rect.y));
        self.placed.push(*rect);

        Ok(())
    }

    /// Freezes the buffer.
    pub fn finish(self) -> Image {
        log::debug!("Composed {} images into the atlas", self.placed.len());

        self.canvas
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::image::Pixel;

    const RED: Pixel = Pixel::new(255, 0, 0, 255);

    fn rect(x: u32, y: u32, width: u32, height: u32) -> PlacementRect {
        PlacementRect {
            id: 0,
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn starts_transparent() {
        let canvas = AtlasComposer::new(16).finish();

        assert_eq!(canvas.size(), (16, 16));
        assert!(canvas.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn copies_rows_to_rect() {
        let mut source = Image::new_filled_rgba8((3, 2), RED);
        source.set_pixel((2, 1), Pixel::new(1, 2, 3, 4));

        let mut composer = AtlasComposer::new(8);
        composer.place(&rect(4, 5, 3, 2), &source).unwrap();
        let canvas = composer.finish();

        for y in 0..8 {
            for x in 0..8 {
                let inside = (4..7).contains(&x) && (5..7).contains(&y);
                let expected = if !inside {
                    Pixel::TRANSPARENT
                } else {
                    source.get_pixel((x - 4, y - 5))
                };

                assert_eq!(canvas.get_pixel((x, y)), expected, "at ({}, {})", x, y);
            }
        }

        // Destination offset of the last source row is x + (y + r) * side.
        let offset = 4 * (4 + (5 + 1) * 8) as usize;
        assert_eq!(&canvas.data()[offset..offset + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn rejects_rect_outside_canvas() {
        let source = Image::new_filled_rgba8((4, 4), RED);
        let mut composer = AtlasComposer::new(8);

        let err = composer.place(&rect(5, 0, 4, 4), &source).unwrap_err();
        assert!(matches!(err, BuildError::InternalConsistency { .. }));

        let canvas = composer.finish();
        assert!(canvas.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn rejects_mismatched_size() {
        let source = Image::new_filled_rgba8((4, 4), RED);
        let mut composer = AtlasComposer::new(8);

        let err = composer.place(&rect(0, 0, 4, 3), &source).unwrap_err();
        assert!(matches!(err, BuildError::InternalConsistency { .. }));
    }

    #[test]
    fn rejects_overlap() {
        let source = Image::new_filled_rgba8((4, 4), RED);
        let mut composer = AtlasComposer::new(8);

        composer.place(&rect(0, 0, 4, 4), &source).unwrap();
        let err = composer.place(&rect(3, 3, 4, 4), &source).unwrap_err();
        assert!(matches!(err, BuildError::InternalConsistency { .. }));

        composer.place(&rect(4, 4, 4, 4), &source).unwrap();
    }
}
