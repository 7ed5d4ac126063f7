//! The codec seam: turning encoded bytes into RGBA pixel grids.

use std::error::Error as StdError;

use thiserror::Error;

use crate::image::Image;

/// Decodes one encoded image into a top-left origin, row-major RGBA grid.
///
/// Decoders are called from several threads at once, one call per image.
/// Images wider or taller than `max_side` can't be used, so decoders that can
/// read the dimensions up front should fail with [`DecodeError::TooLarge`]
/// before allocating any pixels.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8], max_side: u32) -> Result<Image, DecodeError>;
}

/// Decodes PNG files with the `png` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngDecoder;

impl ImageDecoder for PngDecoder {
    fn decode(&self, bytes: &[u8], max_side: u32) -> Result<Image, DecodeError> {
        Image::decode_png_within(bytes, max_side)
    }
}

/// Plain functions decode without looking at the limit; the builder checks the
/// decoded size afterwards.
impl<F> ImageDecoder for F
where
    F: Fn(&[u8]) -> Result<Image, DecodeError> + Send + Sync,
{
    fn decode(&self, bytes: &[u8], _max_side: u32) -> Result<Image, DecodeError> {
        self(bytes)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Png {
        #[from]
        source: png::DecodingError,
    },

    #[error("unsupported pixel layout: {layout}")]
    UnsupportedLayout { layout: String },

    #[error("image is {width}x{height}, larger than the {max_side} pixel limit")]
    TooLarge {
        width: u32,
        height: u32,
        max_side: u32,
    },

    #[error(transparent)]
    Other {
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl DecodeError {
    /// Wraps an error from a decoder other than the built-in PNG one.
    pub fn other<E>(source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        DecodeError::Other {
            source: source.into(),
        }
    }
}
