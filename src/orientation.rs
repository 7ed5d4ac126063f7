//! Reconciles the row order of decoded images with the row order the atlas
//! is consumed in.
//!
//! Decoders hand back images whose first row is the topmost one. Most
//! renderers sample textures with the origin in the bottom-left corner, so by
//! default every source image is flipped vertically before it's packed. Rects
//! reported by the atlas are in the same convention as its pixel buffer.

use serde::{Deserialize, Serialize};

use crate::image::Image;

/// Where row zero of the atlas buffer lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Row zero is the bottom of the image, as OpenGL-style samplers expect.
    BottomLeft,

    /// Row zero is the top of the image, matching decoders and image files.
    TopLeft,
}

impl Default for Origin {
    fn default() -> Self {
        Origin::BottomLeft
    }
}

impl Origin {
    /// Whether rows need to be reversed to convert between this origin and
    /// the top-left origin that decoders and image files use.
    pub fn flips_rows(self) -> bool {
        match self {
            Origin::BottomLeft => true,
            Origin::TopLeft => false,
        }
    }
}

/// Converts a freshly decoded, top-left origin image into `target`'s
/// convention. Dimensions and channel values are preserved.
pub fn orient(mut image: Image, target: Origin) -> Image {
    if target.flips_rows() {
        image.flip_vertical();
    }

    image
}
