//! atlasmith packs many independently supplied images into one square
//! texture atlas, along with a directory of where each named image ended up,
//! so a renderer can draw all of them from a single texture.
//!
//! ## Example
//! ```
//! use atlasmith::{AtlasBuilder, BuildOptions, Image, Pixel};
//!
//! // Images come in encoded; PNG is supported out of the box.
//! let mut red = Vec::new();
//! Image::new_filled_rgba8((64, 64), Pixel::new(255, 0, 0, 255))
//!     .encode_png(&mut red)
//!     .unwrap();
//!
//! let mut blue = Vec::new();
//! Image::new_filled_rgba8((64, 64), Pixel::new(0, 0, 255, 255))
//!     .encode_png(&mut blue)
//!     .unwrap();
//!
//! let builder = AtlasBuilder::new(BuildOptions::new(false, 100));
//! let atlas = builder.build(vec![("A", red), ("B", blue)]).unwrap();
//!
//! assert_eq!(atlas.side(), 2048);
//! assert!(atlas.contains_exactly(&["A", "B"]));
//!
//! let a = atlas.placement("A").unwrap();
//! assert_eq!((a.width, a.height), (64, 64));
//! ```

mod asset;
mod asset_name;
mod builder;
mod compose;
mod decode;
mod error;
mod fingerprint;
mod image;
mod orientation;
mod packing;
mod sink;

pub use asset::*;
pub use asset_name::*;
pub use builder::*;
pub use compose::*;
pub use decode::*;
pub use error::*;
pub use fingerprint::*;
pub use image::*;
pub use orientation::*;
pub use packing::*;
pub use sink::*;
