//! Packos is a small library for packing rectangles. It was built for
//! atlasmith, which packs many small images into a single texture atlas.
//!
//! Packos currently exposes a single packing implementation,
//! [`SquarePacker`][SquarePacker], which places items into one fixed-size
//! square container with an optional margin between items.
//!
//! ## Example
//! ```
//! use packos::{InputItem, SquarePacker};
//!
//! // Construct a packer and configure it with your constraints.
//! let mut packer = SquarePacker::new(512).padding(1);
//!
//! // Insert the rectangles you want to pack. IDs are yours to choose and are
//! // handed back with each placement.
//! packer.insert(InputItem::new(0, (128, 64)));
//! packer.insert(InputItem::new(1, (64, 64)));
//! packer.insert(InputItem::new(2, (1, 300)));
//!
//! // Compute a solution. Packing consumes the packer.
//! let output = packer.pack();
//! assert_eq!(output.items().len(), 3);
//! ```
//!
//! [SquarePacker]: struct.SquarePacker.html

mod geometry;
mod id;
mod packer;
mod types;

pub use id::*;
pub use packer::*;
pub use types::*;
