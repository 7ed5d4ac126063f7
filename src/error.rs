use thiserror::Error;

use crate::{asset_name::AssetName, decode::DecodeError, packing::PlacementRect};

/// Everything that can stop an atlas from being built. A build that returns
/// one of these produced no asset at all.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot build an atlas from zero images")]
    EmptyInput,

    #[error("image {name} was supplied more than once")]
    DuplicateName { name: AssetName },

    #[error("couldn't decode image {name}: {source}")]
    Decode {
        name: AssetName,
        #[source]
        source: DecodeError,
    },

    #[error("image {name} is {width}x{height}, which doesn't fit in a {side}x{side} atlas")]
    SizeExceeded {
        name: AssetName,
        width: u32,
        height: u32,
        side: u32,
    },

    #[error(
        "only {placed} of {requested} images fit in a {side}x{side} atlas; dropped: {}",
        join_names(.dropped)
    )]
    PackingOverflow {
        placed: usize,
        requested: usize,
        side: u32,
        dropped: Vec<AssetName>,
    },

    /// The packer handed back a placement that breaks its contract. This is a
    /// bug in the packer, not a problem with the input images.
    #[error("packer returned an invalid placement {rect:?} for a {side}x{side} atlas: {reason}")]
    InternalConsistency {
        rect: PlacementRect,
        side: u32,
        reason: &'static str,
    },
}

fn join_names(names: &[AssetName]) -> String {
    let names: Vec<&str> = names.iter().map(AssetName::as_str).collect();
    names.join(", ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn overflow_lists_dropped_names() {
        let err = BuildError::PackingOverflow {
            placed: 1,
            requested: 3,
            side: 2048,
            dropped: vec!["b".into(), "c".into()],
        };

        assert_eq!(
            err.to_string(),
            "only 1 of 3 images fit in a 2048x2048 atlas; dropped: b, c"
        );
    }

    #[test]
    fn size_exceeded_names_image() {
        let err = BuildError::SizeExceeded {
            name: "big".into(),
            width: 4000,
            height: 10,
            side: 2048,
        };

        assert_eq!(
            err.to_string(),
            "image big is 4000x10, which doesn't fit in a 2048x2048 atlas"
        );
    }
}
