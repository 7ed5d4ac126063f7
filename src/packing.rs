//! The contract between the atlas builder and whatever decides where each
//! image goes.

use packos::{InputItem, SquarePacker};

/// A rectangle the builder wants placed. The `id` is chosen by the builder
/// and must come back unchanged on the matching [`PlacementRect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

/// Where a packer put a request, in canvas pixels. Padding is not included
/// in `width` or `height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRect {
    pub id: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PlacementRect {
    /// Whether the rect lies entirely inside a `side`x`side` canvas.
    pub fn fits_within(&self, side: u32) -> bool {
        let side = u64::from(side);

        u64::from(self.x) + u64::from(self.width) <= side
            && u64::from(self.y) + u64::from(self.height) <= side
    }

    /// Whether `other` comes within `padding` pixels of this rect on both
    /// axes. Rects that don't overlap when padded are at least `padding`
    /// pixels apart along some axis.
    pub fn overlaps_padded(&self, other: &PlacementRect, padding: u32) -> bool {
        let padding = u64::from(padding);

        let overlaps_axis = |a_min: u32, a_len: u32, b_min: u32, b_len: u32| {
            let (a_min, b_min) = (u64::from(a_min), u64::from(b_min));
            a_min < b_min + u64::from(b_len) + padding && b_min < a_min + u64::from(a_len) + padding
        };

        overlaps_axis(self.x, self.width, other.x, other.width)
            && overlaps_axis(self.y, self.height, other.y, other.height)
    }
}

/// Packs rectangles into one fixed square container.
///
/// Implementations see every request at once and pack them in a single step.
/// They may leave out requests that don't fit and may return placements in
/// any order, but every returned rect must lie inside the container, keep
/// `padding` pixels between itself and every other rect, and carry the size
/// of its request.
pub trait RectanglePacker: Send + Sync {
    fn pack(&self, side: u32, padding: u32, requests: &[PlacementRequest]) -> Vec<PlacementRect>;
}

/// The default packer, backed by [`packos::SquarePacker`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PackosPacker;

impl RectanglePacker for PackosPacker {
    fn pack(&self, side: u32, padding: u32, requests: &[PlacementRequest]) -> Vec<PlacementRect> {
        let mut packer = SquarePacker::new(side).padding(padding);
        packer.extend(
            requests
                .iter()
                .map(|request| InputItem::new(request.id, (request.width, request.height))),
        );

        let output = packer.pack();

        if !output.is_complete() {
            log::debug!(
                "Packer left {} of {} rects unplaced",
                output.unplaced().len(),
                requests.len()
            );
        }

        output
            .items()
            .iter()
            .map(|item| {
                let (x, y) = item.position();
                let (width, height) = item.size();

                PlacementRect {
                    id: item.id().get(),
                    x,
                    y,
                    width,
                    height,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

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
    fn fits_within() {
        assert!(rect(0, 0, 2048, 2048).fits_within(2048));
        assert!(rect(2047, 2047, 1, 1).fits_within(2048));
        assert!(!rect(2047, 0, 2, 1).fits_within(2048));
        assert!(!rect(u32::MAX, 0, 1, 1).fits_within(2048));
    }

    #[test]
    fn padded_overlap() {
        let a = rect(0, 0, 10, 10);

        assert!(a.overlaps_padded(&rect(5, 5, 10, 10), 0));
        assert!(!a.overlaps_padded(&rect(10, 0, 10, 10), 0));
        assert!(a.overlaps_padded(&rect(10, 0, 10, 10), 1));
        assert!(!a.overlaps_padded(&rect(11, 0, 10, 10), 1));
        assert!(!a.overlaps_padded(&rect(0, 11, 10, 10), 1));
    }

    #[test]
    fn packos_packer_honors_contract() {
        let requests: Vec<_> = (0..20)
            .map(|id| PlacementRequest {
                id,
                width: 16 + id * 3,
                height: 40 - id,
            })
            .collect();

        let placements = PackosPacker.pack(512, 1, &requests);

        assert_eq!(placements.len(), requests.len());

        for (i, placement) in placements.iter().enumerate() {
            let request = &requests[placement.id as usize];
            assert_eq!((placement.width, placement.height), (request.width, request.height));
            assert!(placement.fits_within(512));

            for other in &placements[i + 1..] {
                assert!(!placement.overlaps_padded(other, 1));
            }
        }
    }

    #[test]
    fn packos_packer_drops_what_does_not_fit() {
        let requests = [
            PlacementRequest {
                id: 0,
                width: 100,
                height: 100,
            },
            PlacementRequest {
                id: 1,
                width: 100,
                height: 100,
            },
        ];

        let placements = PackosPacker.pack(150, 1, &requests);

        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].id, 0);
    }
}
