use crate::{
    geometry::Rect,
    types::{InputItem, OutputItem, PackOutput},
};

/// Packs rectangles into a single square container of a fixed size.
///
/// Every input is inserted first, then [`pack`](#method.pack) runs once and
/// consumes the packer. Items that don't fit are reported in
/// [`PackOutput::unplaced`] rather than spilled into another container.
#[derive(Debug, Clone)]
pub struct SquarePacker {
    side: u32,
    padding: u32,
    items: Vec<InputItem>,
}

impl SquarePacker {
    pub fn new(side: u32) -> Self {
        Self {
            side,
            padding: 0,
            items: Vec::new(),
        }
    }

    /// Sets the empty margin kept between any two placed items.
    pub fn padding(self, padding: u32) -> Self {
        Self { padding, ..self }
    }

    pub fn insert(&mut self, item: InputItem) {
        self.items.push(item);
    }

    pub fn pack(self) -> PackOutput {
        let Self {
            side,
            padding,
            items,
        } = self;

        let mut remaining_items = items;

        // Largest first, then tallest, then by ID so results are stable.
        remaining_items.sort_by(|a, b| {
            b.area()
                .cmp(&a.area())
                .then(b.size.1.cmp(&a.size.1))
                .then(a.id.cmp(&b.id))
        });

        let num_items = remaining_items.len();
        log::trace!(
            "Packing {} items into {}x{} with padding {}",
            num_items,
            side,
            side,
            padding
        );

        let mut anchors = vec![(0, 0)];
        let mut packed: Vec<OutputItem> = Vec::with_capacity(num_items);
        let mut unplaced = Vec::new();

        for input_item in remaining_items {
            if input_item.size.0 == 0 || input_item.size.1 == 0 {
                log::trace!("Item {} has no area, skipping it", input_item.id);
                unplaced.push(input_item.id);
                continue;
            }

            log::trace!(
                "For item {} ({}x{}), evaluating these anchors: {:?}",
                input_item.id,
                input_item.size.0,
                input_item.size.1,
                anchors
            );

            // Prefer the lowest anchor, then the leftmost one.
            let fit_anchor = anchors
                .iter()
                .copied()
                .enumerate()
                .filter(|&(_, anchor)| {
                    let potential = Rect::new(anchor, input_item.size);
                    Self::is_free(&potential, side, padding, &packed)
                })
                .min_by_key(|&(_, anchor)| (anchor.1, anchor.0));

            match fit_anchor {
                Some((index, anchor)) => {
                    anchors.swap_remove(index);

                    log::trace!("Fit at anchor {:?}", anchor);

                    let rect = Rect::new(anchor, input_item.size);
                    let padded_max = rect.grow(padding).max();

                    let new_anchor_hor = (padded_max.0, anchor.1);
                    if new_anchor_hor.0 < side && !anchors.contains(&new_anchor_hor) {
                        anchors.push(new_anchor_hor);
                    }

                    let new_anchor_ver = (anchor.0, padded_max.1);
                    if new_anchor_ver.1 < side && !anchors.contains(&new_anchor_ver) {
                        anchors.push(new_anchor_ver);
                    }

                    packed.push(OutputItem {
                        id: input_item.id,
                        rect,
                    });
                }
                None => {
                    log::trace!("Item {} did not fit.", input_item.id);
                    unplaced.push(input_item.id);
                }
            }
        }

        log::trace!(
            "Finished packing: {} of {} items placed",
            packed.len(),
            num_items
        );

        PackOutput {
            side,
            padding,
            items: packed,
            unplaced,
        }
    }

    fn is_free(potential: &Rect, side: u32, padding: u32, packed: &[OutputItem]) -> bool {
        if !potential.fits_within(side) {
            return false;
        }

        let grown = potential.grow(padding);
        packed
            .iter()
            .all(|packed_item| !grown.intersects(&packed_item.rect.grow(padding)))
    }
}

impl Extend<InputItem> for SquarePacker {
    fn extend<I: IntoIterator<Item = InputItem>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Id;

    fn pack_uniform(count: u32, size: u32, side: u32, padding: u32) -> PackOutput {
        let mut packer = SquarePacker::new(side).padding(padding);
        packer.extend((0..count).map(|id| InputItem::new(id, (size, size))));
        packer.pack()
    }

    fn assert_separated(output: &PackOutput) {
        let items = output.items();

        for (i, a) in items.iter().enumerate() {
            assert!(a.rect.fits_within(output.side()), "{:?} out of bounds", a);

            for b in &items[i + 1..] {
                let x_gap = a.min().0 >= b.max().0 + output.padding()
                    || b.min().0 >= a.max().0 + output.padding();
                let y_gap = a.min().1 >= b.max().1 + output.padding()
                    || b.min().1 >= a.max().1 + output.padding();

                assert!(x_gap || y_gap, "{:?} and {:?} are too close", a, b);
            }
        }
    }

    #[test]
    fn empty() {
        let output = SquarePacker::new(128).pack();

        assert!(output.items().is_empty());
        assert!(output.is_complete());
    }

    #[test]
    fn single_item_at_origin() {
        let output = pack_uniform(1, 32, 128, 1);

        assert_eq!(output.items().len(), 1);
        assert_eq!(output.items()[0].position(), (0, 0));
        assert_eq!(output.items()[0].size(), (32, 32));
    }

    #[test]
    fn item_filling_container() {
        let output = pack_uniform(1, 128, 128, 4);

        assert!(output.is_complete());
        assert_eq!(output.items()[0].max(), (128, 128));
    }

    #[test]
    fn ids_round_trip() {
        let mut packer = SquarePacker::new(256).padding(1);
        packer.insert(InputItem::new(7, (10, 20)));
        packer.insert(InputItem::new(3, (40, 5)));
        packer.insert(InputItem::new(11, (8, 8)));

        let output = packer.pack();

        let mut ids: Vec<u32> = output.items().iter().map(|item| item.id().get()).collect();
        ids.sort();
        assert_eq!(ids, vec![3, 7, 11]);

        let tall = output
            .items()
            .iter()
            .find(|item| item.id() == Id::new(7))
            .unwrap();
        assert_eq!(tall.size(), (10, 20));
    }

    #[test]
    fn larger_items_are_placed_first() {
        let mut packer = SquarePacker::new(256);
        packer.insert(InputItem::new(0, (4, 4)));
        packer.insert(InputItem::new(1, (64, 64)));

        let output = packer.pack();

        assert_eq!(output.items()[0].id(), Id::new(1));
        assert_eq!(output.items()[0].position(), (0, 0));
    }

    #[test]
    fn padding_separates_items() {
        let output = pack_uniform(4, 64, 129, 1);

        assert!(output.is_complete());
        assert_separated(&output);
    }

    #[test]
    fn overflow_reports_unplaced() {
        let output = pack_uniform(5, 64, 129, 1);

        assert_eq!(output.items().len(), 4);
        assert_eq!(output.unplaced(), &[Id::new(4)]);
        assert_separated(&output);
    }

    #[test]
    fn oversized_item_is_unplaced() {
        let mut packer = SquarePacker::new(64);
        packer.insert(InputItem::new(0, (65, 1)));

        let output = packer.pack();

        assert!(output.items().is_empty());
        assert_eq!(output.unplaced(), &[Id::new(0)]);
    }

    #[test]
    fn zero_sized_item_is_unplaced() {
        let mut packer = SquarePacker::new(64);
        packer.insert(InputItem::new(0, (0, 10)));
        packer.insert(InputItem::new(1, (10, 10)));

        let output = packer.pack();

        assert_eq!(output.items().len(), 1);
        assert_eq!(output.unplaced(), &[Id::new(0)]);
    }

    #[test]
    fn many_mixed_items() {
        let mut packer = SquarePacker::new(512).padding(2);
        packer.extend((0..60).map(|id| {
            let size = (8 + (id * 7) % 50, 6 + (id * 13) % 40);
            InputItem::new(id, size)
        }));

        let output = packer.pack();

        assert!(output.is_complete());
        assert_separated(&output);
    }
}
