#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rect {
    pub pos: (u32, u32),
    pub size: (u32, u32),
}

impl Rect {
    pub fn new(pos: (u32, u32), size: (u32, u32)) -> Self {
        Self { pos, size }
    }

    /// The exclusive far corner of the rect.
    pub fn max(&self) -> (u32, u32) {
        (
            self.pos.0.saturating_add(self.size.0),
            self.pos.1.saturating_add(self.size.1),
        )
    }

    /// Extends the rect by `amount` along its far edges. Two rects whose grown
    /// versions don't intersect are at least `amount` apart on some axis.
    pub fn grow(&self, amount: u32) -> Rect {
        Rect {
            pos: self.pos,
            size: (
                self.size.0.saturating_add(amount),
                self.size.1.saturating_add(amount),
            ),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let (self_max, other_max) = (self.max(), other.max());

        let x_overlap = self.pos.0 < other_max.0 && other.pos.0 < self_max.0;
        let y_overlap = self.pos.1 < other_max.1 && other.pos.1 < self_max.1;

        x_overlap && y_overlap
    }

    pub fn fits_within(&self, side: u32) -> bool {
        let max = self.max();
        max.0 <= side && max.1 <= side
    }
}
