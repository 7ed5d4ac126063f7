use crate::{geometry::Rect, id::Id};

/// An input to the rectangle packing routines.
///
/// `InputItem` is just a 2D size and a caller-chosen identifier. Consumers use
/// the ID to associate the packing results back to the application's own
/// objects.
#[derive(Debug, Clone, Copy)]
pub struct InputItem {
    pub(crate) id: Id,
    pub(crate) size: (u32, u32),
}

impl InputItem {
    #[inline]
    pub fn new(id: u32, size: (u32, u32)) -> Self {
        Self {
            id: Id::new(id),
            size,
        }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    pub(crate) fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }
}

/// An item that was placed by a packing function.
///
/// `OutputItem` exposes the ID from its `InputItem`, as well as the position
/// and size it was given. The size never includes padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputItem {
    pub(crate) id: Id,
    pub(crate) rect: Rect,
}

impl OutputItem {
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.rect.size
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        self.rect.max()
    }
}

/// The results from running a packing function.
///
/// Items are listed in the order the packer placed them, which is not the
/// order they were inserted in. Inputs that couldn't be placed are listed
/// separately by ID.
#[derive(Debug, Clone)]
pub struct PackOutput {
    pub(crate) side: u32,
    pub(crate) padding: u32,
    pub(crate) items: Vec<OutputItem>,
    pub(crate) unplaced: Vec<Id>,
}

impl PackOutput {
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[inline]
    pub fn padding(&self) -> u32 {
        self.padding
    }

    #[inline]
    pub fn items(&self) -> &[OutputItem] {
        &self.items
    }

    #[inline]
    pub fn unplaced(&self) -> &[Id] {
        &self.unplaced
    }

    /// Tells whether every input was placed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}
