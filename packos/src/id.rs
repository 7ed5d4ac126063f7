use std::fmt;

/// Identifies an input rectangle across a packing run.
///
/// IDs are chosen by the caller, usually an index into the caller's own list
/// of objects, and are handed back untouched on every placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u32);

impl Id {
    #[inline]
    pub fn new(value: u32) -> Self {
        Id(value)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}
