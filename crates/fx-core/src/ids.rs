use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable handle into one of the engine's arenas.
///
/// Backed by `NonZeroU32` so `Option<Id>` is pointer-optimized and the
/// arenas stay cache-friendly even for dense graphs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based arena index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Recover the 0-based arena index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The index widened to `usize` for direct slice access.
    pub fn idx(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type VertexId = Id;
pub type EdgeId = Id;
pub type StateId = Id;
pub type JunctionId = Id;
pub type ComponentId = Id;
