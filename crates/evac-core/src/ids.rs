//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can key a `BTreeMap` (bottlenecks
//! are drained in ascending `CellId` order) without ceremony.  The inner
//! integer is `pub` so tests can write `AgentId(3)`, but indexing code should
//! go through `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around `u32` with a short display prefix.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(u32::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Build an ID from a `Vec` position.
            ///
            /// # Panics
            /// Panics in debug mode if `i` does not fit in a `u32`.
            #[inline]
            pub fn from_index(i: usize) -> Self {
                debug_assert!(i < u32::MAX as usize, concat!(stringify!($name), " overflow"));
                $name(i as u32)
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of an agent in the driver's agent list.
    pub struct AgentId, "agent";
}

typed_id! {
    /// Row-major index of a floor cell (`row * cols + col`).  Ascending
    /// `CellId` order is lexicographic `(row, col)` order.
    pub struct CellId, "cell";
}
