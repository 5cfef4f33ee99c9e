//! Strongly typed arena identifiers.
//!
//! Residents, dwellings and neighbourhoods live in append-only `Vec` arenas
//! and are never removed, so an id is a stable index for the whole run.  The
//! inner integer is `pub` for direct indexing, but callers should prefer
//! `.index()`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as an arena index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a resident in the market arena.
    pub struct ResidentId(u32);
}

typed_id! {
    /// Index of a dwelling unit in the market arena.
    pub struct DwellingId(u32);
}

typed_id! {
    /// Index of a neighbourhood.  Neighbourhoods are created once at setup,
    /// so `u16` is plenty (a city has a few hundred at most).
    pub struct NeighbourhoodId(u16);
}
