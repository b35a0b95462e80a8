//! Strongly-typed generation counter.

use std::fmt;

/// Monotonically increasing generation number.
///
/// Generation 0 is the freshly seeded grid; each completed tick advances
/// the counter by one. Carried as `u32` because that is the width of the
/// field in the published snapshot record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u32);

impl Generation {
    /// The seeded, not-yet-stepped grid.
    pub const ZERO: Generation = Generation(0);

    /// The generation following this one.
    ///
    /// Saturates at `u32::MAX` so the counter never goes backwards; at one
    /// tick every two seconds that is roughly 270 years away.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Generation {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
