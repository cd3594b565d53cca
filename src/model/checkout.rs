//! Install directory states.

/// What an install path holds before synchronization.
///
/// Only `Absent`, `Empty`, and `OwnedVcs` are safe to proceed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing exists at the path.
    Absent,

    /// An empty directory.
    Empty,

    /// Content that is not a git checkout, or not a directory at all.
    ForeignNonVcs,

    /// A git checkout of some other origin.
    ForeignVcs { origin: String },

    /// A git checkout of the requested origin.
    OwnedVcs,
}

impl CheckoutState {
    /// Whether synchronization may touch this path.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Absent | Self::Empty | Self::OwnedVcs)
    }
}
