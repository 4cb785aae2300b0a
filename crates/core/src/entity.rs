//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A tile product stays the same product while its name or thresholds change;
/// only the identifier decides equality of identity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
