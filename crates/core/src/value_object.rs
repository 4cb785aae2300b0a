//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Quantities are the
/// main example here: `2 bx + 1 pc` of a 6-per-box tile equals any other
/// `2 bx + 1 pc` of the same tile, and "changing" one means computing a new one.
///
/// The trait requires:
/// - **Clone**: values are cheap to copy
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: needed for logging and test assertions
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
