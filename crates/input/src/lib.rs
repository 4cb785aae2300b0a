//! `tilestock-input` — headless dual-unit quantity input.
//!
//! The widget layer renders an [`InputView`] and forwards user actions
//! (unit selection, text edits) to a [`DualUnitInput`]. The input does no I/O; it
//! only converts and notifies its owner through callbacks.

pub mod dual_unit;

pub use dual_unit::{DualUnitInput, EntryState, InputProps, InputView, QuantityEntry, UnitMode};
