//! Inventory domain module.
//!
//! - [`stock`]: the four per-product counters and the derived available stock
//! - [`movement`]: request payloads for add-stock, sale, damage and return
//! - [`item`]: event-sourced aggregate that validates movements before they
//!   touch the counters
//!
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod movement;
pub mod stock;

pub use item::{
    ItemRegistered, MovementRecorded, RecordMovement, RegisterItem, StockCommand, StockEvent,
    StockItem,
};
pub use movement::{MovementKind, MovementRequest};
pub use stock::{Availability, StockCounters};
