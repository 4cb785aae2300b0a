//! Domain events and the in-process publish/subscribe bus.
//!
//! Screens that show products do not reach for a global emitter. They are handed
//! an [`EventBus`] and a [`Subscription`] and refresh when a [`CatalogEvent`]
//! arrives.

pub mod bus;
pub mod catalog;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use catalog::CatalogEvent;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
