//! `tilestock-app`
//!
//! **Responsibility:** the client side of the stock screens.
//!
//! - [`config`]: environment-driven settings
//! - [`service`]: contract of the external inventory service and its response shapes
//! - [`in_memory`]: in-process implementation of that contract
//! - [`screens`]: stock movement form and product list, wired to the catalog event bus
//! - [`demo`]: sample catalog for the demo binary
//!
//! The service stays the authority on stock; screens only compute previews,
//! assemble requests and refresh.

pub mod config;
pub mod demo;
pub mod in_memory;
pub mod screens;
pub mod service;

pub use config::AppConfig;
pub use in_memory::InMemoryInventoryService;
pub use screens::{FormError, ProductListScreen, ProductRow, StockMovementForm, create_product};
pub use service::{InventoryService, ProductSnapshot, ServiceError};
