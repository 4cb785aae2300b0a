//! Tile product catalog.
//!
//! A product's pieces-per-box is decided once, at creation, from its tile size.

pub mod product;
pub mod size;

pub use product::{NewProduct, TileProduct};
pub use size::{PerBoxRule, SizeCatalog};
