//! `tilestock-quantity` — the dual-unit (boxes/pieces) quantity model.
//!
//! Tiles are counted in boxes and loose pieces. Every quantity shown or sent
//! anywhere in the application goes through this crate:
//!
//! - [`PiecesPerBox`]: validated, product-specific conversion factor
//! - [`RawQuantity`]: `{boxes, pieces}` as stored/sent, possibly un-normalized
//! - [`QuantityValue`]: normalized `{boxes, pieces, totalPieces}`
//! - [`convert`]: pure conversions between the representations
//! - [`entry`]: the single coercion rule for user-typed numbers
//! - [`preview`]: human-readable rendering
//!
//! Everything here is pure and synchronous.

pub mod convert;
pub mod entry;
pub mod per_box;
pub mod preview;
pub mod value;

pub use convert::{from_boxes_entry, from_pieces_entry, normalize, to_pieces};
pub use entry::{EntryError, parse_entry};
pub use per_box::PiecesPerBox;
pub use preview::format_preview;
pub use value::{QuantityValue, RawQuantity};
