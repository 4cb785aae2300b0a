use serde::{Deserialize, Serialize};

use tilestock_core::ValueObject;

use crate::per_box::PiecesPerBox;

/// A `{boxes, pieces}` pair exactly as stored by the inventory service or sent in
/// request bodies.
///
/// Not necessarily normalized: `pieces` may be `>= pieces_per_box` (e.g. a counter
/// that accumulated loose pieces over several movements).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawQuantity {
    #[serde(default)]
    pub boxes: u64,
    #[serde(default)]
    pub pieces: u64,
}

impl RawQuantity {
    pub const ZERO: RawQuantity = RawQuantity { boxes: 0, pieces: 0 };

    pub fn new(boxes: u64, pieces: u64) -> Self {
        Self { boxes, pieces }
    }

    pub fn pieces_only(pieces: u64) -> Self {
        Self { boxes: 0, pieces }
    }

    pub fn is_zero(&self) -> bool {
        self.boxes == 0 && self.pieces == 0
    }

    /// Total piece count (saturating).
    pub fn to_pieces(self, per_box: PiecesPerBox) -> u64 {
        self.boxes
            .saturating_mul(per_box.as_u64())
            .saturating_add(self.pieces)
    }

    pub fn normalized(self, per_box: PiecesPerBox) -> QuantityValue {
        QuantityValue::from_total(self.to_pieces(per_box), per_box)
    }

    /// Component-wise sum, without normalizing (counters accumulate this way).
    pub fn saturating_add(self, other: RawQuantity) -> RawQuantity {
        RawQuantity {
            boxes: self.boxes.saturating_add(other.boxes),
            pieces: self.pieces.saturating_add(other.pieces),
        }
    }
}

impl ValueObject for RawQuantity {}

/// A normalized dual-unit quantity: `0 <= pieces < pieces_per_box` and
/// `total_pieces == boxes * pieces_per_box + pieces`.
///
/// Constructed only through normalization, so every instance upholds the invariant
/// for the pieces-per-box it was built with.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityValue {
    boxes: u64,
    pieces: u64,
    total_pieces: u64,
}

impl QuantityValue {
    pub const ZERO: QuantityValue = QuantityValue {
        boxes: 0,
        pieces: 0,
        total_pieces: 0,
    };

    pub fn from_total(total_pieces: u64, per_box: PiecesPerBox) -> Self {
        let per_box = per_box.as_u64();
        Self {
            boxes: total_pieces / per_box,
            pieces: total_pieces % per_box,
            total_pieces,
        }
    }

    pub fn boxes(&self) -> u64 {
        self.boxes
    }

    pub fn pieces(&self) -> u64 {
        self.pieces
    }

    pub fn total_pieces(&self) -> u64 {
        self.total_pieces
    }

    pub fn is_zero(&self) -> bool {
        self.total_pieces == 0
    }

    pub fn to_raw(&self) -> RawQuantity {
        RawQuantity::new(self.boxes, self.pieces)
    }
}

impl ValueObject for QuantityValue {}

/// Short form: `2 bx, 1 pc`, `3 bx`, `5 pc`.
impl core::fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.boxes, self.pieces) {
            (0, p) => write!(f, "{p} pc"),
            (b, 0) => write!(f, "{b} bx"),
            (b, p) => write!(f, "{b} bx, {p} pc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_box(n: u32) -> PiecesPerBox {
        PiecesPerBox::new(n).unwrap()
    }

    #[test]
    fn raw_quantity_collapses_overflowing_pieces() {
        let raw = RawQuantity::new(1, 9);
        let value = raw.normalized(per_box(4));
        assert_eq!((value.boxes(), value.pieces(), value.total_pieces()), (3, 1, 13));
    }

    #[test]
    fn raw_quantity_saturates_instead_of_wrapping() {
        let raw = RawQuantity::new(u64::MAX, 5);
        assert_eq!(raw.to_pieces(per_box(2)), u64::MAX);
    }

    #[test]
    fn raw_quantity_defaults_missing_fields() {
        let raw: RawQuantity = serde_json::from_str(r#"{"boxes": 3}"#).unwrap();
        assert_eq!(raw, RawQuantity::new(3, 0));
    }

    #[test]
    fn quantity_value_serializes_camel_case() {
        let value = QuantityValue::from_total(13, per_box(6));
        let json = serde_json::to_value(value).unwrap();
        assert_eq!(json, serde_json::json!({"boxes": 2, "pieces": 1, "totalPieces": 13}));
    }

    #[test]
    fn display_collapses_empty_side() {
        assert_eq!(QuantityValue::from_total(13, per_box(6)).to_string(), "2 bx, 1 pc");
        assert_eq!(QuantityValue::from_total(12, per_box(6)).to_string(), "2 bx");
        assert_eq!(QuantityValue::from_total(5, per_box(6)).to_string(), "5 pc");
        assert_eq!(QuantityValue::ZERO.to_string(), "0 pc");
    }
}
