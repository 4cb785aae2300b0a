//! Human-readable conversion preview shown under a quantity field.

use crate::per_box::PiecesPerBox;
use crate::value::{QuantityValue, RawQuantity};

/// Render `(boxes, pieces)` for a product with `per_box` pieces per box.
///
/// The pair is normalized first. When boxes are involved the total piece count is
/// appended; a pure piece count needs no total.
///
/// ```
/// use tilestock_quantity::{PiecesPerBox, format_preview};
///
/// let per_box = PiecesPerBox::new(6).unwrap();
/// assert_eq!(format_preview(2, 1, per_box), "2 bx, 1 pc (total 13 pieces)");
/// assert_eq!(format_preview(0, 5, per_box), "5 pc");
/// ```
pub fn format_preview(boxes: u64, pieces: u64, per_box: PiecesPerBox) -> String {
    let value = RawQuantity::new(boxes, pieces).normalized(per_box);
    describe(&value)
}

pub(crate) fn describe(value: &QuantityValue) -> String {
    if value.boxes() == 0 {
        return value.to_string();
    }
    let unit = if value.total_pieces() == 1 { "piece" } else { "pieces" };
    format!("{value} (total {} {unit})", value.total_pieces())
}

impl QuantityValue {
    /// Long form used for previews, see [`format_preview`].
    pub fn preview(&self) -> String {
        describe(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_box(n: u32) -> PiecesPerBox {
        PiecesPerBox::new(n).unwrap()
    }

    #[test]
    fn both_units_mention_boxes_and_total() {
        assert_eq!(format_preview(2, 3, per_box(10)), "2 bx, 3 pc (total 23 pieces)");
    }

    #[test]
    fn whole_boxes_collapse_to_box_phrase() {
        assert_eq!(format_preview(3, 0, per_box(4)), "3 bx (total 12 pieces)");
    }

    #[test]
    fn loose_pieces_only() {
        assert_eq!(format_preview(0, 1, per_box(4)), "1 pc");
    }

    #[test]
    fn overflowing_pieces_are_normalized_first() {
        assert_eq!(format_preview(0, 13, per_box(6)), "2 bx, 1 pc (total 13 pieces)");
    }

    #[test]
    fn singular_total() {
        assert_eq!(format_preview(1, 0, PiecesPerBox::ONE), "1 bx (total 1 piece)");
    }
}
