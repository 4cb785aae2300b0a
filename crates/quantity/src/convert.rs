//! Pure conversions between piece counts and `(boxes, pieces)` pairs.

use tilestock_core::DomainResult;

use crate::entry::EntryError;
use crate::per_box::PiecesPerBox;
use crate::value::{QuantityValue, RawQuantity};

/// `boxes * pieces_per_box + pieces` (saturating at `u64::MAX`).
pub fn to_pieces(boxes: u64, pieces: u64, per_box: PiecesPerBox) -> u64 {
    RawQuantity::new(boxes, pieces).to_pieces(per_box)
}

/// Split a raw piece count into whole boxes and remaining pieces.
///
/// `pieces_per_box` is the unvalidated product setting; anything below 1 is
/// rejected with `InvalidConfiguration`.
pub fn normalize(total_pieces: u64, pieces_per_box: u32) -> DomainResult<QuantityValue> {
    let per_box = PiecesPerBox::new(pieces_per_box)?;
    Ok(QuantityValue::from_total(total_pieces, per_box))
}

/// A number typed in "boxes" mode: whole boxes, no loose pieces.
///
/// A box count whose piece total does not fit in `u64` is `Unparseable`.
pub fn from_boxes_entry(boxes_entered: u64, per_box: PiecesPerBox) -> Result<QuantityValue, EntryError> {
    let total = boxes_entered
        .checked_mul(per_box.as_u64())
        .ok_or(EntryError::Unparseable)?;
    Ok(QuantityValue::from_total(total, per_box))
}

/// A number typed in "pieces" mode: a raw piece count, normalized into boxes + pieces.
pub fn from_pieces_entry(pieces_entered: u64, per_box: PiecesPerBox) -> QuantityValue {
    QuantityValue::from_total(pieces_entered, per_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilestock_core::DomainError;

    fn per_box(n: u32) -> PiecesPerBox {
        PiecesPerBox::new(n).unwrap()
    }

    #[test]
    fn normalize_exact_multiple() {
        let value = normalize(12, 6).unwrap();
        assert_eq!((value.boxes(), value.pieces()), (2, 0));
    }

    #[test]
    fn normalize_with_remainder() {
        let value = normalize(15, 6).unwrap();
        assert_eq!((value.boxes(), value.pieces()), (2, 3));
        assert_eq!(value.total_pieces(), 15);
    }

    #[test]
    fn normalize_zero() {
        assert_eq!(normalize(0, 6).unwrap(), QuantityValue::ZERO);
    }

    #[test]
    fn normalize_rejects_zero_pieces_per_box() {
        let err = normalize(10, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfiguration(_)));
    }

    #[test]
    fn boxes_entry_has_no_loose_pieces() {
        let value = from_boxes_entry(3, per_box(4)).unwrap();
        assert_eq!((value.boxes(), value.pieces(), value.total_pieces()), (3, 0, 12));
    }

    #[test]
    fn boxes_entry_overflowing_piece_total_is_rejected() {
        assert_eq!(from_boxes_entry(1 << 63, per_box(2)), Err(EntryError::Unparseable));

        let largest = from_boxes_entry(u64::MAX / 2, per_box(2)).unwrap();
        assert_eq!((largest.boxes(), largest.pieces()), (u64::MAX / 2, 0));
    }

    #[test]
    fn pieces_entry_is_normalized() {
        let value = from_pieces_entry(13, per_box(6));
        assert_eq!((value.boxes(), value.pieces(), value.total_pieces()), (2, 1, 13));
    }

    #[test]
    fn single_piece_boxes_never_have_remainder() {
        let value = from_pieces_entry(7, PiecesPerBox::ONE);
        assert_eq!((value.boxes(), value.pieces()), (7, 0));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: normalizing then converting back yields the original count.
            #[test]
            fn normalize_round_trips(total in 0u64..10_000_000, p in 1u32..=64) {
                let value = normalize(total, p).unwrap();
                prop_assert_eq!(to_pieces(value.boxes(), value.pieces(), per_box(p)), total);
            }

            /// Property: normalization is idempotent.
            #[test]
            fn normalize_is_idempotent(total in 0u64..10_000_000, p in 1u32..=64) {
                let once = normalize(total, p).unwrap();
                let twice = normalize(once.total_pieces(), p).unwrap();
                prop_assert_eq!(once, twice);
            }

            /// Property: loose pieces always stay below one full box.
            #[test]
            fn remainder_is_below_one_box(total in 0u64..10_000_000, p in 1u32..=64) {
                let value = normalize(total, p).unwrap();
                prop_assert!(value.pieces() < u64::from(p));
            }

            /// Property: an accepted boxes entry keeps every box and no loose pieces.
            #[test]
            fn boxes_entry_is_exact_or_rejected(boxes in any::<u64>(), p in 1u32..=64) {
                match from_boxes_entry(boxes, per_box(p)) {
                    Ok(value) => {
                        prop_assert_eq!(value.boxes(), boxes);
                        prop_assert_eq!(value.pieces(), 0);
                    }
                    Err(err) => {
                        prop_assert_eq!(err, EntryError::Unparseable);
                        prop_assert!(boxes.checked_mul(u64::from(p)).is_none());
                    }
                }
            }

            /// Property: an un-normalized pair normalizes to the same value as its total.
            #[test]
            fn raw_pairs_normalize_by_total(boxes in 0u64..100_000, pieces in 0u64..1_000, p in 1u32..=12) {
                let raw = RawQuantity::new(boxes, pieces).normalized(per_box(p));
                let direct = normalize(to_pieces(boxes, pieces, per_box(p)), p).unwrap();
                prop_assert_eq!(raw, direct);
            }
        }
    }
}
