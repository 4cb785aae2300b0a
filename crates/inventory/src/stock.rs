use serde::{Deserialize, Serialize};

use tilestock_quantity::{PiecesPerBox, QuantityValue, RawQuantity};

use crate::movement::MovementKind;

/// Per-product counters as the inventory service stores them.
///
/// Each counter accumulates independently and may be un-normalized. Available
/// stock is never stored; it is recomputed from these four on every read.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCounters {
    #[serde(default)]
    pub stock: RawQuantity,
    #[serde(default)]
    pub sales: RawQuantity,
    #[serde(default)]
    pub damage: RawQuantity,
    #[serde(default)]
    pub returns: RawQuantity,
}

/// Available stock plus how much had to be clamped away to keep it non-negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: QuantityValue,
    /// Pieces by which sales + damage exceed stock + returns. Non-zero means the
    /// counters are inconsistent.
    pub shortfall_pieces: u64,
}

impl Availability {
    pub fn is_consistent(&self) -> bool {
        self.shortfall_pieces == 0
    }
}

impl StockCounters {
    pub fn new(stock: RawQuantity, sales: RawQuantity, damage: RawQuantity, returns: RawQuantity) -> Self {
        Self {
            stock,
            sales,
            damage,
            returns,
        }
    }

    /// `stock - sales - damage + returns`, in pieces, floored at zero and normalized.
    ///
    /// A negative balance is reported through `shortfall_pieces` and a warning,
    /// never as a negative quantity.
    pub fn availability(&self, per_box: PiecesPerBox) -> Availability {
        let inflow = self
            .stock
            .to_pieces(per_box)
            .saturating_add(self.returns.to_pieces(per_box));
        let outflow = self
            .sales
            .to_pieces(per_box)
            .saturating_add(self.damage.to_pieces(per_box));

        let shortfall_pieces = outflow.saturating_sub(inflow);
        if shortfall_pieces > 0 {
            tracing::warn!(
                shortfall_pieces,
                inflow,
                outflow,
                "available stock clamped at zero; counters are inconsistent"
            );
        }

        Availability {
            available: QuantityValue::from_total(inflow.saturating_sub(outflow), per_box),
            shortfall_pieces,
        }
    }

    pub fn available(&self, per_box: PiecesPerBox) -> QuantityValue {
        self.availability(per_box).available
    }

    /// Below `threshold_boxes` whole boxes of available stock.
    pub fn is_low_stock(&self, per_box: PiecesPerBox, threshold_boxes: u64) -> bool {
        let threshold = RawQuantity::new(threshold_boxes, 0).to_pieces(per_box);
        self.available(per_box).total_pieces() < threshold
    }

    /// Pieces sold and not yet returned.
    pub fn returnable_pieces(&self, per_box: PiecesPerBox) -> u64 {
        self.sales
            .to_pieces(per_box)
            .saturating_sub(self.returns.to_pieces(per_box))
    }

    pub fn counter(&self, kind: MovementKind) -> RawQuantity {
        match kind {
            MovementKind::AddStock => self.stock,
            MovementKind::Sale => self.sales,
            MovementKind::Damage => self.damage,
            MovementKind::Return => self.returns,
        }
    }

    /// Accumulate a movement into its counter (no validation, no normalization).
    pub fn record(&mut self, kind: MovementKind, quantity: RawQuantity) {
        let counter = match kind {
            MovementKind::AddStock => &mut self.stock,
            MovementKind::Sale => &mut self.sales,
            MovementKind::Damage => &mut self.damage,
            MovementKind::Return => &mut self.returns,
        };
        *counter = counter.saturating_add(quantity);
    }
}
