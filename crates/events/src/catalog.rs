use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tilestock_core::ProductId;

use crate::event::Event;

/// Notification that the product list a screen shows is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEvent {
    ProductCreated {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    StockChanged {
        product_id: ProductId,
        /// Movement that caused the change (e.g. "sale").
        movement: String,
        occurred_at: DateTime<Utc>,
    },
}

impl CatalogEvent {
    pub fn product_id(&self) -> ProductId {
        match self {
            CatalogEvent::ProductCreated { product_id, .. }
            | CatalogEvent::StockChanged { product_id, .. } => *product_id,
        }
    }
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductCreated { .. } => "catalog.product.created",
            CatalogEvent::StockChanged { .. } => "catalog.product.stock_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ProductCreated { occurred_at, .. }
            | CatalogEvent::StockChanged { occurred_at, .. } => *occurred_at,
        }
    }
}
