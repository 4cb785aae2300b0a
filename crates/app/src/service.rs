use serde::{Deserialize, Serialize};
use thiserror::Error;

use tilestock_core::{DomainError, ProductId};
use tilestock_inventory::{Availability, MovementKind, MovementRequest, StockCounters};
use tilestock_products::{NewProduct, TileProduct};
use tilestock_quantity::{QuantityValue, RawQuantity};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("inventory service unavailable: {0}")]
    Unavailable(String),
}

/// Product as returned by the inventory service: catalog fields plus the four
/// stock counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    #[serde(flatten)]
    pub product: TileProduct,
    pub counters: StockCounters,
    pub version: u64,
}

impl ProductSnapshot {
    pub fn id(&self) -> ProductId {
        self.product.id_typed()
    }

    /// Recomputed from the counters on every call.
    pub fn availability(&self) -> Availability {
        self.counters.availability(self.product.pieces_per_box())
    }

    pub fn available(&self) -> QuantityValue {
        self.availability().available
    }

    pub fn is_low_stock(&self) -> bool {
        self.counters
            .is_low_stock(self.product.pieces_per_box(), self.product.low_stock_boxes())
    }

    pub fn returnable(&self) -> QuantityValue {
        let per_box = self.product.pieces_per_box();
        RawQuantity::pieces_only(self.counters.returnable_pieces(per_box)).normalized(per_box)
    }
}

/// Contract of the external product/inventory service.
///
/// Every mutating call returns the product as the service sees it afterwards.
pub trait InventoryService {
    fn list_products(&self) -> Result<Vec<ProductSnapshot>, ServiceError>;

    fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, ServiceError>;

    fn create_product(
        &self,
        new: NewProduct,
        opening_stock: RawQuantity,
    ) -> Result<ProductSnapshot, ServiceError>;

    fn record_movement(
        &self,
        id: ProductId,
        kind: MovementKind,
        request: MovementRequest,
    ) -> Result<ProductSnapshot, ServiceError>;
}
