use serde::Serialize;

use tilestock_events::{CatalogEvent, Subscription};
use tilestock_quantity::QuantityValue;

use crate::service::{InventoryService, ProductSnapshot, ServiceError};

/// One line of the product list, with available stock already derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub product: ProductSnapshot,
    pub available: QuantityValue,
    pub low_stock: bool,
    /// False when the counters had to be clamped to show a non-negative stock.
    pub consistent: bool,
}

impl ProductRow {
    fn from_snapshot(product: ProductSnapshot) -> Self {
        let availability = product.availability();
        Self {
            low_stock: product.is_low_stock(),
            available: availability.available,
            consistent: availability.is_consistent(),
            product,
        }
    }

    fn matches(&self, query: &str) -> bool {
        let p = &self.product.product;
        [p.code(), p.name(), p.size()]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }
}

/// Product list that refreshes itself when catalog events arrive.
#[derive(Debug)]
pub struct ProductListScreen {
    rows: Vec<ProductRow>,
    subscription: Subscription<CatalogEvent>,
}

impl ProductListScreen {
    pub fn new(subscription: Subscription<CatalogEvent>) -> Self {
        Self {
            rows: Vec::new(),
            subscription,
        }
    }

    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    /// Re-fetch every product from the service.
    pub fn refresh<S>(&mut self, service: &S) -> Result<(), ServiceError>
    where
        S: InventoryService + ?Sized,
    {
        self.rows = service
            .list_products()?
            .into_iter()
            .map(ProductRow::from_snapshot)
            .collect();
        tracing::debug!(rows = self.rows.len(), "product list refreshed");
        Ok(())
    }

    /// Drain pending catalog events; refresh once if there were any.
    ///
    /// Returns whether a refresh happened.
    pub fn sync<S>(&mut self, service: &S) -> Result<bool, ServiceError>
    where
        S: InventoryService + ?Sized,
    {
        let pending = self.subscription.drain();
        if pending.is_empty() {
            return Ok(false);
        }
        tracing::debug!(events = pending.len(), "catalog changed");
        self.refresh(service)?;
        Ok(true)
    }

    pub fn low_stock_alerts(&self) -> Vec<&ProductRow> {
        self.rows.iter().filter(|row| row.low_stock).collect()
    }

    /// Case-insensitive match on code, name or size.
    pub fn search(&self, query: &str) -> Vec<&ProductRow> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows.iter().filter(|row| row.matches(&query)).collect()
    }
}
