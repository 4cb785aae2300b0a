//! In-process inventory service for tests, demos and offline use.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use tilestock_core::{Aggregate, AggregateRoot, DomainError, ProductId};
use tilestock_inventory::{
    MovementKind, MovementRequest, RecordMovement, RegisterItem, StockCommand, StockEvent, StockItem,
};
use tilestock_products::{NewProduct, SizeCatalog, TileProduct};
use tilestock_quantity::RawQuantity;

use crate::config::DEFAULT_LOW_STOCK_BOXES;
use crate::service::{InventoryService, ProductSnapshot, ServiceError};

#[derive(Debug)]
struct Record {
    product: TileProduct,
    item: StockItem,
    history: Vec<StockEvent>,
}

impl Record {
    fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            product: self.product.clone(),
            counters: *self.item.counters(),
            version: self.item.version(),
        }
    }

    fn execute(&mut self, command: &StockCommand) -> Result<(), DomainError> {
        let events = self.item.handle(command)?;
        for event in &events {
            self.item.apply(event);
        }
        self.history.extend(events);
        Ok(())
    }
}

/// Products and their [`StockItem`] aggregates behind one lock.
#[derive(Debug)]
pub struct InMemoryInventoryService {
    catalog: SizeCatalog,
    default_low_stock_boxes: u64,
    records: Mutex<HashMap<ProductId, Record>>,
}

impl Default for InMemoryInventoryService {
    fn default() -> Self {
        Self::new(SizeCatalog::standard(), DEFAULT_LOW_STOCK_BOXES)
    }
}

impl InMemoryInventoryService {
    pub fn new(catalog: SizeCatalog, default_low_stock_boxes: u64) -> Self {
        Self {
            catalog,
            default_low_stock_boxes,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &SizeCatalog {
        &self.catalog
    }

    /// Events applied to one product's stock, oldest first.
    pub fn history(&self, id: ProductId) -> Result<Vec<StockEvent>, ServiceError> {
        let records = self.lock()?;
        let record = records.get(&id).ok_or(ServiceError::ProductNotFound(id))?;
        Ok(record.history.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ProductId, Record>>, ServiceError> {
        self.records
            .lock()
            .map_err(|_| ServiceError::Unavailable("inventory state lock poisoned".to_string()))
    }
}

impl InventoryService for InMemoryInventoryService {
    fn list_products(&self) -> Result<Vec<ProductSnapshot>, ServiceError> {
        let records = self.lock()?;
        let mut products: Vec<ProductSnapshot> = records.values().map(Record::snapshot).collect();
        products.sort_by(|a, b| a.product.code().cmp(b.product.code()));
        Ok(products)
    }

    fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, ServiceError> {
        let records = self.lock()?;
        records
            .get(&id)
            .map(Record::snapshot)
            .ok_or(ServiceError::ProductNotFound(id))
    }

    fn create_product(
        &self,
        new: NewProduct,
        opening_stock: RawQuantity,
    ) -> Result<ProductSnapshot, ServiceError> {
        let now = Utc::now();
        let id = ProductId::new();
        let product = TileProduct::create(id, new, &self.catalog, self.default_low_stock_boxes, now)?;

        let mut records = self.lock()?;
        if records
            .values()
            .any(|r| r.product.code().eq_ignore_ascii_case(product.code()))
        {
            return Err(DomainError::conflict(format!("product code {} already exists", product.code())).into());
        }

        let mut record = Record {
            item: StockItem::empty(id),
            product,
            history: Vec::new(),
        };
        record.execute(&StockCommand::RegisterItem(RegisterItem {
            product_id: id,
            pieces_per_box: record.product.pieces_per_box(),
            opening_stock,
            occurred_at: now,
        }))?;

        tracing::info!(
            product_id = %id,
            code = record.product.code(),
            pieces_per_box = record.product.pieces_per_box().get(),
            "product created"
        );

        let snapshot = record.snapshot();
        records.insert(id, record);
        Ok(snapshot)
    }

    fn record_movement(
        &self,
        id: ProductId,
        kind: MovementKind,
        request: MovementRequest,
    ) -> Result<ProductSnapshot, ServiceError> {
        let mut records = self.lock()?;
        let record = records.get_mut(&id).ok_or(ServiceError::ProductNotFound(id))?;

        let quantity = request.quantity;
        record
            .execute(&StockCommand::RecordMovement(RecordMovement {
                product_id: id,
                kind,
                request,
                occurred_at: Utc::now(),
            }))
            .inspect_err(|err| {
                tracing::warn!(product_id = %id, movement = %kind, %err, "movement rejected");
            })?;

        let snapshot = record.snapshot();
        tracing::info!(
            product_id = %id,
            movement = %kind,
            boxes = quantity.boxes,
            pieces = quantity.pieces,
            available = %snapshot.available(),
            "movement recorded"
        );
        Ok(snapshot)
    }
}
