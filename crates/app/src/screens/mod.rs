//! Screen-level orchestration: forms and lists over an [`InventoryService`].
//!
//! Screens never hold a global emitter; each one is handed the bus (to publish)
//! or a subscription (to listen) it needs.
//!
//! [`InventoryService`]: crate::service::InventoryService

mod product_list;
mod stock_form;

pub use product_list::{ProductListScreen, ProductRow};
pub use stock_form::{FormError, StockMovementForm};

use chrono::Utc;

use tilestock_events::{CatalogEvent, EventBus};
use tilestock_products::NewProduct;
use tilestock_quantity::RawQuantity;

use crate::service::{InventoryService, ProductSnapshot, ServiceError};

/// Create a product and tell listening screens about it.
pub fn create_product<S, B>(
    service: &S,
    bus: &B,
    new: NewProduct,
    opening_stock: RawQuantity,
) -> Result<ProductSnapshot, ServiceError>
where
    S: InventoryService + ?Sized,
    B: EventBus<CatalogEvent> + ?Sized,
{
    let snapshot = service.create_product(new, opening_stock)?;
    notify(
        bus,
        CatalogEvent::ProductCreated {
            product_id: snapshot.id(),
            occurred_at: Utc::now(),
        },
    );
    Ok(snapshot)
}

/// Publishing is best-effort: a lost notification only delays a refresh.
pub(crate) fn notify<B>(bus: &B, event: CatalogEvent)
where
    B: EventBus<CatalogEvent> + ?Sized,
{
    if let Err(err) = bus.publish(event) {
        tracing::warn!(?err, "catalog notification dropped");
    }
}
