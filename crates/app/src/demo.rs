//! Sample catalog used by the `tilestock` binary.

use tilestock_events::{CatalogEvent, EventBus};
use tilestock_input::UnitMode;
use tilestock_inventory::MovementKind;
use tilestock_products::NewProduct;
use tilestock_quantity::RawQuantity;

use crate::screens::{FormError, StockMovementForm, create_product};
use crate::service::{InventoryService, ProductSnapshot};

/// Create two products, add ten boxes of floor tiles and sell thirteen pieces.
///
/// Forms open in `default_unit` like they would for a user, but every quantity
/// is typed in an explicitly selected unit so the result does not depend on it.
pub fn seed<S, B>(service: &S, bus: &B, default_unit: UnitMode) -> Result<ProductSnapshot, FormError>
where
    S: InventoryService + ?Sized,
    B: EventBus<CatalogEvent> + ?Sized,
{
    let floor = create_product(
        service,
        bus,
        NewProduct {
            code: "FL-6060-GR".to_string(),
            name: "Granite Grey".to_string(),
            size: "60x60".to_string(),
            ..NewProduct::default()
        },
        RawQuantity::ZERO,
    )?;
    create_product(
        service,
        bus,
        NewProduct {
            code: "WL-3060-WH".to_string(),
            name: "Wall White".to_string(),
            size: "30x60".to_string(),
            pieces_per_box: Some(5),
            low_stock_boxes: Some(2),
        },
        RawQuantity::new(1, 3),
    )?;

    let mut add = StockMovementForm::new(floor, MovementKind::AddStock, default_unit);
    add.select_unit(UnitMode::Boxes);
    add.type_quantity("10");
    let floor = add.submit(service, bus)?;

    let mut sale = StockMovementForm::new(floor, MovementKind::Sale, default_unit);
    sale.select_unit(UnitMode::Pieces);
    sale.type_quantity("13");
    tracing::info!(preview = ?sale.view().preview, "sale entered");
    sale.submit(service, bus)
}
