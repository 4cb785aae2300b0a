use std::sync::Arc;

use tilestock_app::{AppConfig, InMemoryInventoryService, ProductListScreen};
use tilestock_events::{CatalogEvent, EventBus, InMemoryEventBus};
use tilestock_products::SizeCatalog;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    tilestock_observability::init_with(&config.log_filter);
    tracing::info!(?config, "starting tilestock demo");

    let service = InMemoryInventoryService::new(SizeCatalog::standard(), config.low_stock_boxes);
    let bus: Arc<InMemoryEventBus<CatalogEvent>> = Arc::new(InMemoryEventBus::new());
    let mut list = ProductListScreen::new(bus.subscribe());

    tilestock_app::demo::seed(&service, &bus, config.default_unit)?;

    list.sync(&service)?;
    for row in list.rows() {
        tracing::info!(
            code = row.product.product.code(),
            available = %row.available,
            low_stock = row.low_stock,
            "product"
        );
    }
    for row in list.low_stock_alerts() {
        tracing::warn!(code = row.product.product.code(), available = %row.available, "low stock");
    }

    println!("{}", serde_json::to_string_pretty(list.rows())?);
    Ok(())
}
