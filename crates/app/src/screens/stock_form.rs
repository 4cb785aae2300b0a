use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;
use thiserror::Error;

use tilestock_events::{CatalogEvent, EventBus};
use tilestock_input::{DualUnitInput, InputProps, InputView, QuantityEntry, UnitMode};
use tilestock_inventory::{MovementKind, MovementRequest};
use tilestock_quantity::QuantityValue;

use crate::screens::notify;
use crate::service::{InventoryService, ProductSnapshot, ServiceError};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("enter a quantity")]
    QuantityRequired,

    #[error("{kind} of {requested} exceeds available {available}")]
    ExceedsAvailable {
        kind: MovementKind,
        requested: QuantityValue,
        available: QuantityValue,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Add-stock / sale / damage / return form for one product.
///
/// Owns a [`DualUnitInput`] and keeps the last quantity it reported.
#[derive(Debug)]
pub struct StockMovementForm {
    product: ProductSnapshot,
    kind: MovementKind,
    input: DualUnitInput,
    entry: Rc<Cell<Option<QuantityEntry>>>,
    unit: Rc<Cell<UnitMode>>,
    note: String,
}

impl StockMovementForm {
    pub fn new(product: ProductSnapshot, kind: MovementKind, mode: UnitMode) -> Self {
        let entry = Rc::new(Cell::new(None));
        let unit = Rc::new(Cell::new(mode));
        let input = build_input(&product, kind, mode, &entry, &unit);
        Self {
            product,
            kind,
            input,
            entry,
            unit,
            note: String::new(),
        }
    }

    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    /// Quantity last reported by the input (`None` until something valid is typed).
    pub fn entry(&self) -> Option<QuantityEntry> {
        self.entry.get()
    }

    /// Unit last selected by the user; kept across submits.
    pub fn unit(&self) -> UnitMode {
        self.unit.get()
    }

    pub fn view(&self) -> InputView {
        self.input.view()
    }

    pub fn select_unit(&mut self, mode: UnitMode) {
        self.input.select_mode(mode);
    }

    pub fn type_quantity(&mut self, raw: &str) {
        self.input.edit(raw);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Validate locally, send the movement, notify listeners and reset the field.
    pub fn submit<S, B>(&mut self, service: &S, bus: &B) -> Result<ProductSnapshot, FormError>
    where
        S: InventoryService + ?Sized,
        B: EventBus<CatalogEvent> + ?Sized,
    {
        let entry = self.entry.get().ok_or(FormError::QuantityRequired)?;

        if self.kind.is_outflow() {
            let available = self.product.available();
            if entry.total_pieces() > available.total_pieces() {
                return Err(FormError::ExceedsAvailable {
                    kind: self.kind,
                    requested: entry.value(),
                    available,
                });
            }
        }

        let request = MovementRequest::new(entry.to_raw()).with_note(self.note.clone());
        let snapshot = service.record_movement(self.product.id(), self.kind, request)?;

        notify(
            bus,
            CatalogEvent::StockChanged {
                product_id: snapshot.id(),
                movement: self.kind.as_str().to_string(),
                occurred_at: Utc::now(),
            },
        );
        tracing::debug!(product_id = %snapshot.id(), movement = %self.kind, quantity = %entry.value(), "form submitted");

        // Caps depend on the new counters, so the input is rebuilt.
        self.product = snapshot.clone();
        self.entry.set(None);
        self.note.clear();
        self.input = build_input(&self.product, self.kind, self.unit.get(), &self.entry, &self.unit);

        Ok(snapshot)
    }
}

fn build_input(
    product: &ProductSnapshot,
    kind: MovementKind,
    mode: UnitMode,
    entry: &Rc<Cell<Option<QuantityEntry>>>,
    unit: &Rc<Cell<UnitMode>>,
) -> DualUnitInput {
    let limit = match kind {
        MovementKind::Sale | MovementKind::Damage => Some(product.available()),
        MovementKind::Return => Some(product.returnable()),
        MovementKind::AddStock => None,
    };
    let props = InputProps::new(product.product.pieces_per_box())
        .with_mode(mode)
        .with_caps(limit.map(|q| q.boxes()), limit.map(|q| q.total_pieces()));

    let entry = Rc::clone(entry);
    let unit = Rc::clone(unit);
    DualUnitInput::new(props)
        .on_change(move |value| entry.set(value))
        .on_type_change(move |mode| unit.set(mode))
}
