use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tilestock_core::{Aggregate, AggregateRoot, DomainError, ProductId};
use tilestock_events::Event;
use tilestock_quantity::{PiecesPerBox, RawQuantity};

use crate::movement::{MovementKind, MovementRequest};
use crate::stock::StockCounters;

/// Aggregate root: the stock of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockItem {
    id: ProductId,
    pieces_per_box: PiecesPerBox,
    counters: StockCounters,
    version: u64,
    registered: bool,
}

impl StockItem {
    /// Create an empty, not-yet-registered aggregate instance for rehydration.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            pieces_per_box: PiecesPerBox::ONE,
            counters: StockCounters::default(),
            version: 0,
            registered: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn pieces_per_box(&self) -> PiecesPerBox {
        self.pieces_per_box
    }

    pub fn counters(&self) -> &StockCounters {
        &self.counters
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

impl AggregateRoot for StockItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterItem {
    pub product_id: ProductId,
    pub pieces_per_box: PiecesPerBox,
    #[serde(default)]
    pub opening_stock: RawQuantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordMovement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMovement {
    pub product_id: ProductId,
    pub kind: MovementKind,
    pub request: MovementRequest,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockCommand {
    RegisterItem(RegisterItem),
    RecordMovement(RecordMovement),
}

/// Event: ItemRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRegistered {
    pub product_id: ProductId,
    pub pieces_per_box: PiecesPerBox,
    pub opening_stock: RawQuantity,
    pub occurred_at: DateTime<Utc>,
}

/// Payload shared by the four movement events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecorded {
    pub product_id: ProductId,
    pub quantity: RawQuantity,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockEvent {
    ItemRegistered(ItemRegistered),
    StockAdded(MovementRecorded),
    SaleRecorded(MovementRecorded),
    DamageRecorded(MovementRecorded),
    ReturnRecorded(MovementRecorded),
}

impl StockEvent {
    fn movement(kind: MovementKind, recorded: MovementRecorded) -> Self {
        match kind {
            MovementKind::AddStock => StockEvent::StockAdded(recorded),
            MovementKind::Sale => StockEvent::SaleRecorded(recorded),
            MovementKind::Damage => StockEvent::DamageRecorded(recorded),
            MovementKind::Return => StockEvent::ReturnRecorded(recorded),
        }
    }

    /// Movement kind and payload, for everything except registration.
    pub fn as_movement(&self) -> Option<(MovementKind, &MovementRecorded)> {
        match self {
            StockEvent::ItemRegistered(_) => None,
            StockEvent::StockAdded(e) => Some((MovementKind::AddStock, e)),
            StockEvent::SaleRecorded(e) => Some((MovementKind::Sale, e)),
            StockEvent::DamageRecorded(e) => Some((MovementKind::Damage, e)),
            StockEvent::ReturnRecorded(e) => Some((MovementKind::Return, e)),
        }
    }
}

impl Event for StockEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StockEvent::ItemRegistered(_) => "inventory.item.registered",
            StockEvent::StockAdded(_) => "inventory.item.stock_added",
            StockEvent::SaleRecorded(_) => "inventory.item.sale_recorded",
            StockEvent::DamageRecorded(_) => "inventory.item.damage_recorded",
            StockEvent::ReturnRecorded(_) => "inventory.item.return_recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockEvent::ItemRegistered(e) => e.occurred_at,
            StockEvent::StockAdded(e)
            | StockEvent::SaleRecorded(e)
            | StockEvent::DamageRecorded(e)
            | StockEvent::ReturnRecorded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for StockItem {
    type Command = StockCommand;
    type Event = StockEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            StockEvent::ItemRegistered(e) => {
                self.id = e.product_id;
                self.pieces_per_box = e.pieces_per_box;
                self.counters = StockCounters::default();
                self.counters.record(MovementKind::AddStock, e.opening_stock);
                self.registered = true;
            }
            other => {
                if let Some((kind, e)) = other.as_movement() {
                    self.counters.record(kind, e.quantity);
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            StockCommand::RegisterItem(cmd) => self.handle_register(cmd),
            StockCommand::RecordMovement(cmd) => self.handle_movement(cmd),
        }
    }
}

impl StockItem {
    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn handle_register(&self, cmd: &RegisterItem) -> Result<Vec<StockEvent>, DomainError> {
        if self.registered {
            return Err(DomainError::conflict("stock item already registered"));
        }
        self.ensure_product_id(cmd.product_id)?;

        Ok(vec![StockEvent::ItemRegistered(ItemRegistered {
            product_id: cmd.product_id,
            pieces_per_box: cmd.pieces_per_box,
            opening_stock: cmd.opening_stock,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_movement(&self, cmd: &RecordMovement) -> Result<Vec<StockEvent>, DomainError> {
        if !self.registered {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(cmd.product_id)?;

        let quantity = cmd.request.quantity;
        if quantity.is_zero() {
            return Err(DomainError::validation("quantity cannot be zero"));
        }

        let per_box = self.pieces_per_box;
        let requested = quantity.normalized(per_box);
        match cmd.kind {
            MovementKind::Sale | MovementKind::Damage => {
                let available = self.counters.available(per_box);
                if requested.total_pieces() > available.total_pieces() {
                    return Err(DomainError::invariant(format!(
                        "{} of {requested} exceeds available {available}",
                        cmd.kind
                    )));
                }
            }
            MovementKind::Return => {
                let returnable = self.counters.returnable_pieces(per_box);
                if requested.total_pieces() > returnable {
                    return Err(DomainError::invariant(format!(
                        "return of {requested} exceeds {returnable} pieces sold and not yet returned"
                    )));
                }
            }
            MovementKind::AddStock => {}
        }

        Ok(vec![StockEvent::movement(
            cmd.kind,
            MovementRecorded {
                product_id: cmd.product_id,
                quantity,
                note: cmd.request.note.clone(),
                occurred_at: cmd.occurred_at,
            },
        )])
    }
}
