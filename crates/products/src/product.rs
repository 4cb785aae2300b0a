use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tilestock_core::{DomainError, DomainResult, Entity, ProductId};
use tilestock_quantity::PiecesPerBox;

use crate::size::{SizeCatalog, normalize_size};

/// Input of the "new product" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub size: String,
    /// Explicit packing; required for sizes missing from the catalog, and must be
    /// one of the offered options for known sizes.
    pub pieces_per_box: Option<u32>,
    pub low_stock_boxes: Option<u64>,
}

/// A tile product. Its pieces-per-box is fixed for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProduct {
    id: ProductId,
    code: String,
    name: String,
    size: String,
    pieces_per_box: PiecesPerBox,
    low_stock_boxes: u64,
    created_at: DateTime<Utc>,
}

impl TileProduct {
    /// Validate a new product against the size catalog.
    ///
    /// `default_low_stock_boxes` applies when the form leaves the threshold blank.
    pub fn create(
        id: ProductId,
        new: NewProduct,
        catalog: &SizeCatalog,
        default_low_stock_boxes: u64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let code = new.code.trim();
        if code.is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        let name = new.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let size = normalize_size(&new.size);
        if size.is_empty() {
            return Err(DomainError::validation("size cannot be empty"));
        }

        let requested = new.pieces_per_box.map(PiecesPerBox::new).transpose()?;
        let pieces_per_box = match (catalog.rule(&size), requested) {
            (Some(rule), None) => rule.default_per_box(),
            (Some(rule), Some(per_box)) if rule.allows(per_box) => per_box,
            (Some(rule), Some(per_box)) => {
                let offered: Vec<String> = rule.options().iter().map(|p| p.get().to_string()).collect();
                return Err(DomainError::validation(format!(
                    "size {size} is packed {} pieces per box, not {}",
                    offered.join(" or "),
                    per_box.get()
                )));
            }
            (None, Some(per_box)) => {
                tracing::debug!(%size, per_box = per_box.get(), "custom tile size");
                per_box
            }
            (None, None) => {
                return Err(DomainError::validation(format!(
                    "unknown size {size}; pieces per box must be given"
                )));
            }
        };

        Ok(Self {
            id,
            code: code.to_string(),
            name: name.to_string(),
            size,
            pieces_per_box,
            low_stock_boxes: new.low_stock_boxes.unwrap_or(default_low_stock_boxes),
            created_at,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn pieces_per_box(&self) -> PiecesPerBox {
        self.pieces_per_box
    }

    pub fn low_stock_boxes(&self) -> u64 {
        self.low_stock_boxes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name.to_string();
        Ok(())
    }
}

impl Entity for TileProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
