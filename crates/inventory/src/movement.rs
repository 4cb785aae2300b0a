use serde::{Deserialize, Serialize};

use tilestock_quantity::RawQuantity;

/// Operations that change a product's counters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    AddStock,
    Sale,
    Damage,
    Return,
}

impl MovementKind {
    pub const ALL: [MovementKind; 4] = [
        MovementKind::AddStock,
        MovementKind::Sale,
        MovementKind::Damage,
        MovementKind::Return,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::AddStock => "add_stock",
            MovementKind::Sale => "sale",
            MovementKind::Damage => "damage",
            MovementKind::Return => "return",
        }
    }

    /// Sales and damage take pieces out of available stock.
    pub fn is_outflow(&self) -> bool {
        matches!(self, MovementKind::Sale | MovementKind::Damage)
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of an add-stock/sell/damage/return request: `{"boxes": 2, "pieces": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRequest {
    #[serde(flatten)]
    pub quantity: RawQuantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MovementRequest {
    pub fn new(quantity: RawQuantity) -> Self {
        Self { quantity, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_is_flat() {
        let body = MovementRequest::new(RawQuantity::new(2, 1));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"boxes": 2, "pieces": 1})
        );

        let body = body.with_note("broken in transit");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"boxes": 2, "pieces": 1, "note": "broken in transit"})
        );
    }

    #[test]
    fn blank_note_is_dropped() {
        let body = MovementRequest::new(RawQuantity::new(1, 0)).with_note("  ");
        assert_eq!(body.note, None);
    }

    #[test]
    fn request_body_parses_back() {
        let body: MovementRequest = serde_json::from_str(r#"{"boxes": 3, "pieces": 0}"#).unwrap();
        assert_eq!(body, MovementRequest::new(RawQuantity::new(3, 0)));
    }
}
