use serde::{Deserialize, Serialize};

use tilestock_core::{DomainError, DomainResult, ValueObject};

/// Number of pieces in one box of a given product.
///
/// Always `>= 1`; the only way to build one from a raw integer is [`PiecesPerBox::new`],
/// so downstream arithmetic never divides by zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PiecesPerBox(u32);

impl PiecesPerBox {
    /// One piece per box (large-format slabs).
    pub const ONE: PiecesPerBox = PiecesPerBox::of(1);

    pub fn new(raw: u32) -> DomainResult<Self> {
        if raw < 1 {
            return Err(DomainError::invalid_configuration(format!(
                "pieces per box must be at least 1 (got {raw})"
            )));
        }
        Ok(Self(raw))
    }

    /// For literal tables. Panics on 0, which in a `const` item is a compile error.
    pub const fn of(raw: u32) -> Self {
        assert!(raw >= 1, "pieces per box must be at least 1");
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub(crate) fn as_u64(self) -> u64 {
        u64::from(self.0)
    }
}

impl ValueObject for PiecesPerBox {}

impl TryFrom<u32> for PiecesPerBox {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PiecesPerBox> for u32 {
    fn from(value: PiecesPerBox) -> Self {
        value.0
    }
}

impl core::fmt::Display for PiecesPerBox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} pc/bx", self.0)
    }
}
