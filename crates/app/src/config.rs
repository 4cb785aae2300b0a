use tilestock_input::UnitMode;

pub const DEFAULT_LOW_STOCK_BOXES: u64 = 5;

/// Settings read from the environment at startup.
///
/// | variable                    | default |
/// |-----------------------------|---------|
/// | `TILESTOCK_DEFAULT_UNIT`    | `boxes` |
/// | `TILESTOCK_LOW_STOCK_BOXES` | `5`     |
/// | `TILESTOCK_LOG`             | `info`  |
///
/// `RUST_LOG`, when set, still wins over `TILESTOCK_LOG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub default_unit: UnitMode,
    pub low_stock_boxes: u64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_unit: UnitMode::Boxes,
            low_stock_boxes: DEFAULT_LOW_STOCK_BOXES,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; invalid values fall back to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let default_unit = match lookup("TILESTOCK_DEFAULT_UNIT") {
            None => defaults.default_unit,
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "TILESTOCK_DEFAULT_UNIT invalid; using boxes");
                defaults.default_unit
            }),
        };

        let low_stock_boxes = match lookup("TILESTOCK_LOW_STOCK_BOXES") {
            None => defaults.low_stock_boxes,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "TILESTOCK_LOW_STOCK_BOXES invalid; using default");
                defaults.low_stock_boxes
            }),
        };

        let log_filter = lookup("TILESTOCK_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            default_unit,
            low_stock_boxes,
            log_filter,
        }
    }
}
