use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tilestock_quantity::PiecesPerBox;

/// How many pieces a box of a given tile size holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PerBoxRule {
    Fixed { per_box: PiecesPerBox },
    /// The manufacturer packs this size more than one way; the user picks at
    /// product creation.
    Choice {
        default: PiecesPerBox,
        alternates: Vec<PiecesPerBox>,
    },
}

impl PerBoxRule {
    pub fn default_per_box(&self) -> PiecesPerBox {
        match self {
            PerBoxRule::Fixed { per_box } => *per_box,
            PerBoxRule::Choice { default, .. } => *default,
        }
    }

    pub fn allows(&self, per_box: PiecesPerBox) -> bool {
        match self {
            PerBoxRule::Fixed { per_box: fixed } => *fixed == per_box,
            PerBoxRule::Choice { default, alternates } => {
                *default == per_box || alternates.contains(&per_box)
            }
        }
    }

    /// All values offered, default first.
    pub fn options(&self) -> Vec<PiecesPerBox> {
        match self {
            PerBoxRule::Fixed { per_box } => vec![*per_box],
            PerBoxRule::Choice { default, alternates } => {
                let mut options = vec![*default];
                options.extend(alternates.iter().copied().filter(|p| p != default));
                options
            }
        }
    }
}

/// Known tile sizes (e.g. `"60x60"`) and their packing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCatalog {
    sizes: BTreeMap<String, PerBoxRule>,
}

impl SizeCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sizes the distributor stocks by default.
    pub fn standard() -> Self {
        let fixed = |n| PerBoxRule::Fixed {
            per_box: PiecesPerBox::of(n),
        };
        let mut catalog = Self::empty();
        catalog.insert("20x20", fixed(12));
        catalog.insert("30x30", fixed(11));
        catalog.insert("40x40", fixed(6));
        catalog.insert(
            "30x60",
            PerBoxRule::Choice {
                default: PiecesPerBox::of(6),
                alternates: vec![PiecesPerBox::of(5)],
            },
        );
        catalog.insert("60x60", fixed(4));
        catalog.insert("80x80", fixed(3));
        catalog.insert("60x120", fixed(2));
        catalog.insert("120x120", fixed(1));
        catalog
    }

    pub fn insert(&mut self, size: impl AsRef<str>, rule: PerBoxRule) {
        self.sizes.insert(normalize_size(size.as_ref()), rule);
    }

    pub fn rule(&self, size: &str) -> Option<&PerBoxRule> {
        self.sizes.get(&normalize_size(size))
    }

    pub fn sizes(&self) -> impl Iterator<Item = (&str, &PerBoxRule)> {
        self.sizes.iter().map(|(size, rule)| (size.as_str(), rule))
    }
}

/// `" 60 X 60 "` and `"60x60"` name the same size.
pub fn normalize_size(size: &str) -> String {
    size.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .map(|c| if c == '×' || c == '*' { 'x' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_offers_alternate_packing() {
        let catalog = SizeCatalog::standard();
        let rule = catalog.rule("30x60").unwrap();

        assert_eq!(rule.default_per_box().get(), 6);
        assert!(rule.allows(PiecesPerBox::new(5).unwrap()));
        assert!(!rule.allows(PiecesPerBox::new(4).unwrap()));
        assert_eq!(
            rule.options().iter().map(|p| p.get()).collect::<Vec<_>>(),
            vec![6, 5]
        );
    }

    #[test]
    fn size_lookup_ignores_spacing_and_case() {
        let catalog = SizeCatalog::standard();
        assert_eq!(
            catalog.rule(" 60 X 60 ").map(PerBoxRule::default_per_box),
            Some(PiecesPerBox::new(4).unwrap())
        );
        assert!(catalog.rule("61x61").is_none());
    }

    #[test]
    fn rule_serializes_with_tag() {
        let rule = PerBoxRule::Choice {
            default: PiecesPerBox::new(6).unwrap(),
            alternates: vec![PiecesPerBox::new(5).unwrap()],
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json, serde_json::json!({"rule": "choice", "default": 6, "alternates": [5]}));
    }
}
