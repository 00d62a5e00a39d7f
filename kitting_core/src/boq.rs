//! # Bill of Quantities
//!
//! Turns kitting quantities into the five standard BoQ lines and provides the
//! table operations the front ends need: savings per line, sorting by column
//! and free-text filtering.
//!
//! ## Standard Lines
//!
//! | Code        | Item                      | Manual source         | Optimized source |
//! |-------------|---------------------------|-----------------------|------------------|
//! | LT-FW-600   | Standard wall panel       | inflation heuristic   | greedy fill      |
//! | LT-FW-300   | Filler panel              | ratio of manual 600s  | greedy fill      |
//! | LT-AC-PIN   | High-tensile pins         | wastage on optimized  | 4 per panel      |
//! | LT-AC-WDG   | Pressure wedges           | wastage on optimized  | 4 per panel      |
//! | LT-SP-100   | Slab shoring prop         | area / 1.5            | area / 1.8       |
//!
//! ## Example
//!
//! ```rust
//! use kitting_core::boq::{BoqTable, SortDirection, SortKey};
//! use kitting_core::calculations::{calculate_kitting, LayoutRequest};
//! use kitting_core::settings::KittingSettings;
//!
//! let settings = KittingSettings::default();
//! let quantities = calculate_kitting(&LayoutRequest::new(64.0, 2.4), &settings).unwrap();
//! let mut table = BoqTable::from_quantities(&quantities, &settings);
//!
//! table.sort(SortKey::Savings, SortDirection::Descending);
//! assert_eq!(table.lines()[0].item_code, "LT-AC-PIN");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::KittingQuantities;
use crate::errors::{KitError, KitResult};
use crate::settings::KittingSettings;

/// One row of the bill of quantities.
///
/// ## JSON Example
///
/// ```json
/// {
///   "item_code": "LT-FW-600",
///   "description": "Standard Obs. Wall Panel",
///   "size": "600x1200",
///   "manual": 123,
///   "optimized": 106
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillOfQuantitiesLine {
    /// Catalog item code
    pub item_code: String,

    /// Item description
    pub description: String,

    /// Nominal size label (e.g. "600x1200", "Standard")
    pub size: String,

    /// Quantity a manual estimate would order
    pub manual: u64,

    /// Quantity the optimized layout needs
    pub optimized: u64,
}

impl BillOfQuantitiesLine {
    /// Create a line.
    pub fn new(
        item_code: impl Into<String>,
        description: impl Into<String>,
        size: impl Into<String>,
        manual: u64,
        optimized: u64,
    ) -> Self {
        BillOfQuantitiesLine {
            item_code: item_code.into(),
            description: description.into(),
            size: size.into(),
            manual,
            optimized,
        }
    }

    /// Units saved by ordering the optimized quantity (negative if it costs more).
    pub fn savings(&self) -> i64 {
        let diff = self.manual as i128 - self.optimized as i128;
        diff.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    /// Savings as a percentage of the manual quantity; 0 when nothing was ordered manually.
    pub fn savings_percent(&self) -> f64 {
        if self.manual == 0 {
            0.0
        } else {
            self.savings() as f64 / self.manual as f64 * 100.0
        }
    }

    /// Case-insensitive match on item code or description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.item_code.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Build the standard BoQ lines for a set of kitting quantities.
pub fn build_lines(
    quantities: &KittingQuantities,
    settings: &KittingSettings,
) -> Vec<BillOfQuantitiesLine> {
    let panels = &settings.panels;
    let layout = &quantities.layout;
    let manual = &quantities.manual;

    vec![
        BillOfQuantitiesLine::new(
            format!("LT-FW-{:.0}", panels.primary_width_mm),
            "Standard Obs. Wall Panel",
            panels.primary_size_label(),
            manual.primary,
            layout.primary_total,
        ),
        BillOfQuantitiesLine::new(
            format!("LT-FW-{:.0}", panels.secondary_width_mm),
            "Precise Filler Panel",
            panels.secondary_size_label(),
            manual.secondary,
            layout.secondary_total,
        ),
        BillOfQuantitiesLine::new(
            "LT-AC-PIN",
            "High-Tensile Pins",
            "Standard",
            manual.fasteners,
            layout.fasteners,
        ),
        BillOfQuantitiesLine::new(
            "LT-AC-WDG",
            "Pressure Wedges",
            "Standard",
            manual.fasteners,
            layout.fasteners,
        ),
        BillOfQuantitiesLine::new(
            "LT-SP-100",
            "Slab Shoring Prop",
            "2.5m - 4.0m",
            quantities.shoring.manual,
            quantities.shoring.optimized,
        ),
    ]
}

// ============================================================================
// Sorting
// ============================================================================

/// Column a BoQ table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    ItemCode,
    Description,
    Size,
    Manual,
    Optimized,
    Savings,
}

impl SortKey {
    /// Short column name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ItemCode => "id",
            SortKey::Description => "desc",
            SortKey::Size => "size",
            SortKey::Manual => "manual",
            SortKey::Optimized => "opt",
            SortKey::Savings => "save",
        }
    }

    fn compare(&self, a: &BillOfQuantitiesLine, b: &BillOfQuantitiesLine) -> Ordering {
        match self {
            SortKey::ItemCode => compare_text(&a.item_code, &b.item_code),
            SortKey::Description => compare_text(&a.description, &b.description),
            SortKey::Size => compare_text(&a.size, &b.size),
            SortKey::Manual => a.manual.cmp(&b.manual),
            SortKey::Optimized => a.optimized.cmp(&b.optimized),
            SortKey::Savings => a.savings().cmp(&b.savings()),
        }
    }
}

/// Case-insensitive text order; exact comparison only breaks ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl FromStr for SortKey {
    type Err = KitError;

    fn from_str(s: &str) -> KitResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "id" | "code" | "item_code" => Ok(SortKey::ItemCode),
            "desc" | "description" => Ok(SortKey::Description),
            "size" => Ok(SortKey::Size),
            "manual" => Ok(SortKey::Manual),
            "opt" | "optimized" => Ok(SortKey::Optimized),
            "save" | "savings" => Ok(SortKey::Savings),
            _ => Err(KitError::unknown_sort_key(s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Header-click sorting: each request sorts in the current direction, then
/// flips it for the next request, whichever column is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    direction: SortDirection,
}

impl SortState {
    /// State whose first sort runs in `direction`
    pub fn starting(direction: SortDirection) -> Self {
        Self { direction }
    }

    /// Direction the next sort will use
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Sort `table` by `key` and flip the direction for next time.
    pub fn apply(&mut self, table: &mut BoqTable, key: SortKey) -> SortDirection {
        let used = self.direction;
        table.sort(key, used);
        self.direction = used.flipped();
        used
    }
}

// ============================================================================
// Table
// ============================================================================

/// An ordered set of BoQ lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoqTable {
    lines: Vec<BillOfQuantitiesLine>,
}

impl BoqTable {
    /// Wrap existing lines.
    pub fn new(lines: Vec<BillOfQuantitiesLine>) -> Self {
        BoqTable { lines }
    }

    /// Build the standard table for a set of quantities.
    pub fn from_quantities(quantities: &KittingQuantities, settings: &KittingSettings) -> Self {
        BoqTable::new(build_lines(quantities, settings))
    }

    /// Lines in their current order
    pub fn lines(&self) -> &[BillOfQuantitiesLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stable sort by a column.
    pub fn sort(&mut self, key: SortKey, direction: SortDirection) {
        self.lines.sort_by(|a, b| {
            let ord = key.compare(a, b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }

    /// Lines whose code or description contains `term` (case-insensitive).
    ///
    /// An empty term keeps every line.
    pub fn filter(&self, term: &str) -> BoqTable {
        BoqTable::new(
            self.lines
                .iter()
                .filter(|line| line.matches(term))
                .cloned()
                .collect(),
        )
    }

    /// Sum of manual quantities across all lines
    pub fn total_manual(&self) -> u64 {
        self.lines.iter().fold(0u64, |acc, l| acc.saturating_add(l.manual))
    }

    /// Sum of optimized quantities across all lines
    pub fn total_optimized(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.optimized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate_kitting, LayoutRequest};

    fn table_64() -> BoqTable {
        let settings = KittingSettings::default();
        let quantities = calculate_kitting(&LayoutRequest::new(64.0, 2.4), &settings).unwrap();
        BoqTable::from_quantities(&quantities, &settings)
    }

    fn codes(table: &BoqTable) -> Vec<&str> {
        table.lines().iter().map(|l| l.item_code.as_str()).collect()
    }

    #[test]
    fn test_standard_lines() {
        let table = table_64();
        assert_eq!(
            codes(&table),
            vec!["LT-FW-600", "LT-FW-300", "LT-AC-PIN", "LT-AC-WDG", "LT-SP-100"]
        );

        let panel = &table.lines()[0];
        assert_eq!(panel.size, "600x1200");
        assert_eq!(panel.manual, 123);
        assert_eq!(panel.optimized, 106);

        let filler = &table.lines()[1];
        assert_eq!(filler.manual, 13);
        assert_eq!(filler.optimized, 0);

        let pins = &table.lines()[2];
        assert_eq!(pins.manual, 594);
        assert_eq!(pins.optimized, 424);
        assert_eq!(table.lines()[3].optimized, pins.optimized);

        let props = &table.lines()[4];
        assert_eq!((props.manual, props.optimized), (43, 36));
    }

    #[test]
    fn test_optimized_not_above_manual() {
        for line in table_64().lines() {
            assert!(line.optimized <= line.manual, "{} over-ordered", line.item_code);
        }
    }

    #[test]
    fn test_savings() {
        let line = BillOfQuantitiesLine::new("X", "Thing", "Standard", 594, 424);
        assert_eq!(line.savings(), 170);
        assert!((line.savings_percent() - 28.619).abs() < 0.01);

        let empty = BillOfQuantitiesLine::new("Y", "Nothing", "Standard", 0, 3);
        assert_eq!(empty.savings(), -3);
        assert_eq!(empty.savings_percent(), 0.0);
    }

    #[test]
    fn test_sort_by_savings() {
        let mut table = table_64();
        table.sort(SortKey::Savings, SortDirection::Descending);
        // pins and wedges tie at 170; stable sort keeps pins first
        assert_eq!(codes(&table)[..2], ["LT-AC-PIN", "LT-AC-WDG"]);
        assert_eq!(table.lines()[4].savings(), 7);
    }

    #[test]
    fn test_sort_by_description() {
        let mut table = table_64();
        table.sort(SortKey::Description, SortDirection::Ascending);
        let descriptions: Vec<_> = table.lines().iter().map(|l| l.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "High-Tensile Pins",
                "Precise Filler Panel",
                "Pressure Wedges",
                "Slab Shoring Prop",
                "Standard Obs. Wall Panel",
            ]
        );
    }

    #[test]
    fn test_sort_state_toggles() {
        let mut table = table_64();
        let mut state = SortState::default();

        assert_eq!(state.apply(&mut table, SortKey::Optimized), SortDirection::Ascending);
        assert_eq!(table.lines()[0].item_code, "LT-FW-300");

        assert_eq!(state.apply(&mut table, SortKey::Optimized), SortDirection::Descending);
        assert_eq!(table.lines()[0].item_code, "LT-AC-PIN");

        assert_eq!(state.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_sort_state_starting_descending() {
        let mut table = table_64();
        let mut state = SortState::starting(SortDirection::Descending);

        assert_eq!(state.apply(&mut table, SortKey::Savings), SortDirection::Descending);
        assert_eq!(table.lines()[0].item_code, "LT-AC-PIN");
        assert_eq!(state.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let mut table = BoqTable::new(vec![
            BillOfQuantitiesLine::new("lt-x-2", "bracing clamp", "Small", 1, 1),
            BillOfQuantitiesLine::new("LT-X-1", "Anchor bolt", "large", 2, 2),
            BillOfQuantitiesLine::new("LT-X-3", "Corner panel", "Medium", 3, 3),
        ]);

        table.sort(SortKey::Description, SortDirection::Ascending);
        let order: Vec<&str> = table.lines().iter().map(|l| l.description.as_str()).collect();
        assert_eq!(order, ["Anchor bolt", "bracing clamp", "Corner panel"]);

        table.sort(SortKey::ItemCode, SortDirection::Ascending);
        let order: Vec<&str> = table.lines().iter().map(|l| l.item_code.as_str()).collect();
        assert_eq!(order, ["LT-X-1", "lt-x-2", "LT-X-3"]);

        table.sort(SortKey::Size, SortDirection::Descending);
        assert_eq!(table.lines()[0].size, "Small");
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::ItemCode);
        assert_eq!("OPT".parse::<SortKey>().unwrap(), SortKey::Optimized);
        assert_eq!("save".parse::<SortKey>().unwrap(), SortKey::Savings);

        let err = "quantity".parse::<SortKey>().unwrap_err();
        assert_eq!(err, KitError::unknown_sort_key("quantity"));
    }

    #[test]
    fn test_filter() {
        let table = table_64();
        assert_eq!(codes(&table.filter("panel")), vec!["LT-FW-600", "LT-FW-300"]);
        assert_eq!(codes(&table.filter("lt-ac")), vec!["LT-AC-PIN", "LT-AC-WDG"]);
        assert_eq!(table.filter("").len(), 5);
        assert!(table.filter("rebar").is_empty());
    }

    #[test]
    fn test_totals() {
        let table = table_64();
        assert_eq!(table.total_manual(), 123 + 13 + 594 + 594 + 43);
        assert_eq!(table.total_optimized(), 106 + 424 + 424 + 36);
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&table_64()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"item_code\":\"LT-SP-100\""));
    }
}
