//! # Panel Layout Calculation
//!
//! Greedy best-fit layout of formwork panels around a wall perimeter.
//!
//! ## Method
//!
//! 1. The footprint is treated as a square of the given floor area, so the
//!    wall perimeter is `sqrt(area) * 4` (converted to mm).
//! 2. Panels are 1200 mm tall; the wall needs `ceil(height / 1200)` layers.
//! 3. One layer is filled along the perimeter largest-first: primary panels
//!    while another fits, then secondary panels while another fits. Whatever
//!    is left is the residual gap.
//! 4. Per-layer counts are multiplied by the layer count.
//! 5. Each panel takes a fixed number of pins and wedges.
//!
//! A perimeter shorter than one primary panel falls straight through to
//! secondary filling, and a perimeter shorter than a secondary panel is left
//! entirely as gap. Both are valid results.
//!
//! ## Example
//!
//! ```rust
//! use kitting_core::calculations::layout::{compute_layout, LayoutRequest};
//! use kitting_core::settings::PanelCatalog;
//!
//! let request = LayoutRequest::new(64.0, 2.4);
//! let result = compute_layout(&request, &PanelCatalog::default()).unwrap();
//!
//! assert_eq!(result.layers, 2);
//! assert_eq!(result.primary_total, 106);
//! assert_eq!(result.fasteners, 424);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{KitError, KitResult};
use crate::settings::PanelCatalog;
use crate::units::{Meters, Millimeters, SquareMeters};

/// Counts above this are no longer exactly representable as f64.
const EXACT_COUNT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Input parameters for a kitting layout.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Level 2 Core",
///   "area_m2": 64.0,
///   "height_m": 2.4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// User label for this layout (e.g. "Level 2 Core")
    #[serde(default)]
    pub label: String,

    /// Floor area in square meters
    pub area_m2: f64,

    /// Wall height in meters
    pub height_m: f64,
}

impl LayoutRequest {
    /// Create an unlabelled request.
    pub fn new(area_m2: f64, height_m: f64) -> Self {
        LayoutRequest {
            label: String::new(),
            area_m2,
            height_m,
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Validate input parameters: both values finite and strictly positive.
    pub fn validate(&self) -> KitResult<()> {
        if !self.area_m2.is_finite() {
            return Err(KitError::invalid_input(
                "area_m2",
                self.area_m2.to_string(),
                "Floor area must be a finite number",
            ));
        }
        if self.area_m2 <= 0.0 {
            return Err(KitError::invalid_input(
                "area_m2",
                self.area_m2.to_string(),
                "Floor area must be positive",
            ));
        }
        if !self.height_m.is_finite() {
            return Err(KitError::invalid_input(
                "height_m",
                self.height_m.to_string(),
                "Wall height must be a finite number",
            ));
        }
        if self.height_m <= 0.0 {
            return Err(KitError::invalid_input(
                "height_m",
                self.height_m.to_string(),
                "Wall height must be positive",
            ));
        }
        Ok(())
    }

    /// Wall perimeter of the square footprint
    pub fn perimeter(&self) -> Millimeters {
        SquareMeters(self.area_m2).square_perimeter().into()
    }

    /// Number of panel layers needed to reach the wall height
    pub fn layers(&self, catalog: &PanelCatalog) -> u64 {
        let height: Millimeters = Meters(self.height_m).into();
        let layers = (height.0 / catalog.panel_height_mm).ceil();
        if layers >= u64::MAX as f64 {
            u64::MAX
        } else {
            (layers as u64).max(1)
        }
    }
}

/// Panels placed along a single run of wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowFill {
    /// Primary panels placed
    pub primary: u64,

    /// Secondary panels placed
    pub secondary: u64,

    /// Length left uncovered
    pub gap_mm: Millimeters,
}

/// Greedily fill `length` with primary panels, then secondary panels.
pub fn fill_row(length: Millimeters, catalog: &PanelCatalog) -> RowFill {
    let primary = fit_count(catalog.primary_width_mm, length.0);
    let after_primary = length.0 - primary as f64 * catalog.primary_width_mm;

    let secondary = fit_count(catalog.secondary_width_mm, after_primary);
    let gap = after_primary - secondary as f64 * catalog.secondary_width_mm;

    RowFill {
        primary,
        secondary,
        gap_mm: Millimeters(gap),
    }
}

/// Largest `n` with `n * width <= available`.
///
/// Equivalent to placing panels one at a time while the next one still fits,
/// without iterating once per panel.
fn fit_count(width: f64, available: f64) -> u64 {
    if available.is_nan() || available < width {
        return 0;
    }

    let estimate = (available / width).floor();
    if estimate >= EXACT_COUNT_LIMIT {
        return if estimate >= u64::MAX as f64 {
            u64::MAX
        } else {
            estimate as u64
        };
    }

    // The division can round across an integer boundary; settle on the
    // exact count the one-at-a-time placement would reach.
    let mut count = estimate as u64;
    while count > 0 && count as f64 * width > available {
        count -= 1;
    }
    while (count + 1) as f64 * width <= available {
        count += 1;
    }
    count
}

/// Results from the greedy layout.
///
/// ## JSON Example
///
/// ```json
/// {
///   "perimeter_mm": 32000.0,
///   "layers": 2,
///   "primary_per_layer": 53,
///   "secondary_per_layer": 0,
///   "primary_total": 106,
///   "secondary_total": 0,
///   "gap_mm": 200.0,
///   "fasteners": 424
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Wall perimeter of the square footprint (mm)
    pub perimeter_mm: Millimeters,

    /// Vertical panel layers
    pub layers: u64,

    /// Primary panels in one layer
    pub primary_per_layer: u64,

    /// Secondary panels in one layer
    pub secondary_per_layer: u64,

    /// Primary panels over the full wall height
    pub primary_total: u64,

    /// Secondary panels over the full wall height
    pub secondary_total: u64,

    /// Uncovered length left in each layer (mm)
    pub gap_mm: Millimeters,

    /// Pins required; wedges are ordered in the same quantity
    pub fasteners: u64,
}

impl LayoutResult {
    /// Total panels of both sizes
    pub fn total_panels(&self) -> u64 {
        self.primary_total.saturating_add(self.secondary_total)
    }

    /// Whether the residual gap exceeds the alert threshold
    pub fn exceeds_gap(&self, threshold: Millimeters) -> bool {
        self.gap_mm > threshold
    }
}

/// Run the greedy panel layout.
///
/// # Arguments
///
/// * `input` - Floor area and wall height
/// * `catalog` - Panel sizes and fasteners per panel
///
/// # Returns
///
/// * `Ok(LayoutResult)` - Layout quantities
/// * `Err(KitError)` - If the area or height is not a positive finite number
pub fn compute_layout(input: &LayoutRequest, catalog: &PanelCatalog) -> KitResult<LayoutResult> {
    input.validate()?;

    let perimeter = input.perimeter();
    let layers = input.layers(catalog);
    tracing::debug!(
        perimeter_mm = perimeter.0,
        layers,
        "derived wall geometry"
    );

    let row = fill_row(perimeter, catalog);
    tracing::debug!(
        primary = row.primary,
        secondary = row.secondary,
        gap_mm = row.gap_mm.0,
        "filled one layer"
    );

    let primary_total = row.primary.saturating_mul(layers);
    let secondary_total = row.secondary.saturating_mul(layers);
    let fasteners = primary_total
        .saturating_add(secondary_total)
        .saturating_mul(catalog.fasteners_per_panel);

    Ok(LayoutResult {
        perimeter_mm: perimeter,
        layers,
        primary_per_layer: row.primary,
        secondary_per_layer: row.secondary,
        primary_total,
        secondary_total,
        gap_mm: row.gap_mm,
        fasteners,
    })
}

/// Run the layout with the standard 600/300 x 1200 panel catalog.
pub fn compute_layout_default(area_m2: f64, height_m: f64) -> KitResult<LayoutResult> {
    compute_layout(&LayoutRequest::new(area_m2, height_m), &PanelCatalog::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perimeter_from_area() {
        let result = compute_layout_default(100.0, 3.6).unwrap();
        assert_eq!(result.perimeter_mm, Millimeters(40000.0));
    }

    #[test]
    fn test_layer_count() {
        let catalog = PanelCatalog::default();
        assert_eq!(LayoutRequest::new(100.0, 3.6).layers(&catalog), 3);
        assert_eq!(LayoutRequest::new(100.0, 3.61).layers(&catalog), 4);
        assert_eq!(LayoutRequest::new(100.0, 1.2).layers(&catalog), 1);
        assert_eq!(LayoutRequest::new(100.0, 0.1).layers(&catalog), 1);
    }

    #[test]
    fn test_greedy_fill_40m() {
        let result = compute_layout_default(100.0, 3.6).unwrap();
        assert_eq!(result.primary_per_layer, 66);
        assert_eq!(result.secondary_per_layer, 1);
        assert!((result.gap_mm.0 - 100.0).abs() < 1e-9);
        assert_eq!(result.primary_total, 198);
        assert_eq!(result.secondary_total, 3);
        assert_eq!(result.fasteners, 4 * (198 + 3));
    }

    #[test]
    fn test_scenario_64_m2() {
        let result = compute_layout_default(64.0, 2.4).unwrap();
        assert_eq!(result.perimeter_mm, Millimeters(32000.0));
        assert_eq!(result.layers, 2);
        assert_eq!(result.primary_per_layer, 53);
        assert_eq!(result.secondary_per_layer, 0);
        assert!((result.gap_mm.0 - 200.0).abs() < 1e-9);
        assert_eq!(result.primary_total, 106);
        assert_eq!(result.secondary_total, 0);
        assert_eq!(result.fasteners, 424);
    }

    #[test]
    fn test_exact_multiple_leaves_no_gap() {
        // 36 m² -> 24 m perimeter = 40 primary panels exactly
        let result = compute_layout_default(36.0, 1.2).unwrap();
        assert_eq!(result.primary_per_layer, 40);
        assert_eq!(result.secondary_per_layer, 0);
        assert_eq!(result.gap_mm, Millimeters(0.0));
    }

    #[test]
    fn test_perimeter_below_primary_width() {
        // 0.0144 m² -> 0.12 m side -> 480 mm perimeter
        let result = compute_layout_default(0.0144, 1.0).unwrap();
        assert_eq!(result.primary_per_layer, 0);
        assert_eq!(result.secondary_per_layer, 1);
        assert!((result.gap_mm.0 - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_perimeter_below_secondary_width() {
        // 0.0025 m² -> 0.05 m side -> 200 mm perimeter, nothing fits
        let result = compute_layout_default(0.0025, 1.0).unwrap();
        assert_eq!(result.primary_total, 0);
        assert_eq!(result.secondary_total, 0);
        assert_eq!(result.fasteners, 0);
        assert!((result.gap_mm.0 - result.perimeter_mm.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_row_matches_stepwise_placement() {
        let catalog = PanelCatalog::default();
        for length in [0.0, 299.9, 300.0, 599.0, 600.0, 901.0, 12000.0, 40000.0, 32123.4] {
            let mut current = 0.0;
            let mut primary = 0;
            while current + 600.0 <= length {
                primary += 1;
                current += 600.0;
            }
            let mut secondary = 0;
            while current + 300.0 <= length {
                secondary += 1;
                current += 300.0;
            }

            let row = fill_row(Millimeters(length), &catalog);
            assert_eq!(row.primary, primary, "primary for {}", length);
            assert_eq!(row.secondary, secondary, "secondary for {}", length);
            assert!((row.gap_mm.0 - (length - current)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(compute_layout_default(0.0, 2.4).is_err());
        assert!(compute_layout_default(-5.0, 2.4).is_err());
        assert!(compute_layout_default(64.0, 0.0).is_err());
        assert!(compute_layout_default(f64::NAN, 2.4).is_err());
        assert!(compute_layout_default(64.0, f64::INFINITY).is_err());

        match compute_layout_default(64.0, -1.0) {
            Err(KitError::InvalidInput { field, .. }) => assert_eq!(field, "height_m"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_area_does_not_overflow() {
        let result = compute_layout_default(1e300, 1e300).unwrap();
        assert_eq!(result.layers, u64::MAX);
        assert_eq!(result.fasteners, u64::MAX);
    }

    #[test]
    fn test_gap_alert() {
        let result = compute_layout_default(64.0, 2.4).unwrap();
        assert!(result.exceeds_gap(Millimeters(50.0)));
        assert!(!result.exceeds_gap(Millimeters(200.0)));
    }

    #[test]
    fn test_serialization() {
        let request = LayoutRequest::new(64.0, 2.4).with_label("Core");
        let json = serde_json::to_string(&request).unwrap();
        let roundtrip: LayoutRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, roundtrip);

        let unlabelled: LayoutRequest =
            serde_json::from_str(r#"{ "area_m2": 10.0, "height_m": 3.0 }"#).unwrap();
        assert_eq!(unlabelled.label, "");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn gap_is_below_secondary_width(area in 0.1f64..1.0e6, height in 0.01f64..500.0) {
                let result = compute_layout_default(area, height).unwrap();
                prop_assert!(result.gap_mm.0 >= 0.0);
                prop_assert!(result.gap_mm.0 < 300.0);
            }

            #[test]
            fn layers_match_ceiling(height in 0.01f64..500.0) {
                let result = compute_layout_default(25.0, height).unwrap();
                let expected = ((height * 1000.0) / 1200.0).ceil() as u64;
                prop_assert_eq!(result.layers, expected);
            }

            #[test]
            fn panels_never_exceed_perimeter(area in 1.0e-6f64..1.0e6) {
                let result = compute_layout_default(area, 1.0).unwrap();
                let covered = result.primary_per_layer as f64 * 600.0
                    + result.secondary_per_layer as f64 * 300.0;
                prop_assert!(covered <= result.perimeter_mm.0);
                prop_assert!((covered + result.gap_mm.0 - result.perimeter_mm.0).abs() < 1e-6);
            }

            #[test]
            fn fasteners_follow_panel_totals(area in 0.1f64..1.0e5, height in 0.1f64..100.0) {
                let result = compute_layout_default(area, height).unwrap();
                prop_assert_eq!(result.fasteners, 4 * result.total_panels());
            }

            #[test]
            fn layout_is_idempotent(area in 0.1f64..1.0e6, height in 0.1f64..100.0) {
                let first = compute_layout_default(area, height).unwrap();
                let second = compute_layout_default(area, height).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
