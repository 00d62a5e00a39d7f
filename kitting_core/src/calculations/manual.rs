//! # Manual Estimate
//!
//! Models how a site estimator orders panels by hand: perimeter divided by
//! the standard panel width, inflated for safety, with a flat share of filler
//! panels and a wastage allowance on fasteners.
//!
//! This is deliberately independent of the greedy layout. Only the perimeter,
//! layer count and the optimized fastener count feed into it; none of the
//! greedy panel counts do.

use serde::{Deserialize, Serialize};

use crate::settings::{ManualHeuristics, PanelCatalog};
use crate::units::{Meters, Millimeters};

/// Quantities a manual estimate would order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEstimate {
    /// Primary panels ordered
    pub primary: u64,

    /// Secondary panels ordered
    pub secondary: u64,

    /// Pins ordered; wedges are ordered in the same quantity
    pub fasteners: u64,
}

/// Estimate quantities the way they are typically ordered by hand.
///
/// * primary = `ceil(perimeter_m / primary_width_m * layers * inflation)`
/// * secondary = `ceil(primary * secondary_ratio)`
/// * fasteners = `ceil(optimized_fasteners * fastener_wastage)`
pub fn estimate_manual(
    perimeter: Millimeters,
    layers: u64,
    optimized_fasteners: u64,
    catalog: &PanelCatalog,
    heuristics: &ManualHeuristics,
) -> ManualEstimate {
    let perimeter_m: Meters = perimeter.into();
    let primary_width_m: Meters = Millimeters(catalog.primary_width_mm).into();

    let primary = ceil_count(
        (perimeter_m.0 / primary_width_m.0) * layers as f64 * heuristics.inflation_factor,
    );
    let secondary = ceil_count(primary as f64 * heuristics.secondary_ratio);
    let fasteners = ceil_count(optimized_fasteners as f64 * heuristics.fastener_wastage);

    tracing::debug!(primary, secondary, fasteners, "manual estimate");

    ManualEstimate {
        primary,
        secondary,
        fasteners,
    }
}

/// Round a non-negative quantity up to a whole count, saturating at u64::MAX.
pub(crate) fn ceil_count(value: f64) -> u64 {
    let rounded = value.ceil();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else if rounded >= u64::MAX as f64 {
        u64::MAX
    } else {
        rounded as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(perimeter_mm: f64, layers: u64, optimized_fasteners: u64) -> ManualEstimate {
        estimate_manual(
            Millimeters(perimeter_mm),
            layers,
            optimized_fasteners,
            &PanelCatalog::default(),
            &ManualHeuristics::default(),
        )
    }

    #[test]
    fn test_manual_64_m2() {
        // 32 m / 0.6 * 2 * 1.15 = 122.67 -> 123
        let manual = standard(32000.0, 2, 424);
        assert_eq!(manual.primary, 123);
        // 123 * 0.1 = 12.3 -> 13
        assert_eq!(manual.secondary, 13);
        // 424 * 1.4 = 593.6 -> 594
        assert_eq!(manual.fasteners, 594);
    }

    #[test]
    fn test_manual_ignores_greedy_counts() {
        // Same perimeter and layers, different optimized fasteners: panels unchanged
        let a = standard(32000.0, 2, 424);
        let b = standard(32000.0, 2, 1000);
        assert_eq!(a.primary, b.primary);
        assert_eq!(a.secondary, b.secondary);
        assert_eq!(b.fasteners, 1400);
    }

    #[test]
    fn test_zero_fasteners() {
        let manual = standard(200.0, 1, 0);
        assert_eq!(manual.fasteners, 0);
        // 0.2 / 0.6 * 1.15 = 0.38 -> 1
        assert_eq!(manual.primary, 1);
        assert_eq!(manual.secondary, 1);
    }

    #[test]
    fn test_custom_heuristics() {
        let heuristics = ManualHeuristics {
            inflation_factor: 1.0,
            secondary_ratio: 0.5,
            fastener_wastage: 2.0,
        };
        let manual = estimate_manual(
            Millimeters(6000.0),
            1,
            40,
            &PanelCatalog::default(),
            &heuristics,
        );
        assert_eq!(manual.primary, 10);
        assert_eq!(manual.secondary, 5);
        assert_eq!(manual.fasteners, 80);
    }

    #[test]
    fn test_ceil_count_saturates() {
        assert_eq!(ceil_count(f64::MAX), u64::MAX);
        assert_eq!(ceil_count(0.0), 0);
        assert_eq!(ceil_count(0.01), 1);
    }
}
