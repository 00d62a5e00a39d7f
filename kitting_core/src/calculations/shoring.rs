//! # Slab Shoring
//!
//! Shoring props are sized straight from floor area, independent of the wall
//! panel layout: one prop per `manual_area_per_prop_m2` for a manual order,
//! one per `optimized_area_per_prop_m2` for an optimized one.

use serde::{Deserialize, Serialize};

use crate::calculations::manual::ceil_count;
use crate::settings::ShoringRates;

/// Shoring prop quantities for a slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoringEstimate {
    /// Props ordered by a manual estimate
    pub manual: u64,

    /// Props needed by the optimized layout
    pub optimized: u64,
}

/// Count shoring props for a slab of `area_m2`.
pub fn estimate_shoring(area_m2: f64, rates: &ShoringRates) -> ShoringEstimate {
    ShoringEstimate {
        manual: ceil_count(area_m2 / rates.manual_area_per_prop_m2),
        optimized: ceil_count(area_m2 / rates.optimized_area_per_prop_m2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shoring_64_m2() {
        let props = estimate_shoring(64.0, &ShoringRates::default());
        // 64 / 1.5 = 42.67 -> 43, 64 / 1.8 = 35.56 -> 36
        assert_eq!(props.manual, 43);
        assert_eq!(props.optimized, 36);
    }

    #[test]
    fn test_small_slab_needs_one_prop() {
        let props = estimate_shoring(0.5, &ShoringRates::default());
        assert_eq!(props.manual, 1);
        assert_eq!(props.optimized, 1);
    }

    #[test]
    fn test_optimized_not_above_manual() {
        let rates = ShoringRates::default();
        for area in [1.0, 9.0, 64.0, 100.0, 2500.0] {
            let props = estimate_shoring(area, &rates);
            assert!(props.optimized <= props.manual);
        }
    }
}
