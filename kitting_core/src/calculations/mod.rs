//! # Kitting Calculations
//!
//! Each calculation follows the same pattern:
//!
//! - `*Request` / plain inputs - JSON-serializable parameters
//! - `*Result` / `*Estimate` - JSON-serializable quantities
//! - a pure function from one to the other
//!
//! ## Available Calculations
//!
//! - [`layout`] - Greedy panel layout around the wall perimeter
//! - [`manual`] - Hand-ordering heuristic for the same wall
//! - [`shoring`] - Slab shoring props from floor area
//!
//! [`calculate_kitting`] runs all three for one request.

pub mod layout;
pub mod manual;
pub mod shoring;

use serde::{Deserialize, Serialize};

use crate::errors::KitResult;
use crate::settings::KittingSettings;

// Re-export commonly used types
pub use layout::{compute_layout, compute_layout_default, fill_row, LayoutRequest, LayoutResult, RowFill};
pub use manual::{estimate_manual, ManualEstimate};
pub use shoring::{estimate_shoring, ShoringEstimate};

/// Optimized and manual quantities for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KittingQuantities {
    /// Greedy layout (the optimized order)
    pub layout: LayoutResult,

    /// Manual order for the same wall
    pub manual: ManualEstimate,

    /// Slab shoring props
    pub shoring: ShoringEstimate,
}

/// Run the layout, manual estimate and shoring count for one request.
pub fn calculate_kitting(
    request: &LayoutRequest,
    settings: &KittingSettings,
) -> KitResult<KittingQuantities> {
    let layout = compute_layout(request, &settings.panels)?;
    let manual = estimate_manual(
        layout.perimeter_mm,
        layout.layers,
        layout.fasteners,
        &settings.panels,
        &settings.manual,
    );
    let shoring = estimate_shoring(request.area_m2, &settings.shoring);

    Ok(KittingQuantities {
        layout,
        manual,
        shoring,
    })
}
