//! # Kitting Report
//!
//! A `KittingReport` is the complete result of one estimate: the request,
//! the optimized and manual quantities, the BoQ table and any gap alert.
//! Front ends and exporters receive a report value explicitly; nothing is
//! held in shared state between requests.
//!
//! ## Example
//!
//! ```rust
//! use kitting_core::calculations::LayoutRequest;
//! use kitting_core::report::KittingReport;
//! use kitting_core::settings::KittingSettings;
//!
//! let report = KittingReport::generate(
//!     LayoutRequest::new(64.0, 2.4).with_label("Level 1"),
//!     &KittingSettings::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(report.boq.len(), 5);
//! assert!(report.gap_alert.is_some()); // 200 mm gap > 50 mm threshold
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::boq::BoqTable;
use crate::calculations::{calculate_kitting, KittingQuantities, LayoutRequest};
use crate::errors::KitResult;
use crate::settings::KittingSettings;
use crate::units::Millimeters;

/// Raised when the greedy fill leaves more than the alert threshold uncovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAlert {
    /// Residual gap per layer (mm)
    pub gap_mm: Millimeters,

    /// Threshold that was exceeded (mm)
    pub threshold_mm: Millimeters,
}

impl GapAlert {
    /// Human-readable alert text
    pub fn message(&self) -> String {
        format!(
            "Residual gap of {:.1} mm per layer exceeds {:.0} mm; site-cut filler required",
            self.gap_mm.0, self.threshold_mm.0
        )
    }
}

/// Complete result of one kitting estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KittingReport {
    /// Unique report identifier
    pub id: Uuid,

    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// What was asked for
    pub request: LayoutRequest,

    /// Optimized and manual quantities
    pub quantities: KittingQuantities,

    /// Bill of quantities in its original line order
    pub boq: BoqTable,

    /// Present when the residual gap exceeds the configured threshold
    pub gap_alert: Option<GapAlert>,
}

impl KittingReport {
    /// Run the full estimate for a request.
    ///
    /// # Returns
    ///
    /// * `Ok(KittingReport)` - Quantities, BoQ and alerts
    /// * `Err(KitError)` - If the request is invalid
    pub fn generate(request: LayoutRequest, settings: &KittingSettings) -> KitResult<Self> {
        let quantities = calculate_kitting(&request, settings)?;
        let boq = BoqTable::from_quantities(&quantities, settings);

        let threshold = Millimeters(settings.report.gap_alert_threshold_mm);
        let gap_alert = if quantities.layout.exceeds_gap(threshold) {
            let alert = GapAlert {
                gap_mm: quantities.layout.gap_mm,
                threshold_mm: threshold,
            };
            tracing::warn!(
                gap_mm = alert.gap_mm.0,
                threshold_mm = threshold.0,
                "residual gap exceeds alert threshold"
            );
            Some(alert)
        } else {
            None
        };

        let report = KittingReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            request,
            quantities,
            boq,
            gap_alert,
        };

        tracing::info!(
            report_id = %report.id,
            area_m2 = report.request.area_m2,
            height_m = report.request.height_m,
            panels = report.quantities.layout.total_panels(),
            "kitting report generated"
        );
        Ok(report)
    }

    /// Display label: the request label, or a description of the geometry.
    pub fn title(&self) -> String {
        if self.request.label.trim().is_empty() {
            format!(
                "{} m² floor, {} m walls",
                self.request.area_m2, self.request.height_m
            )
        } else {
            self.request.label.clone()
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> KitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
