//! # Estimator Settings
//!
//! Every constant the estimator uses lives here: the panel catalog, the
//! manual-estimate heuristics, shoring coverage rates and report thresholds.
//! The defaults reproduce the standard kitting comparison; a JSON file can
//! override any subset of them.
//!
//! ## Structure
//!
//! ```text
//! KittingSettings
//! ├── panels: PanelCatalog (panel widths, panel height, fasteners per panel)
//! ├── manual: ManualHeuristics (over-ordering multipliers)
//! ├── shoring: ShoringRates (floor area covered per prop)
//! └── report: ReportSettings (gap alert, visualizer segment, company name)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kitting_core::settings::KittingSettings;
//!
//! let settings: KittingSettings =
//!     serde_json::from_str(r#"{ "manual": { "inflation_factor": 1.2 } }"#).unwrap();
//! assert_eq!(settings.manual.inflation_factor, 1.2);
//! assert_eq!(settings.panels.primary_width_mm, 600.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{KitError, KitResult};

/// Root settings container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KittingSettings {
    /// Panel catalog used by the greedy fill
    pub panels: PanelCatalog,

    /// Heuristics for the manual (human) estimate
    pub manual: ManualHeuristics,

    /// Shoring prop coverage rates
    pub shoring: ShoringRates,

    /// Report and presentation thresholds
    pub report: ReportSettings,
}

impl KittingSettings {
    /// Load settings from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> KitResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            KitError::file_error("read settings", path.display().to_string(), e.to_string())
        })?;

        let settings: KittingSettings = serde_json::from_str(&content)?;
        settings.validate()?;

        tracing::debug!(path = %path.display(), "loaded kitting settings");
        Ok(settings)
    }

    /// Validate that the settings describe a usable catalog.
    pub fn validate(&self) -> KitResult<()> {
        let p = &self.panels;
        if !(p.primary_width_mm.is_finite() && p.primary_width_mm > 0.0) {
            return Err(KitError::invalid_input(
                "panels.primary_width_mm",
                p.primary_width_mm.to_string(),
                "Panel width must be positive",
            ));
        }
        if !(p.secondary_width_mm.is_finite() && p.secondary_width_mm > 0.0) {
            return Err(KitError::invalid_input(
                "panels.secondary_width_mm",
                p.secondary_width_mm.to_string(),
                "Panel width must be positive",
            ));
        }
        if p.secondary_width_mm > p.primary_width_mm {
            return Err(KitError::invalid_input(
                "panels.secondary_width_mm",
                p.secondary_width_mm.to_string(),
                "Secondary panel must not be wider than the primary panel",
            ));
        }
        if !(p.panel_height_mm.is_finite() && p.panel_height_mm > 0.0) {
            return Err(KitError::invalid_input(
                "panels.panel_height_mm",
                p.panel_height_mm.to_string(),
                "Panel height must be positive",
            ));
        }

        let multipliers = [
            ("manual.inflation_factor", self.manual.inflation_factor),
            ("manual.secondary_ratio", self.manual.secondary_ratio),
            ("manual.fastener_wastage", self.manual.fastener_wastage),
            ("shoring.manual_area_per_prop_m2", self.shoring.manual_area_per_prop_m2),
            ("shoring.optimized_area_per_prop_m2", self.shoring.optimized_area_per_prop_m2),
        ];
        for (field, value) in multipliers {
            if !(value.is_finite() && value > 0.0) {
                return Err(KitError::invalid_input(
                    field,
                    value.to_string(),
                    "Multiplier must be a positive number",
                ));
            }
        }

        let segment = self.report.visualizer_segment_mm;
        if !(segment.is_finite() && segment > 0.0) {
            return Err(KitError::invalid_input(
                "report.visualizer_segment_mm",
                segment.to_string(),
                "Visualizer segment must be positive",
            ));
        }

        let threshold = self.report.gap_alert_threshold_mm;
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(KitError::invalid_input(
                "report.gap_alert_threshold_mm",
                threshold.to_string(),
                "Gap alert threshold must be zero or more",
            ));
        }
        Ok(())
    }
}

/// Fixed-size formwork panels available for kitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelCatalog {
    /// Primary (standard) panel width in mm
    pub primary_width_mm: f64,

    /// Secondary (filler) panel width in mm
    pub secondary_width_mm: f64,

    /// Panel height in mm; one layer of panels is this tall
    pub panel_height_mm: f64,

    /// Pins (and wedges) required per placed panel
    pub fasteners_per_panel: u64,
}

impl Default for PanelCatalog {
    fn default() -> Self {
        PanelCatalog {
            primary_width_mm: 600.0,
            secondary_width_mm: 300.0,
            panel_height_mm: 1200.0,
            fasteners_per_panel: 4,
        }
    }
}

impl PanelCatalog {
    /// Nominal size label for the primary panel, e.g. "600x1200"
    pub fn primary_size_label(&self) -> String {
        format!("{:.0}x{:.0}", self.primary_width_mm, self.panel_height_mm)
    }

    /// Nominal size label for the secondary panel, e.g. "300x1200"
    pub fn secondary_size_label(&self) -> String {
        format!("{:.0}x{:.0}", self.secondary_width_mm, self.panel_height_mm)
    }
}

/// Multipliers modelling how a site estimator over-orders by hand.
///
/// These have no derivation beyond matching typical manual orders; they are
/// kept as named values so they can be tuned per site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualHeuristics {
    /// Over-ordering applied to the primary panel count
    pub inflation_factor: f64,

    /// Secondary panels ordered as a fraction of manual primary panels
    pub secondary_ratio: f64,

    /// Fastener wastage applied to the optimized fastener count
    pub fastener_wastage: f64,
}

impl Default for ManualHeuristics {
    fn default() -> Self {
        ManualHeuristics {
            inflation_factor: 1.15,
            secondary_ratio: 0.1,
            fastener_wastage: 1.4,
        }
    }
}

/// Floor area covered by one slab shoring prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoringRates {
    /// Coverage assumed by a manual estimate (m² per prop)
    pub manual_area_per_prop_m2: f64,

    /// Coverage achieved by an optimized layout (m² per prop)
    pub optimized_area_per_prop_m2: f64,
}

impl Default for ShoringRates {
    fn default() -> Self {
        ShoringRates {
            manual_area_per_prop_m2: 1.5,
            optimized_area_per_prop_m2: 1.8,
        }
    }
}

/// Thresholds and labels for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// A residual gap larger than this raises a gap alert (mm)
    pub gap_alert_threshold_mm: f64,

    /// Longest wall segment drawn by the visualizer (mm)
    pub visualizer_segment_mm: f64,

    /// Company name printed on the PDF executive report
    pub company_name: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            gap_alert_threshold_mm: 50.0,
            visualizer_segment_mm: 12000.0,
            company_name: "Kitting Estimator".to_string(),
        }
    }
}
