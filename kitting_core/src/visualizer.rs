//! # Panel Visualizer
//!
//! Lays out one representative wall segment per panel layer so the greedy
//! fill can be drawn. Long walls are capped at a fixed segment length to
//! keep the drawing readable; every layer uses the same fill.

use serde::{Deserialize, Serialize};

use crate::calculations::{fill_row, LayoutResult, RowFill};
use crate::settings::KittingSettings;
use crate::units::Millimeters;

/// A panel in a visualized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    Primary,
    Secondary,
}

/// One layer of the visualized segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    /// Layer number, 1 at the bottom
    pub layer: u64,

    /// Panels left to right
    pub panels: Vec<PanelKind>,
}

/// Drawing plan for a wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDiagram {
    /// Length of wall drawn (mm)
    pub segment_mm: Millimeters,

    /// Fill applied to each row
    pub fill: RowFill,

    /// Rows from the top layer down
    pub rows: Vec<PanelRow>,
}

impl PanelDiagram {
    /// Build the diagram for a layout.
    ///
    /// Layer rows are capped at `max_rows`; a building with more layers
    /// draws only its top `max_rows`.
    pub fn from_layout(layout: &LayoutResult, settings: &KittingSettings, max_rows: usize) -> Self {
        let segment = layout
            .perimeter_mm
            .min(Millimeters(settings.report.visualizer_segment_mm));
        let fill = fill_row(segment, &settings.panels);

        let row_panels: Vec<PanelKind> = std::iter::repeat(PanelKind::Primary)
            .take(fill.primary as usize)
            .chain(std::iter::repeat(PanelKind::Secondary).take(fill.secondary as usize))
            .collect();

        let rows = (1..=layout.layers)
            .rev()
            .take(max_rows)
            .map(|layer| PanelRow {
                layer,
                panels: row_panels.clone(),
            })
            .collect();

        PanelDiagram {
            segment_mm: segment,
            fill,
            rows,
        }
    }

    /// Plain-text drawing: `[60]` for primary panels, `[30]` for secondary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&format!("L{:<3}", row.layer));
            for panel in &row.panels {
                out.push_str(match panel {
                    PanelKind::Primary => "[60]",
                    PanelKind::Secondary => "[30]",
                });
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "segment {:.0} mm: {} x primary, {} x secondary, gap {:.1} mm\n",
            self.segment_mm.0, self.fill.primary, self.fill.secondary, self.fill.gap_mm.0
        ));
        out
    }
}
