//! Plain-text rendering of reports for the terminal.

use kitting_core::readiness::TimelineEntry;
use kitting_core::{BoqTable, KittingReport};

const RULE: &str = "═══════════════════════════════════════════════════════════════════════════════════";

/// Layout summary block.
pub fn render_summary(report: &KittingReport) -> String {
    let layout = &report.quantities.layout;
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("  KITTING ESTIMATE: {}\n", report.title()));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("  Floor area:   {:.2} m²\n", report.request.area_m2));
    out.push_str(&format!("  Wall height:  {:.2} m\n", report.request.height_m));
    out.push_str(&format!("  Perimeter:    {:.0} mm\n", layout.perimeter_mm.0));
    out.push_str(&format!("  Layers:       {}\n", layout.layers));
    out.push_str(&format!(
        "  Per layer:    {} x primary, {} x secondary, gap {:.1} mm\n",
        layout.primary_per_layer, layout.secondary_per_layer, layout.gap_mm.0
    ));
    if let Some(alert) = &report.gap_alert {
        out.push_str(&format!("  [WARN] {}\n", alert.message()));
    }
    out
}

/// BoQ table with a savings column.
pub fn render_boq_table(table: &BoqTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<11} {:<26} {:<12} {:>8} {:>10} {:>18}\n",
        "ITEM CODE", "DESCRIPTION", "SIZE", "MANUAL", "OPTIMIZED", "SAVINGS"
    ));
    out.push_str(&format!("{}\n", "-".repeat(90)));

    if table.is_empty() {
        out.push_str("  (no matching lines)\n");
        return out;
    }

    for line in table.lines() {
        let savings = format!("{} ({:.1}%)", line.savings(), line.savings_percent());
        out.push_str(&format!(
            "{:<11} {:<26} {:<12} {:>8} {:>10} {:>18}\n",
            line.item_code, line.description, line.size, line.manual, line.optimized, savings
        ));
    }

    out.push_str(&format!("{}\n", "-".repeat(90)));
    out.push_str(&format!(
        "{:<51} {:>8} {:>10}\n",
        "TOTAL UNITS",
        table.total_manual(),
        table.total_optimized()
    ));
    out
}

/// Curing readiness timeline, one event per line.
pub fn render_timeline(entries: &[TimelineEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.render());
        out.push('\n');
        out.push_str(&format!("        {}\n", entry.event.description));
    }
    out
}
