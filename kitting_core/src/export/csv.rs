//! # CSV Datagrid Export
//!
//! One header row plus one row per BoQ line, in table order:
//!
//! ```text
//! Item Code,Description,Size,Manual Estimate,AI Optimized,Net Savings (Units)
//! LT-FW-600,Standard Obs. Wall Panel,600x1200,123,106,17
//! ```

use crate::boq::BoqTable;
use crate::errors::{KitError, KitResult};

/// Column headers of the datagrid
pub const CSV_HEADERS: [&str; 6] = [
    "Item Code",
    "Description",
    "Size",
    "Manual Estimate",
    "AI Optimized",
    "Net Savings (Units)",
];

/// Render a BoQ table as CSV bytes.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - UTF-8 CSV
/// * `Err(KitError::ExportFailed)` - If the table has no lines
pub fn render_csv(table: &BoqTable) -> KitResult<Vec<u8>> {
    if table.is_empty() {
        return Err(KitError::export_failed("csv", "No BoQ lines to export"));
    }

    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| KitError::export_failed("csv", e.to_string()))?;

    for line in table.lines() {
        let manual = line.manual.to_string();
        let optimized = line.optimized.to_string();
        let savings = line.savings().to_string();
        writer
            .write_record([
                line.item_code.as_str(),
                line.description.as_str(),
                line.size.as_str(),
                manual.as_str(),
                optimized.as_str(),
                savings.as_str(),
            ])
            .map_err(|e| KitError::export_failed("csv", e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| KitError::export_failed("csv", e.to_string()))?;

    tracing::debug!(rows = table.len(), "rendered csv");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boq::BillOfQuantitiesLine;
    use crate::calculations::LayoutRequest;
    use crate::report::KittingReport;
    use crate::settings::KittingSettings;

    #[test]
    fn test_csv_layout() {
        let report =
            KittingReport::generate(LayoutRequest::new(64.0, 2.4), &KittingSettings::default())
                .unwrap();
        let text = String::from_utf8(render_csv(&report.boq).unwrap()).unwrap();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 6);
        assert_eq!(
            rows[0],
            "Item Code,Description,Size,Manual Estimate,AI Optimized,Net Savings (Units)"
        );
        assert_eq!(rows[1], "LT-FW-600,Standard Obs. Wall Panel,600x1200,123,106,17");
        assert_eq!(rows[3], "LT-AC-PIN,High-Tensile Pins,Standard,594,424,170");
        assert_eq!(rows[5], "LT-SP-100,Slab Shoring Prop,2.5m - 4.0m,43,36,7");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let table = BoqTable::new(vec![BillOfQuantitiesLine::new(
            "X-1",
            "Ties, snap",
            "Standard",
            10,
            8,
        )]);
        let text = String::from_utf8(render_csv(&table).unwrap()).unwrap();
        assert!(text.contains("X-1,\"Ties, snap\",Standard,10,8,2"));
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = render_csv(&BoqTable::default()).unwrap_err();
        assert_eq!(err.error_code(), "EXPORT_FAILED");
    }
}
