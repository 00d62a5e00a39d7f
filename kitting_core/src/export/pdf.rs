//! # PDF Executive Report
//!
//! Renders a kitting report to PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Report data is injected by placeholder replacement before compilation
//! - Fonts come from `typst-assets`, loaded once per process
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use kitting_core::calculations::LayoutRequest;
//! use kitting_core::export::pdf::render_report_pdf;
//! use kitting_core::report::KittingReport;
//! use kitting_core::settings::KittingSettings;
//!
//! let settings = KittingSettings::default();
//! let report = KittingReport::generate(LayoutRequest::new(64.0, 2.4), &settings).unwrap();
//! let pdf_bytes = render_report_pdf(&report, &settings).unwrap();
//! std::fs::write("kitting_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::boq::BoqTable;
use crate::errors::{KitError, KitResult};
use crate::report::KittingReport;
use crate::settings::KittingSettings;

// ============================================================================
// Typst World Implementation
// ============================================================================

static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
        .collect()
});

/// A minimal Typst world for compiling one in-memory document.
struct ReportWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl ReportWorld {
    fn new(source: String) -> Self {
        ReportWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Template
// ============================================================================

const REPORT_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 1.5cm, right: 1.5cm),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 8pt, fill: gray)[Report {{REPORT_ID}}]],
      align(right)[#text(size: 8pt)[Page #counter(page).display()]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt)

#block(width: 100%, fill: rgb("#0b0e14"), inset: 14pt, radius: 4pt)[
  #text(size: 20pt, weight: "bold", fill: rgb("#ffd700"))[{{COMPANY}}]
  #v(2pt)
  #text(size: 13pt, fill: white)[EXECUTIVE BOQ ANALYSIS]
  #v(2pt)
  #text(size: 9pt, fill: rgb("#96a3af"))[DATE GENERATED: {{DATE}}]
]

#line(length: 100%, stroke: 0.8pt + rgb("#ffd700"))
#v(8pt)

== {{TITLE}}

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [Floor Area], [{{AREA}}], [m#super[2]],
  [Wall Height], [{{HEIGHT}}], [m],
  [Wall Perimeter], [{{PERIMETER}}], [mm],
  [Panel Layers], [{{LAYERS}}], [],
  [Residual Gap per Layer], [{{GAP}}], [mm],
)

{{GAP_ALERT}}

#v(10pt)

== Bill of Quantities

#table(
  columns: (auto, 1fr, auto, auto, auto, auto),
  inset: 6pt,
  stroke: 0.5pt + rgb("#323232"),
  fill: (_, y) => if y == 0 { rgb("#ffd700") } else if calc.odd(y) { rgb("#f4f5f7") } else { white },
  align: (left, left, left, right, right, right),
  table.header([*ITEM CODE*], [*DESCRIPTION*], [*SIZE (mm)*], [*MANUAL EST.*], [*AI OPTIMIZED*], [*DELTA SAVE*]),
{{BOQ_ROWS}}
)

#v(6pt)
#align(right)[
  #text(size: 9pt)[Total units: {{TOTAL_MANUAL}} manual vs {{TOTAL_OPTIMIZED}} optimized]
]

#v(18pt)
#text(size: 8pt, fill: gray)[
  Optimized quantities come from a greedy fill of the wall perimeter with
  {{PRIMARY_SIZE}} and {{SECONDARY_SIZE}} panels. Manual quantities apply fixed
  over-ordering factors and are shown for comparison only.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render a kitting report to PDF.
///
/// # Arguments
///
/// * `report` - The report to render
/// * `settings` - Settings used for the company name and panel labels
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(KitError::ExportFailed)` - If the report is empty or Typst fails
pub fn render_report_pdf(report: &KittingReport, settings: &KittingSettings) -> KitResult<Vec<u8>> {
    if report.boq.is_empty() {
        return Err(KitError::export_failed("pdf", "No BoQ lines to export"));
    }

    let source = build_source(report, settings);

    let world = ReportWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        KitError::export_failed(
            "pdf",
            format!("Typst compilation failed: {}", error_msgs.join("; ")),
        )
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        KitError::export_failed("pdf", format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })?;

    tracing::info!(report_id = %report.id, bytes = pdf_bytes.len(), "rendered pdf report");
    Ok(pdf_bytes)
}

/// Fill the template with report data.
///
/// User text is quoted with [`typst_string`] and placeholders are resolved
/// in a single pass, so a label such as `Core {{AREA}}` is printed as typed.
fn build_source(report: &KittingReport, settings: &KittingSettings) -> String {
    let layout = &report.quantities.layout;

    let gap_alert = match &report.gap_alert {
        Some(alert) => format!(
            "#block(width: 100%, fill: rgb(\"#fff3cd\"), inset: 8pt, radius: 3pt)[*Gap alert:* {}]",
            typst_string(&alert.message())
        ),
        None => String::new(),
    };

    fill_template(REPORT_TEMPLATE, |name| {
        let value = match name {
            "REPORT_ID" => report.id.to_string(),
            "COMPANY" => typst_string(&settings.report.company_name),
            "DATE" => report.generated_at.format("%Y-%m-%d").to_string(),
            "TITLE" => typst_string(&report.title()),
            "AREA" => format!("{:.2}", report.request.area_m2),
            "HEIGHT" => format!("{:.2}", report.request.height_m),
            "PERIMETER" => format!("{:.0}", layout.perimeter_mm.0),
            "LAYERS" => layout.layers.to_string(),
            "GAP" => format!("{:.1}", layout.gap_mm.0),
            "GAP_ALERT" => gap_alert.clone(),
            "BOQ_ROWS" => build_boq_rows(&report.boq),
            "TOTAL_MANUAL" => report.boq.total_manual().to_string(),
            "TOTAL_OPTIMIZED" => report.boq.total_optimized().to_string(),
            "PRIMARY_SIZE" => settings.panels.primary_size_label(),
            "SECONDARY_SIZE" => settings.panels.secondary_size_label(),
            _ => return None,
        };
        Some(value)
    })
}

/// Replace each `{{NAME}}` in `template` with `lookup(NAME)`.
///
/// Substituted values are copied straight to the output and never scanned
/// again. Names the lookup does not know are left in place.
fn fill_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => match lookup(&after[..end]) {
                Some(value) => {
                    out.push_str(&value);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            },
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Delta column text: savings read as a reduction, extra units as an increase.
fn delta_label(savings: i64) -> String {
    if savings >= 0 {
        format!("-{} units", savings)
    } else {
        format!("+{} units", savings.unsigned_abs())
    }
}

/// Build BoQ table rows
fn build_boq_rows(table: &BoqTable) -> String {
    table
        .lines()
        .iter()
        .map(|line| {
            format!(
                "  [{}], [{}], [{}], [{}], [{}], [{}],",
                typst_string(&line.item_code),
                typst_string(&line.description),
                typst_string(&line.size),
                line.manual,
                line.optimized,
                delta_label(line.savings()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote user-provided text as a Typst string literal (`#"..."`).
///
/// Inside a string literal markup, math and comment syntax (`*`, `$`, `//`,
/// `/*`) are plain characters; only `\` and `"` need escaping.
fn typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 3);
    out.push_str("#\"");
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
