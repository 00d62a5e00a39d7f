//! # kitting_core - Formwork Kitting Estimator
//!
//! `kitting_core` works out how many wall formwork panels, fasteners and
//! shoring props a pour needs, and compares that optimized order with a
//! typical manual estimate. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Explicit results**: A [`KittingReport`] is passed to whatever renders
//!   or exports it; nothing is held between requests
//! - **Named constants**: Every heuristic lives in [`KittingSettings`]
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use kitting_core::{KittingReport, KittingSettings, LayoutRequest};
//!
//! let settings = KittingSettings::default();
//! let report = KittingReport::generate(LayoutRequest::new(64.0, 2.4), &settings).unwrap();
//!
//! let layout = &report.quantities.layout;
//! assert_eq!(layout.perimeter_mm.0, 32000.0);
//! assert_eq!(layout.primary_total, 106);
//!
//! let json = report.to_json().unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Greedy panel layout, manual estimate, shoring
//! - [`boq`] - Bill of quantities lines, sorting and filtering
//! - [`report`] - The complete result of one estimate
//! - [`visualizer`] - Per-layer panel drawing plan
//! - [`readiness`] - Curing readiness curve and lifecycle timeline
//! - [`export`] - CSV and PDF output
//! - [`settings`] - Panel catalog and heuristic constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod boq;
pub mod calculations;
pub mod errors;
pub mod export;
pub mod readiness;
pub mod report;
pub mod settings;
pub mod units;
pub mod visualizer;

// Re-export commonly used types at crate root for convenience
pub use boq::{BillOfQuantitiesLine, BoqTable, SortDirection, SortKey, SortState};
pub use calculations::{compute_layout, LayoutRequest, LayoutResult};
pub use errors::{KitError, KitResult};
pub use report::KittingReport;
pub use settings::KittingSettings;
