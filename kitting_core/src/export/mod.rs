//! # Report Export
//!
//! Writes a [`KittingReport`](crate::report::KittingReport) out as a CSV
//! datagrid or a PDF executive report. Renderers return bytes; [`write_atomic`]
//! puts them on disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kitting_core::calculations::LayoutRequest;
//! use kitting_core::export::{csv::render_csv, write_atomic};
//! use kitting_core::report::KittingReport;
//! use kitting_core::settings::KittingSettings;
//! use std::path::Path;
//!
//! let report = KittingReport::generate(LayoutRequest::new(64.0, 2.4), &KittingSettings::default())?;
//! let bytes = render_csv(&report.boq)?;
//! write_atomic(Path::new("boq.csv"), &bytes)?;
//! # Ok::<(), kitting_core::errors::KitError>(())
//! ```

pub mod csv;
pub mod pdf;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::{KitError, KitResult};

/// Write `bytes` to `path` with atomic write semantics.
///
/// 1. Write to a sibling `.tmp` file
/// 2. Sync to disk
/// 3. Rename over the destination
///
/// An interrupted export never leaves a half-written file at `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> KitResult<()> {
    let tmp_path = match path.extension() {
        Some(ext) => path.with_extension(format!("{}.tmp", ext.to_string_lossy())),
        None => path.with_extension("tmp"),
    };

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        KitError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        KitError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        KitError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        KitError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_atomic(&path, b"a,b\n1,2\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
        assert!(!dir.path().join("out.csv.tmp").exists());

        // Overwrites existing file
        write_atomic(&path, b"x\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");
        let err = write_atomic(&path, b"%PDF").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
