// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::events_to_rows;
use crate::export::xlsx::export_xlsx;
use crate::models::Event;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

/// High-level export of the event log.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `events` to `file` in the order given (the displayed order).
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute output path (`~/` is expanded)
    /// - `force`: overwrite without asking
    ///
    /// Returns the resolved output path.
    pub fn export(
        events: &[Event],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(&path, force)?;

        if events.is_empty() {
            warning("No events logged; exporting an empty table.");
        }

        let rows = events_to_rows(events);
        log::debug!("exporting {} rows as {}", rows.len(), format.as_str());

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &path)?,
        }

        Ok(path)
    }
}
