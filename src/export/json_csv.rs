// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::model::get_headers;
use crate::export::{EventExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Export JSON pretty-printed, same shape as the stored `events` value.
pub(crate) fn export_json(rows: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(rows)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path, rows.len());
    Ok(())
}

/// Export CSV to a file.
pub(crate) fn export_csv(rows: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let file = File::create(path)?;
    write_csv(rows, file)?;

    notify_export_success("CSV", path, rows.len());
    Ok(())
}

/// Header is always written, even for an empty log.
pub(crate) fn write_csv<W: io::Write>(rows: &[EventExport], out: W) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);

    wtr.write_record(get_headers())?;
    for item in rows {
        wtr.serialize(item)?;
    }

    wtr.flush()?;
    Ok(())
}
