// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::get_headers;
use crate::export::{EventExport, notify_export_success};
use crate::ui::messages::info;
use crate::utils::format_elapsed;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with banded rows, a frozen header and auto-sized columns.
/// END_SET rows are highlighted so segments stand out.
pub(crate) fn export_xlsx(rows: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("events")?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }
    // Readable clock next to the raw milliseconds.
    worksheet.write_with_format(0, headers.len() as u16, "clock", &header_format)?;

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = headers
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .chain(std::iter::once("clock".len()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);
    let boundary = Color::RGB(0xFCE4D6);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, ev) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let bg = if ev.kind == crate::models::END_SET {
            boundary
        } else if row_index % 2 == 0 {
            band1
        } else {
            band2
        };

        let num_fmt = cell_format(bg).set_align(FormatAlign::Right);
        worksheet.write_with_format(row, 0, ev.time as f64, &num_fmt)?;

        let text_fmt = cell_format(bg);
        worksheet.write_with_format(row, 1, ev.kind.as_str(), &text_fmt)?;

        let clock = format_elapsed(ev.time);
        worksheet.write_with_format(row, 2, clock.as_str(), &num_fmt)?;

        track_width(&mut col_widths, 0, &ev.time.to_string());
        track_width(&mut col_widths, 1, &ev.kind);
        track_width(&mut col_widths, 2, &clock);
    }

    set_widths(worksheet, &col_widths)?;

    workbook.save(path)?;

    notify_export_success("XLSX", path, rows.len());
    Ok(())
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn track_width(widths: &mut [usize], col: usize, value: &str) {
    widths[col] = widths[col].max(UnicodeWidthStr::width(value));
}

fn set_widths(worksheet: &mut Worksheet, widths: &[usize]) -> AppResult<()> {
    for (c, w) in widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(AppError::from)?;
    }
    Ok(())
}
