//! Plain-text rendering of the projected view.

use std::fmt::Write as _;

use client_core::{
    view::{TableView, TABLE_HEADERS},
    StatusKind, ViewModel,
};

pub fn render_view(view: &ViewModel) -> String {
    let mut out = String::new();

    if let Some(banner) = &view.banner {
        let marker = match banner.kind {
            StatusKind::Success => "ok",
            StatusKind::Failure => "error",
        };
        let _ = writeln!(out, "[{marker}] {}", banner.text);
        out.push('\n');
    }

    if let Some(panel) = &view.search {
        let _ = writeln!(out, "Book {}", panel.search_id);
        for (label, value) in &panel.lines {
            let _ = writeln!(out, "  {label}: {value}");
        }
        out.push('\n');
    }

    match &view.table {
        TableView::Empty { text } => {
            let _ = writeln!(out, "{text}");
        }
        TableView::Rows(rows) => {
            // The actions column has no meaning on a terminal.
            let headers = &TABLE_HEADERS[..6];
            let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
            for row in rows {
                for (width, cell) in widths.iter_mut().zip(&row.cells) {
                    *width = (*width).max(cell.chars().count());
                }
            }
            write_row(&mut out, headers.iter().copied(), &widths);
            write_row(
                &mut out,
                widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().iter().map(String::as_str),
                &widths,
            );
            for row in rows {
                write_row(&mut out, row.cells.iter().map(String::as_str), &widths);
            }
        }
    }
    out
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}
