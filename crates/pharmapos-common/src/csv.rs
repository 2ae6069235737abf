//! CSV export helper for the inventory and sales report screens.
//!
//! The backend has no export endpoint; reports are assembled client-side
//! from the rows already on screen.

/// Escape a single CSV cell. Cells containing a quote, comma, or newline are
/// wrapped in quotes with embedded quotes doubled.
fn escape_cell(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Build a CSV document from a header row and data rows.
pub fn build_csv<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_cell(h.as_ref()))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.iter()
                .map(|cell| escape_cell(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}
