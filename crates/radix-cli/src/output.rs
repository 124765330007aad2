//! Plain-text rendering helpers for terminal output.

use unicode_width::UnicodeWidthStr;

use radix_core::table::CharTable;

/// Right-pad `s` to `width` terminal columns. CJK glyphs count as two.
pub fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    let mut out = String::with_capacity(s.len() + width.saturating_sub(w));
    out.push_str(s);
    for _ in w..width {
        out.push(' ');
    }
    out
}

/// `c (n strokes)`, or `c (unknown strokes)`.
pub fn with_strokes(table: &CharTable, c: char) -> String {
    match table.stroke_count(c) {
        Some(n) => format!("{c} ({n} strokes)"),
        None => format!("{c} (unknown strokes)"),
    }
}

/// Lay out `items` in rows of `per_row`, each cell padded to the widest item.
pub fn columns(items: &[String], per_row: usize) -> String {
    let width = items
        .iter()
        .map(|s| UnicodeWidthStr::width(s.as_str()))
        .max()
        .unwrap_or(0)
        + 2;
    items
        .chunks(per_row.max(1))
        .map(|row| {
            let line: String = row.iter().map(|s| pad(s, width)).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
