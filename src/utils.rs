//! Utility functions for the annotator application.

/// Parse a hex color string (e.g., "#ff0000") to RGB components
pub fn parse_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    } else {
        None
    }
}

/// Split `items` into rows of at most `per_row` entries (at least one per row).
pub fn rows<T>(items: &[T], per_row: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(per_row.max(1))
}
