use ratatui::style::Color;
use rust_decimal::Decimal;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Parse a "#RRGGBB" category color token into a terminal color.
/// Returns None for anything that isn't a 6-digit hex string.
pub(crate) fn parse_hex_color(token: &str) -> Option<Color> {
    let hex = token.strip_prefix('#')?;
    // Byte length only equals digit count for ASCII input
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Normalize user month input to "YYYY-MM". Accepts "2024-01", "2024-1",
/// and bare "01"/"1" (resolved within the year of `current_month`).
pub(crate) fn normalize_month(input: &str, current_month: &str) -> Option<String> {
    let candidate = if input.len() <= 2 {
        let year = current_month.get(..4)?;
        format!("{year}-{input:0>2}")
    } else {
        input.to_string()
    };
    // Validate by parsing as an actual date, then format back so
    // non-zero-padded input comes out normalized
    let date = chrono::NaiveDate::parse_from_str(&format!("{candidate}-01"), "%Y-%m-%d").ok()?;
    Some(date.format("%Y-%m").to_string())
}

/// Shift a "YYYY-MM" month string by `delta` months.
pub(crate) fn shift_month(month: &str, delta: i32) -> Option<String> {
    let (year_str, month_str) = month.split_once('-')?;
    let year: i32 = year_str.parse().ok()?;
    let m: i32 = month_str.parse().ok()?;
    if !(1..=12).contains(&m) {
        return None;
    }
    let total = year * 12 + (m - 1) + delta;
    if total < 0 {
        return None;
    }
    Some(format!("{:04}-{:02}", total / 12, total % 12 + 1))
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}
