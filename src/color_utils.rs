// File: ./src/color_utils.rs

// Shared palette for charts and status text.
// This file intentionally has NO dependencies on ratatui so it can be used
// from non-UI code (chart shaping, tests, headless output).

pub const PRIMARY: &str = "#007AFF";
pub const TEXT: &str = "#333333";
pub const MUTED: &str = "#666666";
pub const ERROR: &str = "#FF3B30";
pub const SUCCESS: &str = "#34C759";
pub const WARNING: &str = "#FF9500";
pub const OVERDUE: &str = "#FF3B30";

/// Parse a hex color string like "#RRGGBB" or "RRGGBB" into u8 tuple.
pub fn parse_hex_to_u8(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_parses() {
        assert_eq!(parse_hex_to_u8(PRIMARY), Some((0x00, 0x7A, 0xFF)));
        assert_eq!(parse_hex_to_u8("34C759"), Some((0x34, 0xC7, 0x59)));
        assert_eq!(parse_hex_to_u8("#12"), None);
        assert_eq!(parse_hex_to_u8("#zz0000"), None);
    }
}
