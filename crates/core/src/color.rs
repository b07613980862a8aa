//! Background color normalization and light/dark contrast selection.

/// Background used when the document gives none or an invalid one.
pub const DEFAULT_BACKGROUND: &str = "FFFFFF";

const DARK_TEXT: &str = "111827";
const LIGHT_TEXT: &str = "F9FAFB";
const DARK_SUBTEXT: &str = "6B7280";
const LIGHT_SUBTEXT: &str = "D1D5DB";

/// Normalize a color to six uppercase hex digits.
///
/// Accepts `#RGB`, `RGB`, `#RRGGBB` or `RRGGBB` in any case. Anything else,
/// including a missing value, returns `fallback` unchanged.
pub fn normalize_color(value: Option<&str>, fallback: &str) -> String {
    let Some(value) = value else {
        return fallback.to_string();
    };

    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex).to_ascii_uppercase();
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return fallback.to_string();
    }

    match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex,
        _ => fallback.to_string(),
    }
}

/// Check whether a 6-digit hex color is perceptually dark.
///
/// Uses `L = (0.299 R + 0.587 G + 0.114 B) / 255` and calls anything below
/// 0.5 dark. Malformed input counts as light.
pub fn is_dark(hex: &str) -> bool {
    let Some((red, green, blue)) = decode_rgb(hex) else {
        return false;
    };
    let luminance = (0.299 * f64::from(red) + 0.587 * f64::from(green) + 0.114 * f64::from(blue)) / 255.0;
    luminance < 0.5
}

fn decode_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Text colors chosen to contrast with a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Title, bullet and body text.
    pub text: &'static str,
    /// Header, footer and page number text.
    pub sub_text: &'static str,
}

impl Palette {
    /// Light text on dark backgrounds, dark text on light ones.
    pub fn for_background(hex: &str) -> Self {
        if is_dark(hex) {
            Self {
                text: LIGHT_TEXT,
                sub_text: LIGHT_SUBTEXT,
            }
        } else {
            Self {
                text: DARK_TEXT,
                sub_text: DARK_SUBTEXT,
            }
        }
    }
}
