//! Color tokens found in raw CSS text.
//!
//! Three lexical forms are recognized:
//!
//! - 6-digit hex: `#e1e4e8`
//! - 3-digit hex: `#fff`
//! - `rgba(r, g, b, a)` with numeric channels; the legacy three-argument
//!   `rgba(r, g, b)` is read as an opaque color
//!
//! # Scan Order
//!
//! Substitution rewrites the document with a case-insensitive global replace
//! per token, so the order in which tokens are produced matters: every
//! 6-digit hex (and `rgba()`) token is yielded before any 3-digit hex token.
//! By the time `#fff` is replaced, no `#ffffff` is left in the document for it
//! to bite into. [`scan_tokens`] guarantees this order; callers must replace
//! tokens in the order they are returned.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::colorspace::Rgb;
use crate::error::{RemapError, Result};

/// 6-digit hex and `rgba()` tokens. Scanned first.
static WIDE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)#[0-9a-f]{6}\b|rgba\([\s\d,.]+?\)").expect("static regex is valid")
});

/// 3-digit hex tokens. Scanned after [`WIDE_TOKEN`].
static NARROW_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#[0-9a-f]{3}\b").expect("static regex is valid"));

/// A color token parsed into RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedColor {
    /// The color channels.
    pub rgb: Rgb,
    /// The alpha expression, verbatim, for `rgba()` tokens.
    pub alpha: Option<String>,
}

impl ParsedColor {
    /// True if the token carried an alpha channel.
    pub fn is_alpha(&self) -> bool {
        self.alpha.is_some()
    }
}

/// Returns the unique color tokens in `css`, 6-digit hex and `rgba()` first,
/// then 3-digit hex. Within each pass tokens keep document order.
pub fn scan_tokens(css: &str) -> Vec<String> {
    let mut tokens = IndexSet::new();
    for m in WIDE_TOKEN.find_iter(css) {
        tokens.insert(m.as_str().to_string());
    }
    for m in NARROW_TOKEN.find_iter(css) {
        tokens.insert(m.as_str().to_string());
    }
    tokens.into_iter().collect()
}

/// Parses a color token (`#rgb`, `#rrggbb` or `rgba(r, g, b, a)`).
pub fn parse_color(token: &str) -> Result<ParsedColor> {
    let s = token.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(token, hex).map(|rgb| ParsedColor { rgb, alpha: None });
    }

    let lower = s.to_ascii_lowercase();
    if lower.starts_with("rgba(") && s.ends_with(')') {
        return parse_rgba(token, &s[5..s.len() - 1]);
    }

    Err(RemapError::invalid_color(token, "not a hex or rgba() color"))
}

/// Parses a hex color code (without the # prefix).
pub(crate) fn parse_hex(token: &str, hex: &str) -> Result<Rgb> {
    let invalid = || RemapError::invalid_color(token, "invalid hex digit");
    if !hex.is_ascii() {
        return Err(invalid());
    }
    match hex.len() {
        // 3-digit hex: #rgb -> #rrggbb
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).map_err(|_| invalid())? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).map_err(|_| invalid())? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).map_err(|_| invalid())? * 17;
            Ok(Rgb(r, g, b))
        }
        // 6-digit hex: #rrggbb
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
            let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
            let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
            Ok(Rgb(r, g, b))
        }
        _ => Err(RemapError::invalid_color(token, "must be 3 or 6 hex digits")),
    }
}

/// Parses the inside of `rgba(...)`. Three components mean no alpha.
fn parse_rgba(token: &str, inner: &str) -> Result<ParsedColor> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if !matches!(parts.len(), 3 | 4) {
        return Err(RemapError::invalid_color(
            token,
            format!("rgba() requires 3 or 4 components, got {}", parts.len()),
        ));
    }

    let mut channels = [0u8; 3];
    for (i, part) in parts[..3].iter().enumerate() {
        let value: f64 = part.parse().map_err(|_| {
            RemapError::invalid_color(token, format!("channel '{}' is not a number", part))
        })?;
        channels[i] = value.round().clamp(0.0, 255.0) as u8;
    }

    let alpha = match parts.get(3) {
        Some(alpha) if alpha.is_empty() => {
            return Err(RemapError::invalid_color(token, "missing alpha component"));
        }
        Some(alpha) => Some(alpha.to_string()),
        None => None,
    };

    Ok(ParsedColor {
        rgb: Rgb(channels[0], channels[1], channels[2]),
        alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Hex parsing
    // =========================================================================

    #[test]
    fn test_parse_hex_6() {
        let color = parse_color("#0366d6").unwrap();
        assert_eq!(color.rgb, Rgb(3, 102, 214));
        assert!(!color.is_alpha());
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_color("#fff").unwrap().rgb, Rgb(255, 255, 255));
        assert_eq!(parse_color("#400").unwrap().rgb, Rgb(68, 0, 0));
    }

    #[test]
    fn test_parse_hex_uppercase() {
        assert_eq!(parse_color("#E1E4E8").unwrap().rgb, Rgb(225, 228, 232));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(parse_color("#ggg").is_err());
        assert!(parse_color("#ffff").is_err());
        assert!(parse_color("#").is_err());
    }

    // =========================================================================
    // rgba parsing
    // =========================================================================

    #[test]
    fn test_parse_rgba() {
        let color = parse_color("rgba(27, 31, 35, 0.15)").unwrap();
        assert_eq!(color.rgb, Rgb(27, 31, 35));
        assert_eq!(color.alpha.as_deref(), Some("0.15"));
    }

    #[test]
    fn test_parse_rgba_compact() {
        let color = parse_color("rgba(0,0,0,.5)").unwrap();
        assert_eq!(color.rgb, Rgb(0, 0, 0));
        assert_eq!(color.alpha.as_deref(), Some(".5"));
    }

    #[test]
    fn test_parse_rgba_three_components_is_opaque() {
        let color = parse_color("rgba(0, 0, 0)").unwrap();
        assert_eq!(color.rgb, Rgb(0, 0, 0));
        assert!(!color.is_alpha());
    }

    #[test]
    fn test_parse_rgba_wrong_arity() {
        let err = parse_color("rgba(1, 2)").unwrap_err();
        assert!(matches!(err, RemapError::InvalidColor { .. }));
        assert!(parse_color("rgba(1, 2, 3, 4, 5)").is_err());
    }

    #[test]
    fn test_parse_rgba_bad_channel() {
        assert!(parse_color("rgba(1.2.3, 2, 3, 1)").is_err());
        assert!(parse_color("rgba(1, 2, 3, )").is_err());
    }

    #[test]
    fn test_parse_unknown_form() {
        assert!(parse_color("red").is_err());
        assert!(parse_color("rgb(1, 2, 3)").is_err());
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    #[test]
    fn test_scan_orders_wide_before_narrow() {
        let css = "a { color: #fff; } b { color: #e1e4e8; } c { color: rgba(0, 0, 0, 0.1); }";
        assert_eq!(
            scan_tokens(css),
            vec!["#e1e4e8", "rgba(0, 0, 0, 0.1)", "#fff"]
        );
    }

    #[test]
    fn test_scan_does_not_split_six_digit_hex() {
        let css = "a { color: #e1e4e8; }";
        assert_eq!(scan_tokens(css), vec!["#e1e4e8"]);
    }

    #[test]
    fn test_scan_deduplicates() {
        let css = "a { color: #fff; } b { background-color: #fff; }";
        assert_eq!(scan_tokens(css), vec!["#fff"]);
    }

    #[test]
    fn test_scan_ignores_var_references() {
        let css = "a { color: var(--color-gray-11); }";
        assert!(scan_tokens(css).is_empty());
    }
}
