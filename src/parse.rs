//! Structured color format parsers.
//!
//! The formats are tried in a fixed priority order and the first whose
//! *shape* matches is used exclusively:
//!
//! 1. 3-digit hex (optional `#`), nibbles duplicated
//! 2. 6-digit hex (optional `#`)
//! 3. `rgb()` / `rgba()`
//! 4. `hsl()` / `hsla()`
//! 5. Plain numeric triple (`255, 0, 0` or `255 0 0`)
//!
//! A shape match with an invalid component is terminal: it never falls
//! through to the next format or to name resolution. Hex shapes require
//! all-hex digits, so short color names like `tan` or `salmon` are not
//! shape matches and flow on to the named-color pipeline.

use crate::color::{Rgb, clamp_channel};

/// Outcome of the structural pass over one input string.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Structured {
    /// No format's shape matched; name resolution may proceed.
    NoMatch,
    /// A shape matched and its components parsed.
    Parsed(Rgb),
    /// A shape matched but a component failed; terminal for this input.
    Malformed(String),
}

/// Runs the ordered structural parsers against `input`.
///
/// Matching is case-insensitive and ignores surrounding whitespace. The
/// input is the raw (not normalized) text, since normalization strips `%`.
pub(crate) fn parse_structured(input: &str) -> Structured {
    let lower = input.trim().to_lowercase();
    let s = lower.as_str();

    let bare = s.strip_prefix('#').unwrap_or(s);
    if bare.len() == 3 && bare.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Structured::Parsed(expand_short_hex(bare));
    }
    if bare.len() == 6 && bare.bytes().all(|b| b.is_ascii_hexdigit()) {
        match Rgb::parse_hex(bare) {
            Some(rgb) => return Structured::Parsed(rgb),
            None => return Structured::Malformed("invalid hex digits".into()),
        }
    }

    if let Some(body) = function_body(s, "rgb") {
        return parse_rgb_components(body);
    }
    if let Some(body) = function_body(s, "hsl") {
        return parse_hsl_components(body);
    }

    parse_plain_triple(s)
}

/// Duplicates each nibble: `f0a` becomes `#FF00AA`.
fn expand_short_hex(digits: &str) -> Rgb {
    let expand = |c: char| {
        let v = c.to_digit(16).unwrap_or(0) as u8;
        v * 16 + v
    };
    let mut chars = digits.chars();
    let r = chars.next().map(expand).unwrap_or(0);
    let g = chars.next().map(expand).unwrap_or(0);
    let b = chars.next().map(expand).unwrap_or(0);
    Rgb::new(r, g, b)
}

/// Extracts the parenthesized body of `name(...)` or `namea(...)` if the
/// input has that shape. Both parentheses are required for a shape match.
fn function_body<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(name)?;
    let rest = rest.strip_prefix('a').unwrap_or(rest);
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('(')?;
    let (body, _) = rest.split_once(')')?;
    Some(body)
}

fn parse_rgb_components(body: &str) -> Structured {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return Structured::Malformed(format!(
            "rgb() needs 3 components, got {}",
            parts.len()
        ));
    }

    // Exactly three leading components are consumed; a fourth (alpha) is
    // ignored.
    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts[..3]) {
        match parse_rgb_component(part) {
            Ok(v) => *slot = v,
            Err(reason) => return Structured::Malformed(reason),
        }
    }
    Structured::Parsed(Rgb::new(channels[0], channels[1], channels[2]))
}

/// A single rgb() component: integer/float 0-255 or percentage 0-100%,
/// out-of-range values clamped.
fn parse_rgb_component(token: &str) -> Result<u8, String> {
    if let Some(pct) = token.strip_suffix('%') {
        let value: f64 = pct
            .trim()
            .parse()
            .map_err(|_| format!("cannot parse {token:?} as a percentage"))?;
        return Ok(clamp_channel(value / 100.0 * 255.0));
    }
    let value: f64 = token
        .parse()
        .map_err(|_| format!("cannot parse {token:?} as a color component"))?;
    Ok(clamp_channel(value))
}

fn parse_hsl_components(body: &str) -> Structured {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return Structured::Malformed(format!(
            "hsl() needs 3 components, got {}",
            parts.len()
        ));
    }

    // Hue: bare number or with a `deg` suffix.
    let hue_token = parts[0].strip_suffix("deg").unwrap_or(parts[0]).trim();
    let hue: f64 = match hue_token.parse() {
        Ok(v) => v,
        Err(_) => {
            return Structured::Malformed(format!("cannot parse {:?} as a hue", parts[0]));
        }
    };

    let sat = match parse_fraction(parts[1]) {
        Ok(v) => v,
        Err(reason) => return Structured::Malformed(reason),
    };
    let light = match parse_fraction(parts[2]) {
        Ok(v) => v,
        Err(reason) => return Structured::Malformed(reason),
    };

    Structured::Parsed(Rgb::from_hsl(hue, sat, light))
}

/// Saturation/lightness: a fraction in [0,1] or a percentage.
fn parse_fraction(token: &str) -> Result<f64, String> {
    if let Some(pct) = token.strip_suffix('%') {
        let value: f64 = pct
            .trim()
            .parse()
            .map_err(|_| format!("cannot parse {token:?} as a percentage"))?;
        return Ok(value / 100.0);
    }
    token
        .parse()
        .map_err(|_| format!("cannot parse {token:?} as a fraction"))
}

/// Three integers separated by comma and/or whitespace. Each is clamped to
/// [0,255] independently; negative and oversized values clamp rather than
/// reject. Anything that is not exactly three integer tokens is not a shape
/// match.
fn parse_plain_triple(input: &str) -> Structured {
    let tokens: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != 3 || !tokens.iter().all(|t| is_integer(t)) {
        return Structured::NoMatch;
    }

    let mut channels = [0u8; 3];
    for (slot, token) in channels.iter_mut().zip(&tokens) {
        // The digit check above guarantees this parses.
        let value: f64 = token.parse().unwrap_or(0.0);
        *slot = clamp_channel(value);
    }
    Structured::Parsed(Rgb::new(channels[0], channels[1], channels[2]))
}

fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> Rgb {
        match parse_structured(input) {
            Structured::Parsed(rgb) => rgb,
            other => panic!("expected {input:?} to parse, got {other:?}"),
        }
    }

    // ==================== HEX ====================

    #[test]
    fn test_short_hex_duplicates_nibbles() {
        assert_eq!(parsed("f0a"), Rgb::new(255, 0, 170));
        assert_eq!(parsed("#f0a"), Rgb::new(255, 0, 170));
        assert_eq!(parsed("fff"), Rgb::white());
    }

    #[test]
    fn test_long_hex_with_and_without_prefix() {
        assert_eq!(parsed("#ff00aa"), Rgb::new(255, 0, 170));
        assert_eq!(parsed("FF00AA"), Rgb::new(255, 0, 170));
        assert_eq!(parsed("  #9932cc  "), Rgb::new(0x99, 0x32, 0xCC));
    }

    #[test]
    fn test_short_color_names_are_not_hex_shapes() {
        // 3- and 6-letter names must flow on to the named table.
        assert_eq!(parse_structured("tan"), Structured::NoMatch);
        assert_eq!(parse_structured("salmon"), Structured::NoMatch);
        assert_eq!(parse_structured("#zzz"), Structured::NoMatch);
    }

    // ==================== RGB FUNCTIONS ====================

    #[test]
    fn test_rgb_function() {
        assert_eq!(parsed("rgb(255, 0, 0)"), Rgb::new(255, 0, 0));
        assert_eq!(parsed("rgb(0,128,255)"), Rgb::new(0, 128, 255));
        assert_eq!(parsed("RGB(1, 2, 3)"), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_rgb_clamps_out_of_range() {
        assert_eq!(parsed("rgb(300, -10, 128)"), Rgb::new(255, 0, 128));
    }

    #[test]
    fn test_rgb_percentages() {
        assert_eq!(parsed("rgb(100%, 0%, 50%)"), Rgb::new(255, 0, 128));
        assert_eq!(parsed("rgb(150%, 0%, 0%)"), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_rgba_alpha_is_ignored() {
        assert_eq!(parsed("rgba(255, 0, 0, 0.5)"), Rgb::new(255, 0, 0));
        assert_eq!(parsed("rgb(1, 2, 3, 0.9)"), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_rgb_shape_errors_are_terminal() {
        assert!(matches!(
            parse_structured("rgb(255, 0)"),
            Structured::Malformed(_)
        ));
        assert!(matches!(
            parse_structured("rgb(red, 0, 0)"),
            Structured::Malformed(_)
        ));
    }

    // ==================== HSL FUNCTIONS ====================

    #[test]
    fn test_hsl_function() {
        assert_eq!(parsed("hsl(0, 100%, 50%)"), Rgb::new(255, 0, 0));
        assert_eq!(parsed("hsl(120, 100%, 50%)"), Rgb::new(0, 255, 0));
        assert_eq!(parsed("hsl(240,100%,50%)"), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_hsl_deg_suffix_and_fractions() {
        assert_eq!(parsed("hsl(120deg, 1, 0.5)"), Rgb::new(0, 255, 0));
        assert_eq!(parsed("hsla(0, 1.0, 0.5, 0.3)"), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hsl_shape_errors_are_terminal() {
        assert!(matches!(
            parse_structured("hsl(0, 100%)"),
            Structured::Malformed(_)
        ));
        assert!(matches!(
            parse_structured("hsl(zero, 100%, 50%)"),
            Structured::Malformed(_)
        ));
    }

    // ==================== PLAIN TRIPLES ====================

    #[test]
    fn test_plain_triple_comma_and_whitespace() {
        assert_eq!(parsed("255, 0, 0"), Rgb::new(255, 0, 0));
        assert_eq!(parsed("255 0 0"), Rgb::new(255, 0, 0));
        assert_eq!(parsed("12,34 56"), Rgb::new(12, 34, 56));
    }

    #[test]
    fn test_plain_triple_clamps_including_negatives() {
        assert_eq!(parsed("300, -10, 128"), Rgb::new(255, 0, 128));
        assert_eq!(parsed("9999 0 0"), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_non_triples_do_not_match() {
        assert_eq!(parse_structured("255, 0"), Structured::NoMatch);
        assert_eq!(parse_structured("255 0 0 0"), Structured::NoMatch);
        assert_eq!(parse_structured("red blue green"), Structured::NoMatch);
        assert_eq!(parse_structured("light blue"), Structured::NoMatch);
    }
}
