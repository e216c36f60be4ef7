//! RGB triple with canonical hex formatting and HSL conversion.
//!
//! [`Rgb`] is the value every resolution strategy produces. Components are
//! `u8`, so a constructed value is always in range; the fallible paths
//! (scaled floats, HSL outputs, brightness adjustment) clamp by rounding
//! before construction.

use std::fmt;

/// An opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Builds a color from arbitrary float components, rounding and
    /// clamping each into [0,255].
    pub fn from_clamped(r: f64, g: f64, b: f64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Canonical hex form: `#` followed by 6 uppercase hex digits.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Strict 6-digit hex parser (`#` optional). The inverse of
    /// [`Rgb::to_hex`] for every representable color.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let chars: Vec<char> = digits.chars().collect();
        Some(Self::new(
            hex_pair(chars[0], chars[1])?,
            hex_pair(chars[2], chars[3])?,
            hex_pair(chars[4], chars[5])?,
        ))
    }

    /// Converts HSL to RGB using the standard hue/saturation/lightness
    /// transform. Hue is in degrees and wraps; saturation and lightness are
    /// fractions. Outputs are rounded and clamped.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        if s == 0.0 {
            let gray = l * 255.0;
            return Self::from_clamped(gray, gray, gray);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::from_clamped(
            hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_rgb(p, q, h) * 255.0,
            hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0,
        )
    }

    /// Converts to HSL. Hue is in degrees, saturation and lightness are
    /// fractions in [0,1].
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let mut h = if max == r {
            (g - b) / d + (if g < b { 6.0 } else { 0.0 })
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h /= 6.0;
        (h * 360.0, s, l)
    }

    /// Multiplies each channel by `factor` and clamps (1.2 lightens,
    /// 0.8 darkens).
    pub fn adjust_brightness(self, factor: f64) -> Self {
        Self::from_clamped(
            self.r as f64 * factor,
            self.g as f64 * factor,
            self.b as f64 * factor,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Rounds and clamps a float channel value into [0,255].
pub(crate) fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn hex_digit(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='f' => Some(c as u8 - b'a' + 10),
        'A'..='F' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

fn hex_pair(high: char, low: char) -> Option<u8> {
    Some(hex_digit(high)? * 16 + hex_digit(low)?)
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}
