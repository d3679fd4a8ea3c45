#![forbid(unsafe_code)]

//! Opaque RGB color type and hex conversions.
//!
//! Colors travel through the effect pipeline as [`Rgb`] values. Text form is
//! the familiar `#rrggbb`; parsing is lenient and never fails hard: callers
//! that accept user-supplied stops use [`Rgb::parse_or_white`] so malformed
//! input degrades to opaque white.

use std::fmt;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white. Also the fallback for unparseable stops.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray with all channels set to `v`.
    #[must_use]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Pack into a `u32` key (`0x00RRGGBB`).
    #[must_use]
    pub const fn as_key(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Parse a color, falling back to [`Rgb::WHITE`] on malformed input.
    #[must_use]
    pub fn parse_or_white(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::WHITE)
    }

    /// Linear blend toward `other`, truncating each channel.
    ///
    /// `t` is clamped to `[0, 1]`. Channels are computed as
    /// `a * (1 - t) + b * t` and truncated, so `t = 0` and `t = 1` reproduce
    /// the endpoints exactly.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t) as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Scale every channel by `factor` (clamped to `[0, 1]`), truncating.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let mul = |c: u8| (f64::from(c) * factor) as u8;
        Self::new(mul(self.r), mul(self.g), mul(self.b))
    }

    /// Format as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
