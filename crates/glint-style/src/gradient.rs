#![forbid(unsafe_code)]

//! Precomputed color gradients.
//!
//! A [`Gradient`] is an immutable, index-addressed run of colors computed
//! once and then consumed frame by frame. Clones share storage, so handing
//! the same gradient to hundreds of animated cells costs one allocation.
//!
//! # Step distribution
//!
//! [`Gradient::build`] spends `steps / (stops - 1)` colors on every segment
//! using integer division and then appends the last stop. When `steps` is not
//! a multiple of the segment count the remainder is dropped, so the result can
//! be shorter than `steps + 1`:
//!
//! | stops | steps | per segment | len |
//! |-------|-------|-------------|-----|
//! | 4     | 5     | 1           | 4   |
//! | 3     | 8     | 4           | 9   |
//! | 2     | 0     | 0           | 1   |

use std::ops::Deref;
use std::sync::Arc;

use crate::color::Rgb;

/// Fraction of each channel that a fade gradient decays to.
pub const FADE_FLOOR: f64 = 0.3;

/// Immutable sequence of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    colors: Arc<[Rgb]>,
}

impl Gradient {
    /// Wrap an explicit color list.
    #[must_use]
    pub fn from_colors(colors: Vec<Rgb>) -> Self {
        Self {
            colors: colors.into(),
        }
    }

    /// Interpolate between `stops` in RGB space.
    ///
    /// - 0 stops: a single opaque white.
    /// - 1 stop: that stop.
    /// - otherwise: `steps / (stops.len() - 1)` colors per segment, then the
    ///   final stop verbatim.
    #[must_use]
    pub fn build(stops: &[Rgb], steps: usize) -> Self {
        match stops {
            [] => Self::from_colors(vec![Rgb::WHITE]),
            [only] => Self::from_colors(vec![*only]),
            _ => {
                let per_segment = steps / (stops.len() - 1);
                let mut colors = Vec::with_capacity(per_segment * (stops.len() - 1) + 1);
                for pair in stops.windows(2) {
                    let (from, to) = (pair[0], pair[1]);
                    for j in 0..per_segment {
                        let t = j as f64 / per_segment as f64;
                        colors.push(from.lerp(to, t));
                    }
                }
                colors.push(stops[stops.len() - 1]);
                Self::from_colors(colors)
            }
        }
    }

    /// Build from textual stops; malformed entries become white.
    #[must_use]
    pub fn from_hex_stops<S: AsRef<str>>(stops: &[S], steps: usize) -> Self {
        let parsed: Vec<Rgb> = stops
            .iter()
            .map(|s| Rgb::parse_or_white(s.as_ref()))
            .collect();
        Self::build(&parsed, steps)
    }

    /// Decay from `start` toward [`FADE_FLOOR`] of its brightness.
    ///
    /// Produces `steps + 1` colors; the first is `start` and the last is
    /// `start` scaled by the floor. `steps == 0` yields `[start]`.
    #[must_use]
    pub fn fade(start: Rgb, steps: usize) -> Self {
        if steps == 0 {
            return Self::from_colors(vec![start]);
        }
        let target = start.scale(FADE_FLOOR);
        let colors = (0..=steps)
            .map(|i| start.lerp(target, i as f64 / steps as f64))
            .collect();
        Self::from_colors(colors)
    }

    /// Color at `index`, clamped to the last entry.
    #[must_use]
    pub fn at(&self, index: usize) -> Rgb {
        let last = self.colors.len().saturating_sub(1);
        self.colors.get(index.min(last)).copied().unwrap_or(Rgb::WHITE)
    }

    /// First color.
    #[must_use]
    pub fn first(&self) -> Rgb {
        self.at(0)
    }

    /// Last color.
    #[must_use]
    pub fn last(&self) -> Rgb {
        self.at(usize::MAX)
    }

    /// Borrow the colors.
    #[must_use]
    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Deref for Gradient {
    type Target = [Rgb];

    fn deref(&self) -> &Self::Target {
        &self.colors
    }
}
