#![forbid(unsafe_code)]

//! Tunables for the beams effect and the typewriter ticker.
//!
//! Both configs are plain data. Override single fields with struct-update
//! syntax:
//!
//! ```
//! use glint_fx::config::BeamsConfig;
//!
//! let cfg = BeamsConfig {
//!     hold_frames: 40,
//!     ..BeamsConfig::default()
//! };
//! assert_eq!(cfg.final_wipe_speed, 3);
//! ```
//!
//! Nothing here is ever rejected. [`BeamsConfig::normalized`] clamps
//! degenerate values (zero frame rates, empty symbol sets, inverted ranges)
//! into something the state machine can run.

use std::time::Duration;

use glint_style::{Gradient, Rgb};

/// Glyphs drawn at the head and trail of a row beam.
pub const DEFAULT_ROW_SYMBOLS: [char; 3] = ['▂', '▁', '_'];
/// Glyphs drawn at the head and trail of a column beam.
pub const DEFAULT_COLUMN_SYMBOLS: [char; 4] = ['▌', '▍', '▎', '▏'];

/// Configuration for [`crate::beams::BeamsEffect`].
#[derive(Debug, Clone, PartialEq)]
pub struct BeamsConfig {
    /// Head-to-tail glyphs for row beams.
    pub row_symbols: Vec<char>,
    /// Head-to-tail glyphs for column beams.
    pub column_symbols: Vec<char>,
    /// Ticks to wait after a burst of beam activations.
    pub beam_delay: u32,
    /// Half-open range `[lo, hi)` of row speeds, in tenths of a character per tick.
    pub row_speed_range: (u32, u32),
    /// Half-open range `[lo, hi)` of column speeds, in tenths of a character per tick.
    pub column_speed_range: (u32, u32),
    /// Stops of the beam-illumination gradient.
    pub beam_gradient_stops: Vec<Rgb>,
    /// Requested length of the beam gradient.
    pub beam_gradient_steps: usize,
    /// Ticks spent on each beam gradient color.
    pub beam_gradient_frames: usize,
    /// Stops of the final brighten gradient.
    pub final_gradient_stops: Vec<Rgb>,
    /// Requested length of the brighten gradient.
    pub final_gradient_steps: usize,
    /// Ticks spent on each brighten gradient color.
    pub final_gradient_frames: usize,
    /// Diagonal buckets revealed per tick during the final wipe.
    pub final_wipe_speed: usize,
    /// Steps of the fade-to-dark gradient that follows a beam.
    pub fade_steps: usize,
    /// Ticks to hold the finished text before restarting.
    pub hold_frames: u32,
    /// Upper bound (inclusive) of beam activations per burst.
    pub max_activations_per_burst: u32,
    /// Canvas background painted under every cell.
    pub background: Rgb,
}

impl Default for BeamsConfig {
    fn default() -> Self {
        Self {
            row_symbols: DEFAULT_ROW_SYMBOLS.to_vec(),
            column_symbols: DEFAULT_COLUMN_SYMBOLS.to_vec(),
            beam_delay: 2,
            row_speed_range: (8, 32),
            column_speed_range: (6, 12),
            beam_gradient_stops: vec![
                Rgb::gray(0x66),
                Rgb::gray(0x99),
                Rgb::gray(0xcc),
                Rgb::gray(0xff),
            ],
            beam_gradient_steps: 5,
            beam_gradient_frames: 1,
            final_gradient_stops: vec![Rgb::gray(0x99), Rgb::gray(0xcc), Rgb::gray(0xff)],
            final_gradient_steps: 8,
            final_gradient_frames: 1,
            final_wipe_speed: 3,
            fade_steps: 5,
            // ~6s at 20 ticks per second.
            hold_frames: 120,
            max_activations_per_burst: 5,
            background: Rgb::gray(0x1a),
        }
    }
}

impl BeamsConfig {
    /// Clamp degenerate values into a runnable configuration.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.row_symbols.is_empty() {
            self.row_symbols = DEFAULT_ROW_SYMBOLS.to_vec();
        }
        if self.column_symbols.is_empty() {
            self.column_symbols = DEFAULT_COLUMN_SYMBOLS.to_vec();
        }
        // A zero speed would never finish its sweep.
        self.row_speed_range.0 = self.row_speed_range.0.max(1);
        self.column_speed_range.0 = self.column_speed_range.0.max(1);
        self.beam_gradient_frames = self.beam_gradient_frames.max(1);
        self.final_gradient_frames = self.final_gradient_frames.max(1);
        self.max_activations_per_burst = self.max_activations_per_burst.max(1);
        self.final_wipe_speed = self.final_wipe_speed.max(1);
        self
    }

    /// Gradient a beam-lit character walks through.
    #[must_use]
    pub fn beam_gradient(&self) -> Gradient {
        Gradient::build(&self.beam_gradient_stops, self.beam_gradient_steps)
    }

    /// Gradient of the final brighten pass.
    #[must_use]
    pub fn final_gradient(&self) -> Gradient {
        Gradient::build(&self.final_gradient_stops, self.final_gradient_steps)
    }
}

/// Configuration for [`crate::ticker::TypewriterTicker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    /// Delay between two revealed characters.
    pub char_delay: Duration,
    /// Pause after a message is fully typed.
    pub message_delay: Duration,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(50),
            message_delay: Duration::from_secs(2),
        }
    }
}
