#![forbid(unsafe_code)]

//! Single-line typewriter status ticker.
//!
//! Types a message one character per [`TickerConfig::char_delay`], shows the
//! finished message for [`TickerConfig::message_delay`], then moves on to the
//! next one, wrapping at the end of the list.
//!
//! Time is passed in explicitly through [`TypewriterTicker::update_at`];
//! [`TypewriterTicker::update`] is a thin wrapper over the current instant.
//! Lengths are counted in chars, not display columns.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::trace;
use web_time::Instant;

use crate::config::TickerConfig;

/// Glyph drawn after the typed prefix.
pub const CURSOR: char = '█';

/// Messages used by [`TypewriterTicker::new`].
pub const DEFAULT_MESSAGES: [&str; 4] = [
    "Sweeping beams across the canvas...",
    "Every glyph gets its moment in the light",
    "Diagonal wipe incoming",
    "Press q to quit",
];

/// Rotating typewriter line.
#[derive(Debug, Clone)]
pub struct TypewriterTicker {
    messages: Vec<Vec<char>>,
    message_index: usize,
    char_index: usize,
    config: TickerConfig,
    last_update: Instant,
    paused: bool,
    pause_until: Instant,
}

impl Default for TypewriterTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypewriterTicker {
    /// Default messages in a random order, starting now.
    #[must_use]
    pub fn new() -> Self {
        let mut messages = DEFAULT_MESSAGES.to_vec();
        messages.shuffle(&mut StdRng::from_os_rng());
        Self::with_messages(messages, TickerConfig::default(), Instant::now())
    }

    /// Default messages shuffled by a fixed seed, starting now.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut messages = DEFAULT_MESSAGES.to_vec();
        messages.shuffle(&mut StdRng::seed_from_u64(seed));
        Self::with_messages(messages, TickerConfig::default(), Instant::now())
    }

    /// Explicit messages, kept in the given order.
    #[must_use]
    pub fn with_messages<I, S>(messages: I, config: TickerConfig, start: Instant) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(|m| m.as_ref().chars().collect())
                .collect(),
            message_index: 0,
            char_index: 0,
            config,
            last_update: start,
            paused: false,
            pause_until: start,
        }
    }

    /// Advance using the current instant.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advance as if the clock read `now`.
    pub fn update_at(&mut self, now: Instant) {
        let Some(current) = self.messages.get(self.message_index) else {
            return;
        };

        if self.paused {
            if now < self.pause_until {
                return;
            }
            self.message_index = (self.message_index + 1) % self.messages.len();
            self.char_index = 0;
            self.paused = false;
            self.last_update = now;
            trace!(message = self.message_index, "ticker next message");
            return;
        }

        if now.saturating_duration_since(self.last_update) < self.config.char_delay {
            return;
        }
        if self.char_index >= current.len() {
            self.paused = true;
            self.pause_until = now + self.config.message_delay;
        } else {
            self.char_index += 1;
        }
        self.last_update = now;
    }

    /// The line to display, centered in or truncated to `width` chars.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let Some(current) = self.messages.get(self.message_index) else {
            return " ".repeat(width);
        };

        let mut line: Vec<char> = if self.paused {
            current.clone()
        } else {
            let mut typed = current[..self.char_index].to_vec();
            typed.push(CURSOR);
            typed
        };

        if line.len() > width {
            line.truncate(width);
            return line.into_iter().collect();
        }
        let pad = width - line.len();
        let left = pad / 2;
        let mut out = String::with_capacity(width + line.len() * 3);
        out.extend(std::iter::repeat_n(' ', left));
        out.extend(line);
        out.extend(std::iter::repeat_n(' ', pad - left));
        out
    }

    /// Index of the message being typed or shown.
    #[must_use]
    pub fn message_index(&self) -> usize {
        self.message_index
    }

    /// Number of chars typed so far.
    #[must_use]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Whether the finished message is being held.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current message, if any.
    #[must_use]
    pub fn current_message(&self) -> Option<String> {
        self.messages
            .get(self.message_index)
            .map(|m| m.iter().collect())
    }

    /// Number of messages in rotation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
