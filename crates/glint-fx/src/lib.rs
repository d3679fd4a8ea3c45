//! Frame-driven text effects for character-cell terminals.
//!
//! # Role in glint
//! `glint-fx` holds the animation engines. They own no terminal: callers
//! invoke `update()` once per tick and render whenever a frame is shown.
//!
//! # How it fits in the system
//! Colors and gradients come from `glint-style`. Escape encoding is left to
//! `crossterm::style`. The `glint-demo` binary drives both engines in a
//! real terminal.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`beams`] | Beams reveal effect and its phase orchestration |
//! | [`config`] | Tunables for both engines |
//! | [`groups`] | Row, column and diagonal groups |
//! | [`layout`] | Centered placement of a text block |
//! | [`phase`] | Phase enum and transition table |
//! | [`render`] | Cell frames and colorized output |
//! | [`scene`] | Per-character animation sub-state |
//! | [`ticker`] | Typewriter status line |

#![forbid(unsafe_code)]

pub mod beams;
pub mod config;
pub mod groups;
pub mod layout;
pub mod phase;
pub mod render;
pub mod scene;
pub mod ticker;

pub use beams::BeamsEffect;
pub use config::{BeamsConfig, TickerConfig};
pub use phase::Phase;
pub use render::{Cell, Frame};
pub use scene::{Character, Scene};
pub use ticker::TypewriterTicker;
