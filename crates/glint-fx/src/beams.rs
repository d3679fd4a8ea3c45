#![forbid(unsafe_code)]

//! The beams text-reveal effect.
//!
//! Light beams sweep the rows and columns of a text block, lighting each
//! character as they pass; a diagonal wipe then brightens everything from the
//! top-left corner, the finished text is held, and the cycle starts over.
//!
//! # Driving the effect
//!
//! ```
//! use glint_fx::beams::BeamsEffect;
//! use glint_fx::phase::Phase;
//!
//! let mut fx = BeamsEffect::with_seed(40, 5, "HELLO\nWORLD", 7);
//! assert_eq!(fx.phase(), Phase::Beams);
//! for _ in 0..30 {
//!     fx.update();
//! }
//! let frame = fx.render();
//! assert_eq!(frame.lines().count(), 5);
//! assert!(fx.characters().iter().any(|c| c.visible));
//! ```
//!
//! # Determinism
//!
//! Group order, reversal and speed are drawn from a per-instance
//! [`StdRng`] when the layout is built. Burst sizes during the beams phase
//! come from a second stream whose seed is also drawn at build time;
//! [`BeamsEffect::reset`] re-seeds that stream, so every cycle after a reset
//! replays the previous one exactly. [`BeamsEffect::resize`] rebuilds
//! everything and draws fresh randomness.
//!
//! # Concurrency
//!
//! All mutation goes through `&mut self` and rendering through `&self`. The
//! type is `Send`, but sharing one instance across threads requires external
//! synchronization around `update`, `reset` and `resize`.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::BeamsConfig;
use crate::groups::{
    BeamGroup, build_column_groups, build_diagonals, build_row_groups, shuffle_groups,
};
use crate::layout::place_text;
use crate::phase::{Phase, PhaseEvent};
use crate::render::Frame;
use crate::scene::{Character, Scene, SceneGradients, SceneTiming};

/// Frame-driven beams reveal of a text block.
#[derive(Debug, Clone)]
pub struct BeamsEffect {
    width: u16,
    height: u16,
    text: String,
    config: BeamsConfig,
    timing: SceneTiming,

    chars: Vec<Character>,
    row_groups: Vec<BeamGroup>,
    column_groups: Vec<BeamGroup>,
    diagonals: Vec<Vec<usize>>,

    phase: Phase,
    frame_count: u64,
    beam_delay_count: u32,
    next_diagonal: usize,
    hold_count: u32,

    rng: StdRng,
    activation_seed: u64,
    activation_rng: StdRng,
}

impl BeamsEffect {
    /// Create an effect with default settings and OS-seeded randomness.
    #[must_use]
    pub fn new(width: u16, height: u16, text: &str) -> Self {
        Self::with_config(width, height, text, BeamsConfig::default(), None)
    }

    /// Create an effect with default settings and a fixed seed.
    #[must_use]
    pub fn with_seed(width: u16, height: u16, text: &str, seed: u64) -> Self {
        Self::with_config(width, height, text, BeamsConfig::default(), Some(seed))
    }

    /// Create an effect with explicit settings.
    ///
    /// `seed = None` seeds from the operating system.
    #[must_use]
    pub fn with_config(
        width: u16,
        height: u16,
        text: &str,
        config: BeamsConfig,
        seed: Option<u64>,
    ) -> Self {
        let config = config.normalized();
        let timing = SceneTiming {
            beam_frames: config.beam_gradient_frames,
            brighten_frames: config.final_gradient_frames,
        };
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut fx = Self {
            width,
            height,
            text: text.to_owned(),
            config,
            timing,
            chars: Vec::new(),
            row_groups: Vec::new(),
            column_groups: Vec::new(),
            diagonals: Vec::new(),
            phase: Phase::Beams,
            frame_count: 0,
            beam_delay_count: 0,
            next_diagonal: 0,
            hold_count: 0,
            rng,
            // Drawn by `build`.
            activation_seed: 0,
            activation_rng: StdRng::seed_from_u64(0),
        };
        fx.build();
        fx
    }

    /// Lay out the text and build every group from scratch.
    fn build(&mut self) {
        let gradients = SceneGradients::new(
            self.config.beam_gradient(),
            self.config.final_gradient(),
            self.config.fade_steps,
        );
        self.chars = place_text(self.width, self.height, &self.text, &gradients);

        let row_symbols: Arc<[char]> = Arc::from(self.config.row_symbols.as_slice());
        let column_symbols: Arc<[char]> = Arc::from(self.config.column_symbols.as_slice());
        let rows = build_row_groups(
            &self.chars,
            self.config.row_speed_range,
            &row_symbols,
            &mut self.rng,
        );
        let columns = build_column_groups(
            &self.chars,
            self.config.column_speed_range,
            &column_symbols,
            &mut self.rng,
        );
        (self.row_groups, self.column_groups) = shuffle_groups(rows, columns, &mut self.rng);
        self.diagonals = build_diagonals(&self.chars);
        self.activation_seed = self.rng.random();

        debug!(
            width = self.width,
            height = self.height,
            characters = self.chars.len(),
            row_groups = self.row_groups.len(),
            column_groups = self.column_groups.len(),
            diagonals = self.diagonals.len(),
            "beams layout built"
        );

        self.reset();
    }

    /// Advance the effect by one tick.
    pub fn update(&mut self) {
        self.frame_count += 1;

        let event = match self.phase {
            Phase::Beams => self.update_beams(),
            Phase::FinalWipe => self.update_final_wipe(),
            Phase::Hold => self.update_hold(),
        };
        if let Some(event) = event {
            self.apply(event);
        }

        let timing = self.timing;
        for ch in &mut self.chars {
            ch.step(timing);
        }
    }

    fn apply(&mut self, event: PhaseEvent) {
        let from = self.phase;
        let Some(to) = from.on(event) else {
            debug!(phase = %from, ?event, "ignored phase event");
            return;
        };
        debug!(from = %from, to = %to, frame = self.frame_count, "phase transition");

        if from.is_restart(event) {
            self.reset();
            return;
        }
        self.phase = to;
        if to == Phase::Hold {
            self.hold_count = 0;
        }
    }

    fn update_beams(&mut self) -> Option<PhaseEvent> {
        if self.beam_delay_count > 0 {
            self.beam_delay_count -= 1;
            return None;
        }

        let budget = self
            .activation_rng
            .random_range(1..=self.config.max_activations_per_burst);
        let mut activated = 0usize;
        for _ in 0..budget {
            if let Some(group) = self.row_groups.iter_mut().find(|g| !g.is_started()) {
                activated += usize::from(group.activate());
            }
            if let Some(group) = self.column_groups.iter_mut().find(|g| !g.is_started()) {
                activated += usize::from(group.activate());
            }
        }
        if activated > 0 {
            trace!(budget, activated, frame = self.frame_count, "beam burst");
            self.beam_delay_count = self.config.beam_delay;
        }

        let mut any_active = false;
        for group in self.row_groups.iter_mut().chain(self.column_groups.iter_mut()) {
            any_active |= group.advance(&mut self.chars);
        }

        (!any_active).then_some(PhaseEvent::BeamsExhausted)
    }

    fn update_final_wipe(&mut self) -> Option<PhaseEvent> {
        for _ in 0..self.config.final_wipe_speed {
            let Some(bucket) = self.diagonals.get(self.next_diagonal) else {
                break;
            };
            for &i in bucket {
                let ch = &mut self.chars[i];
                ch.enter(Scene::Brighten);
                ch.symbol = ch.original;
            }
            self.next_diagonal += 1;
        }

        if self.next_diagonal < self.diagonals.len() {
            return None;
        }
        let timing = self.timing;
        self.chars
            .iter()
            .filter(|c| c.scene == Scene::Brighten)
            .all(|c| c.brighten_done(timing))
            .then_some(PhaseEvent::WipeComplete)
    }

    fn update_hold(&mut self) -> Option<PhaseEvent> {
        self.hold_count += 1;
        (self.hold_count >= self.config.hold_frames).then_some(PhaseEvent::HoldElapsed)
    }

    /// Restart the cycle without rebuilding groups.
    ///
    /// Characters go back to hidden and idle, groups are rewound, and the
    /// burst-size stream is re-seeded. Group order, reversal and speed are
    /// kept, so the next cycle replays the previous one.
    pub fn reset(&mut self) {
        self.phase = Phase::Beams;
        self.frame_count = 0;
        self.beam_delay_count = 0;
        self.next_diagonal = 0;
        self.hold_count = 0;

        for ch in &mut self.chars {
            ch.clear();
        }
        for group in self.row_groups.iter_mut().chain(self.column_groups.iter_mut()) {
            group.rewind();
        }
        self.activation_rng = StdRng::seed_from_u64(self.activation_seed);
        debug!("beams effect reset");
    }

    /// Rebuild for a new canvas size. In-flight animation is discarded.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "beams resize"
        );
        self.width = width;
        self.height = height;
        self.build();
    }

    /// Snapshot the canvas as cells.
    #[must_use]
    pub fn render_frame(&self) -> Frame {
        Frame::from_characters(self.width, self.height, self.config.background, &self.chars)
    }

    /// Render the canvas as colorized text, one line per row.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_frame().to_ansi_string()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks since the current cycle started.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Canvas width.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Effective (normalized) configuration.
    #[must_use]
    pub fn config(&self) -> &BeamsConfig {
        &self.config
    }

    /// Placed characters in layout order.
    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.chars
    }

    /// Row groups in activation order.
    #[must_use]
    pub fn row_groups(&self) -> &[BeamGroup] {
        &self.row_groups
    }

    /// Column groups in activation order.
    #[must_use]
    pub fn column_groups(&self) -> &[BeamGroup] {
        &self.column_groups
    }

    /// Diagonal buckets in wipe order.
    #[must_use]
    pub fn diagonal_groups(&self) -> &[Vec<usize>] {
        &self.diagonals
    }

    /// Whether the text produced no characters on this canvas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_style::Rgb;
    use tracing_test::traced_test;

    fn run_until(fx: &mut BeamsEffect, phase: Phase, limit: usize) -> usize {
        for tick in 0..limit {
            if fx.phase() == phase {
                return tick;
            }
            fx.update();
        }
        panic!("phase {phase} not reached within {limit} ticks");
    }

    #[test]
    fn first_tick_launches_beams() {
        let mut fx = BeamsEffect::with_seed(20, 4, "AB\nCD", 1);
        fx.update();
        assert!(fx.row_groups().iter().any(BeamGroup::is_started));
        assert!(fx.column_groups().iter().any(BeamGroup::is_started));
        assert_eq!(fx.beam_delay_count, fx.config().beam_delay);
    }

    #[test]
    fn delay_gates_next_burst() {
        let mut fx = BeamsEffect::with_seed(40, 10, "ABCDEFGH\nIJKLMNOP\nQRSTUVWX", 5);
        fx.update();
        let started = |fx: &BeamsEffect| {
            fx.row_groups()
                .iter()
                .chain(fx.column_groups())
                .filter(|g| g.is_started())
                .count()
        };
        let after_burst = started(&fx);
        fx.update();
        fx.update();
        assert_eq!(started(&fx), after_burst, "no activations while delayed");
    }

    #[test]
    fn full_cycle_returns_to_beams() {
        let cfg = BeamsConfig {
            hold_frames: 5,
            ..BeamsConfig::default()
        };
        let mut fx = BeamsEffect::with_config(30, 5, "GLINT\nFX", cfg, Some(9));
        run_until(&mut fx, Phase::FinalWipe, 2_000);
        run_until(&mut fx, Phase::Hold, 2_000);
        assert!(
            fx.characters()
                .iter()
                .all(|c| c.visible && c.scene == Scene::Brighten && c.symbol == c.original)
        );
        run_until(&mut fx, Phase::Beams, 10);
        assert_eq!(fx.frame_count(), 0);
        assert!(fx.characters().iter().all(|c| !c.visible));
    }

    #[test]
    fn wipe_waits_for_brighten_gradients() {
        let mut fx = BeamsEffect::with_seed(10, 3, "HI", 2);
        run_until(&mut fx, Phase::FinalWipe, 1_000);
        // One tick reveals both diagonals; the brighten gradient needs 9 more.
        fx.update();
        assert_eq!(fx.phase(), Phase::FinalWipe);
        let ticks = run_until(&mut fx, Phase::Hold, 100);
        assert!(ticks >= 8, "took {ticks} ticks");
        let last = fx.config().final_gradient().last();
        assert!(fx.characters().iter().all(|c| c.color == Some(last)));
    }

    #[test]
    fn hold_counts_configured_frames() {
        let cfg = BeamsConfig {
            hold_frames: 7,
            ..BeamsConfig::default()
        };
        let mut fx = BeamsEffect::with_config(10, 3, "X", cfg, Some(4));
        run_until(&mut fx, Phase::Hold, 1_000);
        for _ in 0..6 {
            fx.update();
            assert_eq!(fx.phase(), Phase::Hold);
        }
        fx.update();
        assert_eq!(fx.phase(), Phase::Beams);
    }

    #[test]
    fn empty_text_cycles_without_characters() {
        let cfg = BeamsConfig {
            hold_frames: 2,
            ..BeamsConfig::default()
        };
        let mut fx = BeamsEffect::with_config(10, 3, "", cfg, Some(0));
        assert!(fx.is_empty());
        fx.update();
        assert_eq!(fx.phase(), Phase::FinalWipe);
        fx.update();
        assert_eq!(fx.phase(), Phase::Hold);
        fx.update();
        fx.update();
        assert_eq!(fx.phase(), Phase::Beams);
        assert_eq!(fx.render_frame().to_plain_string(), "          \n          \n          ");
    }

    #[test]
    fn zero_canvas_renders_nothing() {
        let mut fx = BeamsEffect::with_seed(0, 0, "HELLO", 3);
        for _ in 0..10 {
            fx.update();
        }
        assert!(fx.is_empty());
        assert_eq!(fx.render(), "");
    }

    #[test]
    fn render_is_pure() {
        let mut fx = BeamsEffect::with_seed(20, 3, "PURE", 8);
        for _ in 0..6 {
            fx.update();
        }
        let before = fx.characters().to_vec();
        let a = fx.render();
        let b = fx.render();
        assert_eq!(a, b);
        assert_eq!(fx.characters(), before.as_slice());
    }

    #[test]
    fn resize_rebuilds_layout() {
        let mut fx = BeamsEffect::with_seed(10, 3, "HI", 6);
        for _ in 0..20 {
            fx.update();
        }
        fx.resize(30, 9);
        assert_eq!(fx.phase(), Phase::Beams);
        assert_eq!(fx.frame_count(), 0);
        let coords: Vec<(u16, u16)> = fx.characters().iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(coords, vec![(14, 4), (15, 4)]);
        assert!(fx.characters().iter().all(|c| !c.visible));
    }

    #[test]
    fn custom_background_is_used() {
        let cfg = BeamsConfig {
            background: Rgb::new(1, 2, 3),
            ..BeamsConfig::default()
        };
        let fx = BeamsEffect::with_config(2, 1, "", cfg, Some(0));
        assert_eq!(fx.render_frame().get(0, 0).unwrap().bg, Rgb::new(1, 2, 3));
    }

    #[test]
    #[traced_test]
    fn phase_transitions_are_logged() {
        let mut fx = BeamsEffect::with_seed(10, 3, "OK", 10);
        run_until(&mut fx, Phase::Hold, 2_000);
        assert!(logs_contain("beams layout built"));
        assert!(logs_contain("phase transition"));
        assert!(logs_contain("final_wipe"));
    }
}
