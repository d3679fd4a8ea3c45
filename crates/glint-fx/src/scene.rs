#![forbid(unsafe_code)]

//! Per-character animation sub-state.
//!
//! Every placed [`Character`] carries its own [`Scene`] and frame counter.
//! Groups and the phase machine only *enter* scenes; [`Character::step`]
//! advances them once per tick:
//!
//! ```text
//! None ──beam──▶ BeamRow/BeamColumn ──gradient done──▶ Fade ──done──▶ None
//! None ──wipe──▶ Brighten (holds its last color forever)
//! ```

use glint_style::{Gradient, Rgb};

/// A character's local animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scene {
    /// Idle; nothing changes.
    #[default]
    None,
    /// Lit by a row beam.
    BeamRow,
    /// Lit by a column beam.
    BeamColumn,
    /// Decaying after a beam passed.
    Fade,
    /// Final reveal; terminal look once the gradient is exhausted.
    Brighten,
}

impl Scene {
    /// Whether a beam is currently lighting the character.
    #[must_use]
    pub const fn is_beam(self) -> bool {
        matches!(self, Self::BeamRow | Self::BeamColumn)
    }

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BeamRow => "beam_row",
            Self::BeamColumn => "beam_column",
            Self::Fade => "fade",
            Self::Brighten => "brighten",
        }
    }
}

/// Shared gradients every character walks through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneGradients {
    /// Colors while lit by a beam.
    pub beam: Gradient,
    /// Decay after the beam, starting from the beam's last color.
    pub fade: Gradient,
    /// Colors of the final wipe.
    pub brighten: Gradient,
}

impl SceneGradients {
    /// Derive the fade gradient from the beam gradient's last color.
    #[must_use]
    pub fn new(beam: Gradient, brighten: Gradient, fade_steps: usize) -> Self {
        let fade = Gradient::fade(beam.last(), fade_steps);
        Self {
            beam,
            fade,
            brighten,
        }
    }
}

/// Ticks spent on each gradient color, per scene kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTiming {
    /// Ticks per beam gradient color.
    pub beam_frames: usize,
    /// Ticks per brighten gradient color.
    pub brighten_frames: usize,
}

/// One visible grid cell derived from a non-whitespace source rune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Source rune.
    pub original: char,
    /// Column on the canvas.
    pub x: u16,
    /// Row on the canvas.
    pub y: u16,
    /// Whether the renderer draws this character.
    pub visible: bool,
    /// Rune currently shown (a beam glyph while lit).
    pub symbol: char,
    /// Current foreground; `None` until first colored.
    pub color: Option<Rgb>,
    /// Active scene.
    pub scene: Scene,
    /// Ticks spent in the active scene.
    pub scene_frame: usize,
    /// Precomputed gradients.
    pub gradients: SceneGradients,
}

impl Character {
    /// A hidden, idle character at `(x, y)`.
    #[must_use]
    pub fn new(original: char, x: u16, y: u16, gradients: SceneGradients) -> Self {
        Self {
            original,
            x,
            y,
            visible: false,
            symbol: original,
            color: None,
            scene: Scene::None,
            scene_frame: 0,
            gradients,
        }
    }

    /// Show the character and restart its frame counter in `scene`.
    pub fn enter(&mut self, scene: Scene) {
        self.visible = true;
        self.scene = scene;
        self.scene_frame = 0;
    }

    /// Return to the hidden, idle state. Identity and gradients are kept.
    pub fn clear(&mut self) {
        self.visible = false;
        self.scene = Scene::None;
        self.scene_frame = 0;
        self.symbol = self.original;
        self.color = None;
    }

    /// Total ticks the brighten pass takes.
    #[must_use]
    pub fn brighten_frames(&self, timing: SceneTiming) -> usize {
        self.gradients.brighten.len() * timing.brighten_frames
    }

    /// Whether the brighten pass has run through its whole gradient.
    #[must_use]
    pub fn brighten_done(&self, timing: SceneTiming) -> bool {
        self.scene_frame >= self.brighten_frames(timing)
    }

    /// Advance the active scene by one tick. Hidden characters are skipped.
    pub fn step(&mut self, timing: SceneTiming) {
        if !self.visible {
            return;
        }
        match self.scene {
            Scene::BeamRow | Scene::BeamColumn => {
                let per_step = timing.beam_frames.max(1);
                let total = self.gradients.beam.len() * per_step;
                if self.scene_frame < total {
                    self.color = Some(self.gradients.beam.at(self.scene_frame / per_step));
                    self.scene_frame += 1;
                } else {
                    self.scene = Scene::Fade;
                    self.scene_frame = 0;
                }
            }
            Scene::Fade => {
                if self.scene_frame < self.gradients.fade.len() {
                    self.color = Some(self.gradients.fade.at(self.scene_frame));
                    self.scene_frame += 1;
                } else {
                    // Color stays at the dim end of the fade.
                    self.scene = Scene::None;
                    self.symbol = self.original;
                }
            }
            Scene::Brighten => {
                let per_step = timing.brighten_frames.max(1);
                let total = self.gradients.brighten.len() * per_step;
                if self.scene_frame < total {
                    self.color = Some(self.gradients.brighten.at(self.scene_frame / per_step));
                    self.scene_frame += 1;
                }
            }
            Scene::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: SceneTiming = SceneTiming {
        beam_frames: 1,
        brighten_frames: 1,
    };

    fn gradients() -> SceneGradients {
        SceneGradients::new(
            Gradient::from_hex_stops(&["#666666", "#999999", "#cccccc", "#ffffff"], 5),
            Gradient::from_hex_stops(&["#999999", "#cccccc", "#ffffff"], 8),
            5,
        )
    }

    fn lit(scene: Scene) -> Character {
        let mut ch = Character::new('A', 1, 2, gradients());
        ch.enter(scene);
        ch
    }

    #[test]
    fn hidden_character_does_not_step() {
        let mut ch = Character::new('A', 0, 0, gradients());
        ch.scene = Scene::Brighten;
        ch.step(TIMING);
        assert_eq!(ch.color, None);
        assert_eq!(ch.scene_frame, 0);
    }

    #[test]
    fn beam_walks_gradient_then_fades() {
        let mut ch = lit(Scene::BeamRow);
        let beam: Vec<Rgb> = ch.gradients.beam.to_vec();
        for expected in &beam {
            ch.step(TIMING);
            assert_eq!(ch.color, Some(*expected));
            assert_eq!(ch.scene, Scene::BeamRow);
        }
        ch.step(TIMING);
        assert_eq!(ch.scene, Scene::Fade);
        assert_eq!(ch.scene_frame, 0);
    }

    #[test]
    fn fade_ends_idle_with_original_symbol_and_dim_color() {
        let mut ch = lit(Scene::Fade);
        ch.symbol = '▂';
        let fade_len = ch.gradients.fade.len();
        for _ in 0..fade_len {
            ch.step(TIMING);
        }
        assert_eq!(ch.scene, Scene::Fade);
        ch.step(TIMING);
        assert_eq!(ch.scene, Scene::None);
        assert_eq!(ch.symbol, 'A');
        assert_eq!(ch.color, Some(Rgb::gray(0x4c)));
        assert!(ch.visible);
    }

    #[test]
    fn beam_frames_per_step_stretches_each_color() {
        let timing = SceneTiming {
            beam_frames: 3,
            brighten_frames: 1,
        };
        let mut ch = lit(Scene::BeamColumn);
        for _ in 0..3 {
            ch.step(timing);
            assert_eq!(ch.color, Some(ch.gradients.beam[0]));
        }
        ch.step(timing);
        assert_eq!(ch.color, Some(ch.gradients.beam[1]));
    }

    #[test]
    fn brighten_settles_on_last_color() {
        let mut ch = lit(Scene::Brighten);
        for _ in 0..ch.brighten_frames(TIMING) {
            assert!(!ch.brighten_done(TIMING));
            ch.step(TIMING);
        }
        assert!(ch.brighten_done(TIMING));
        let settled = ch.color;
        ch.step(TIMING);
        ch.step(TIMING);
        assert_eq!(ch.color, settled);
        assert_eq!(settled, Some(Rgb::WHITE));
        assert_eq!(ch.scene, Scene::Brighten);
    }

    #[test]
    fn clear_restores_identity() {
        let mut ch = lit(Scene::BeamRow);
        ch.symbol = '▁';
        ch.step(TIMING);
        ch.clear();
        assert_eq!(ch, Character::new('A', 1, 2, gradients()));
    }

    #[test]
    fn scene_names() {
        assert_eq!(Scene::BeamColumn.as_str(), "beam_column");
        assert!(Scene::BeamRow.is_beam());
        assert!(!Scene::Fade.is_beam());
    }
}
