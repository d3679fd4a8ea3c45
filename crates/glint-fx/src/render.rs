#![forbid(unsafe_code)]

//! Pure rendering of effect state.
//!
//! Rendering happens in two steps:
//!
//! 1. [`Frame::from_characters`] stamps visible characters onto a grid of
//!    [`Cell`]s. Every cell carries the canvas background, so nothing of the
//!    terminal's default background shows through.
//! 2. [`Frame::to_ansi_string`] turns the grid into colorized text. Escape
//!    encoding is left to `crossterm::style`; this module only picks colors.
//!
//! Neither step touches effect state, so a frame can be rendered any number
//! of times between ticks.

use std::fmt::Write as _;

use crossterm::style::{Color, Stylize};
use glint_style::Rgb;

use crate::scene::Character;

/// One canvas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Glyph to draw (a space for background cells).
    pub symbol: char,
    /// Foreground, if any.
    pub fg: Option<Rgb>,
    /// Background, always set.
    pub bg: Rgb,
}

impl Cell {
    /// An empty cell painted with `bg`.
    #[must_use]
    pub const fn background(bg: Rgb) -> Self {
        Self {
            symbol: ' ',
            fg: None,
            bg,
        }
    }

    /// Whether the cell draws a colored glyph rather than plain background.
    #[must_use]
    pub const fn is_glyph(&self) -> bool {
        self.symbol != ' ' && self.fg.is_some()
    }
}

/// A full `width × height` snapshot of the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

#[inline]
fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

impl Frame {
    /// A frame of background cells.
    #[must_use]
    pub fn blank(width: u16, height: u16, bg: Rgb) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::background(bg); len],
        }
    }

    /// Stamp every visible character onto a blank frame.
    #[must_use]
    pub fn from_characters(width: u16, height: u16, bg: Rgb, chars: &[Character]) -> Self {
        let mut frame = Self::blank(width, height, bg);
        for ch in chars.iter().filter(|c| c.visible) {
            if let Some(cell) = frame.get_mut(ch.x, ch.y) {
                cell.symbol = ch.symbol;
                cell.fg = ch.color;
            }
        }
        frame
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let w = usize::from(self.width);
        (0..usize::from(self.height)).map(move |y| &self.cells[y * w..(y + 1) * w])
    }

    /// Symbols only, rows joined with `\n`.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|c| if c.is_glyph() { c.symbol } else { ' ' }).collect())
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Colorized rows, one string per canvas row.
    #[must_use]
    pub fn ansi_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                let mut line = String::with_capacity(row.len() * 24);
                for cell in row {
                    let bg = term_color(cell.bg);
                    match cell.fg {
                        Some(fg) if cell.is_glyph() => {
                            let _ = write!(line, "{}", cell.symbol.with(term_color(fg)).on(bg));
                        }
                        _ => {
                            let _ = write!(line, "{}", ' '.on(bg));
                        }
                    }
                }
                line
            })
            .collect()
    }

    /// Colorized frame, rows joined with `\n` and no trailing newline.
    #[must_use]
    pub fn to_ansi_string(&self) -> String {
        self.ansi_rows().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, SceneGradients};
    use glint_style::Gradient;

    const BG: Rgb = Rgb::new(0x1a, 0x1a, 0x1a);

    fn character(original: char, x: u16, y: u16) -> Character {
        let g = SceneGradients::new(Gradient::build(&[], 0), Gradient::build(&[], 0), 1);
        Character::new(original, x, y, g)
    }

    #[test]
    fn blank_frame_is_all_background() {
        let frame = Frame::blank(4, 2, BG);
        assert_eq!(frame.to_plain_string(), "    \n    ");
        assert!(frame.rows().flatten().all(|c| *c == Cell::background(BG)));
    }

    #[test]
    fn hidden_characters_are_not_stamped() {
        let chars = vec![character('A', 1, 0)];
        let frame = Frame::from_characters(3, 1, BG, &chars);
        assert_eq!(frame.to_plain_string(), "   ");
    }

    #[test]
    fn visible_colored_character_is_drawn() {
        let mut ch = character('A', 1, 0);
        ch.enter(Scene::Brighten);
        ch.color = Some(Rgb::WHITE);
        let frame = Frame::from_characters(3, 1, BG, &[ch]);
        assert_eq!(frame.to_plain_string(), " A ");
        let cell = frame.get(1, 0).unwrap();
        assert!(cell.is_glyph());
        assert_eq!(cell.bg, BG);
    }

    #[test]
    fn uncolored_character_renders_as_background() {
        let mut ch = character('A', 0, 0);
        ch.enter(Scene::BeamRow);
        let frame = Frame::from_characters(1, 1, BG, &[ch]);
        assert!(!frame.get(0, 0).unwrap().is_glyph());
    }

    #[test]
    fn ansi_rows_carry_colors() {
        let mut ch = character('Z', 0, 0);
        ch.enter(Scene::Brighten);
        ch.color = Some(Rgb::new(1, 2, 3));
        let frame = Frame::from_characters(2, 2, BG, &[ch]);
        let rows = frame.ansi_rows();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains('Z'));
        assert!(!frame.to_ansi_string().ends_with('\n'));
        // crossterm drops color codes when NO_COLOR is set.
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(rows[0].contains("38;2;1;2;3"));
            assert!(rows[0].contains("48;2;26;26;26"));
            assert!(rows[1].contains("48;2;26;26;26"));
        }
    }

    #[test]
    fn zero_sized_frames() {
        assert_eq!(Frame::blank(0, 0, BG).to_ansi_string(), "");
        assert_eq!(Frame::blank(0, 3, BG).to_plain_string(), "\n\n");
        assert_eq!(Frame::blank(5, 0, BG).rows().count(), 0);
    }

    #[test]
    fn out_of_bounds_lookup() {
        let frame = Frame::blank(2, 2, BG);
        assert!(frame.get(2, 0).is_none());
        assert!(frame.get(0, 2).is_none());
    }
}
