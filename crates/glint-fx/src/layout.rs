#![forbid(unsafe_code)]

//! Placement of a text block onto a fixed character grid.
//!
//! The block is centered as a whole: one vertical offset for the line count
//! and one horizontal offset for the widest line, shared by every line.
//! Whitespace is left as background and anything falling off the canvas is
//! dropped.

use crate::scene::{Character, SceneGradients};

/// Offsets at which the text block starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOrigin {
    /// First column of every line.
    pub x: usize,
    /// Row of the first line.
    pub y: usize,
}

/// Whether `ch` stays background instead of becoming a [`Character`].
#[inline]
fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}

/// Compute the centered origin of `text` on a `width × height` canvas.
#[must_use]
pub fn block_origin(width: u16, height: u16, text: &str) -> BlockOrigin {
    let line_count = text.split('\n').count();
    let widest = text
        .split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    BlockOrigin {
        x: usize::from(width).saturating_sub(widest) / 2,
        y: usize::from(height).saturating_sub(line_count) / 2,
    }
}

/// Place every non-blank rune of `text` on the canvas.
///
/// Characters come out in reading order and all share `gradients`.
#[must_use]
pub fn place_text(width: u16, height: u16, text: &str, gradients: &SceneGradients) -> Vec<Character> {
    let origin = block_origin(width, height, text);
    let mut chars = Vec::new();

    for (line_idx, line) in text.split('\n').enumerate() {
        let y = origin.y + line_idx;
        if y >= usize::from(height) {
            break;
        }
        for (col, rune) in line.chars().enumerate() {
            if is_blank(rune) {
                continue;
            }
            let x = origin.x + col;
            if x >= usize::from(width) {
                break;
            }
            // Both fit in u16: they are below width/height.
            chars.push(Character::new(rune, x as u16, y as u16, gradients.clone()));
        }
    }

    chars
}
