#![forbid(unsafe_code)]

//! Beam groups: the rows and columns beams sweep, plus the diagonal buckets
//! of the final wipe.
//!
//! Groups never own characters. They hold indices into the effect's
//! character vector, so a character can belong to one row group, one column
//! group and one diagonal bucket at once.
//!
//! # Invariants
//!
//! 1. Row groups partition the characters by `y`; column groups by `x`.
//! 2. Within a group, indices follow the sweep axis, or its exact reverse.
//! 3. Diagonal buckets are ordered by ascending `x + y`.
//! 4. Shuffling changes activation order only, never membership.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::scene::{Character, Scene};

/// Accumulator value that marks a freshly activated group.
pub const ACTIVATION_EPSILON: f64 = 0.01;

/// Speeds are drawn in tenths of a character per tick.
const SPEED_SCALE: f64 = 0.1;

/// Sweep axis of a beam group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sweeps along a row (shared `y`).
    Row,
    /// Sweeps along a column (shared `x`).
    Column,
}

impl Direction {
    /// Scene a character enters when this beam reaches it.
    #[must_use]
    pub const fn scene(self) -> Scene {
        match self {
            Self::Row => Scene::BeamRow,
            Self::Column => Scene::BeamColumn,
        }
    }
}

/// An ordered run of characters swept by one beam.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamGroup {
    indices: Vec<usize>,
    direction: Direction,
    speed: f64,
    accumulator: f64,
    cursor: usize,
    started: bool,
    symbols: Arc<[char]>,
}

impl BeamGroup {
    /// Create an idle group. `symbols` must not be empty.
    #[must_use]
    pub fn new(indices: Vec<usize>, direction: Direction, speed: f64, symbols: Arc<[char]>) -> Self {
        debug_assert!(!symbols.is_empty());
        Self {
            indices,
            direction,
            speed,
            accumulator: 0.0,
            cursor: 0,
            started: false,
            symbols,
        }
    }

    /// Character indices in sweep order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Sweep axis.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Characters revealed per tick, on average.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Fractional reveal progress carried into the next tick.
    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Number of characters already revealed.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Head-to-tail beam glyphs.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Whether the beam has been launched this cycle.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether every character has been revealed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.indices.len()
    }

    /// Inert groups do nothing when advanced.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        !self.started || self.is_exhausted()
    }

    /// Launch the beam. Returns `false` if it was already launched.
    pub fn activate(&mut self) -> bool {
        if self.started || self.cursor != 0 {
            return false;
        }
        self.started = true;
        self.accumulator = ACTIVATION_EPSILON;
        true
    }

    /// Rewind to the pre-launch state. Shape, order and speed are kept.
    pub fn rewind(&mut self) {
        self.started = false;
        self.accumulator = 0.0;
        self.cursor = 0;
    }

    /// Advance the beam by one tick.
    ///
    /// Returns `true` if the group was active (started and not yet exhausted)
    /// when called, whether or not a character was revealed this tick.
    pub fn advance(&mut self, chars: &mut [Character]) -> bool {
        if self.is_inert() {
            return false;
        }

        self.accumulator += self.speed;
        let reveal = self.accumulator.trunc();
        self.accumulator -= reveal;

        let scene = self.direction.scene();
        let tail = self.symbols.len() - 1;
        for _ in 0..reveal as usize {
            if self.is_exhausted() {
                break;
            }
            let head = &mut chars[self.indices[self.cursor]];
            head.enter(scene);
            head.symbol = self.symbols[0];

            for back in 1..=tail.min(self.cursor) {
                let trailing = &mut chars[self.indices[self.cursor - back]];
                if trailing.scene.is_beam() {
                    trailing.symbol = self.symbols[back.min(tail)];
                }
            }

            self.cursor += 1;
        }

        true
    }
}

/// Draw a speed in characters per tick from the half-open tenths range.
fn draw_speed<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (u32, u32)) -> f64 {
    let tenths = if hi > lo { rng.random_range(lo..hi) } else { lo };
    f64::from(tenths) * SPEED_SCALE
}

fn build_groups<R, K, S>(
    chars: &[Character],
    direction: Direction,
    speed_range: (u32, u32),
    symbols: &Arc<[char]>,
    rng: &mut R,
    bucket_key: K,
    sort_key: S,
) -> Vec<BeamGroup>
where
    R: Rng + ?Sized,
    K: Fn(&Character) -> u16,
    S: Fn(&Character) -> u16,
{
    let mut buckets: BTreeMap<u16, Vec<usize>> = BTreeMap::new();
    for (i, ch) in chars.iter().enumerate() {
        buckets.entry(bucket_key(ch)).or_default().push(i);
    }

    buckets
        .into_values()
        .map(|mut indices| {
            indices.sort_by_key(|&i| sort_key(&chars[i]));
            if rng.random_bool(0.5) {
                indices.reverse();
            }
            let speed = draw_speed(rng, speed_range);
            BeamGroup::new(indices, direction, speed, Arc::clone(symbols))
        })
        .collect()
}

/// One group per row, sorted left to right (or reversed).
pub fn build_row_groups<R: Rng + ?Sized>(
    chars: &[Character],
    speed_range: (u32, u32),
    symbols: &Arc<[char]>,
    rng: &mut R,
) -> Vec<BeamGroup> {
    build_groups(
        chars,
        Direction::Row,
        speed_range,
        symbols,
        rng,
        |c| c.y,
        |c| c.x,
    )
}

/// One group per column, sorted top to bottom (or reversed).
pub fn build_column_groups<R: Rng + ?Sized>(
    chars: &[Character],
    speed_range: (u32, u32),
    symbols: &Arc<[char]>,
    rng: &mut R,
) -> Vec<BeamGroup> {
    build_groups(
        chars,
        Direction::Column,
        speed_range,
        symbols,
        rng,
        |c| c.x,
        |c| c.y,
    )
}

/// Randomize activation order across rows and columns together.
///
/// Both lists are concatenated, permuted uniformly, then split back by
/// direction keeping the permuted relative order.
pub fn shuffle_groups<R: Rng + ?Sized>(
    rows: Vec<BeamGroup>,
    columns: Vec<BeamGroup>,
    rng: &mut R,
) -> (Vec<BeamGroup>, Vec<BeamGroup>) {
    let mut all = rows;
    all.extend(columns);
    all.shuffle(rng);
    all.into_iter()
        .partition(|group| group.direction() == Direction::Row)
}

/// Bucket characters by `x + y`, buckets in ascending order.
#[must_use]
pub fn build_diagonals(chars: &[Character]) -> Vec<Vec<usize>> {
    let mut buckets: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, ch) in chars.iter().enumerate() {
        buckets
            .entry(u32::from(ch.x) + u32::from(ch.y))
            .or_default()
            .push(i);
    }
    buckets.into_values().collect()
}
