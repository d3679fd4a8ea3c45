//! Property-based invariant tests for gradient construction.
//!
//! 1. With two or more stops, the first color is the first stop.
//! 2. With two or more stops, the last color is the last stop.
//! 3. Length follows the integer step distribution.
//! 4. Fade gradients have `steps + 1` colors and never brighten.
//! 5. Hex formatting round-trips through parsing.

use glint_style::{Gradient, Rgb};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn stops_strategy() -> impl Strategy<Value = Vec<Rgb>> {
    prop::collection::vec(rgb_strategy(), 2..8)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Endpoints and length
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn build_starts_at_first_stop(stops in stops_strategy(), steps in 0usize..64) {
        let g = Gradient::build(&stops, steps);
        let per_segment = steps / (stops.len() - 1);
        if per_segment > 0 {
            prop_assert_eq!(g.first(), stops[0]);
        }
    }

    #[test]
    fn build_ends_at_last_stop(stops in stops_strategy(), steps in 0usize..64) {
        let g = Gradient::build(&stops, steps);
        prop_assert_eq!(g.last(), *stops.last().unwrap());
    }

    #[test]
    fn build_length_matches_distribution(stops in stops_strategy(), steps in 0usize..64) {
        let g = Gradient::build(&stops, steps);
        let per_segment = steps / (stops.len() - 1);
        prop_assert_eq!(g.len(), per_segment * (stops.len() - 1) + 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Fade
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fade_len_and_darkening(start in rgb_strategy(), steps in 1usize..32) {
        let g = Gradient::fade(start, steps);
        prop_assert_eq!(g.len(), steps + 1);
        prop_assert_eq!(g.first(), start);
        for c in g.iter() {
            prop_assert!(c.r <= start.r && c.g <= start.g && c.b <= start.b);
        }
        prop_assert_eq!(g.last(), start.scale(0.3));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Hex text form
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hex_round_trip(c in rgb_strategy()) {
        prop_assert_eq!(Rgb::parse(&c.to_hex()), Some(c));
    }
}
