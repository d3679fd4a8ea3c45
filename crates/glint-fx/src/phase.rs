#![forbid(unsafe_code)]

//! Global phases of the beams effect and their transition table.
//!
//! | From        | Event            | To          |
//! |-------------|------------------|-------------|
//! | `Beams`     | `BeamsExhausted` | `FinalWipe` |
//! | `FinalWipe` | `WipeComplete`   | `Hold`      |
//! | `Hold`      | `HoldElapsed`    | `Beams`     |
//!
//! The last row is the restart: the effect resets all animation state when
//! it fires. Every other pair is rejected.

use std::fmt;

/// Stage of the effect cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Row and column beams sweep the text.
    #[default]
    Beams,
    /// Diagonal brighten pass.
    FinalWipe,
    /// Fully revealed text is held before restarting.
    Hold,
}

/// Something that happened during a tick and may move the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseEvent {
    /// No beam group is active anymore.
    BeamsExhausted,
    /// Every diagonal is revealed and every brighten gradient has run.
    WipeComplete,
    /// The hold counter reached its threshold.
    HoldElapsed,
}

impl Phase {
    /// Look up the transition for `event`; `None` if the pair is not in the table.
    #[must_use]
    pub const fn on(self, event: PhaseEvent) -> Option<Self> {
        match (self, event) {
            (Self::Beams, PhaseEvent::BeamsExhausted) => Some(Self::FinalWipe),
            (Self::FinalWipe, PhaseEvent::WipeComplete) => Some(Self::Hold),
            (Self::Hold, PhaseEvent::HoldElapsed) => Some(Self::Beams),
            _ => None,
        }
    }

    /// Whether moving along `event` starts a new cycle.
    #[must_use]
    pub const fn is_restart(self, event: PhaseEvent) -> bool {
        matches!((self, event), (Self::Hold, PhaseEvent::HoldElapsed))
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beams => "beams",
            Self::FinalWipe => "final_wipe",
            Self::Hold => "hold",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [Phase; 3] = [Phase::Beams, Phase::FinalWipe, Phase::Hold];
    const EVENTS: [PhaseEvent; 3] = [
        PhaseEvent::BeamsExhausted,
        PhaseEvent::WipeComplete,
        PhaseEvent::HoldElapsed,
    ];

    #[test]
    fn cycle_follows_table() {
        let mut phase = Phase::default();
        assert_eq!(phase, Phase::Beams);
        for event in EVENTS {
            phase = phase.on(event).expect("table transition");
        }
        assert_eq!(phase, Phase::Beams);
    }

    #[test]
    fn exactly_three_transitions_accepted() {
        let accepted = PHASES
            .iter()
            .flat_map(|p| EVENTS.iter().map(move |e| p.on(*e)))
            .filter(Option::is_some)
            .count();
        assert_eq!(accepted, 3);
    }

    #[test]
    fn out_of_order_events_rejected() {
        assert_eq!(Phase::Beams.on(PhaseEvent::HoldElapsed), None);
        assert_eq!(Phase::Hold.on(PhaseEvent::BeamsExhausted), None);
        assert_eq!(Phase::FinalWipe.on(PhaseEvent::BeamsExhausted), None);
    }

    #[test]
    fn only_hold_elapsed_restarts() {
        for phase in PHASES {
            for event in EVENTS {
                let expected = phase == Phase::Hold && event == PhaseEvent::HoldElapsed;
                assert_eq!(phase.is_restart(event), expected);
            }
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Phase::FinalWipe.to_string(), "final_wipe");
    }
}
