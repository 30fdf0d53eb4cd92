use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::roster::{Participant, Roster};

/// Represents the current state of the prize wheel
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WheelGame {
    pub roster: Roster,
    /// Total forward rotation in degrees since creation. Never reset and
    /// never decreased, so the wheel always turns the same way.
    pub rotation_degrees: f64,
    pub phase: SpinPhase,
    pub last_winner: Option<Participant>,
}

/// A spin in flight, frozen at launch. Roster edits made while the wheel
/// is turning must not change where it stops, so the outcome is computed
/// from these values alone.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PendingSpin {
    pub target_rotation: f64,
    pub entrants: Vec<Participant>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum SpinPhase {
    Idle,
    Spinning(PendingSpin),
}

/// Why a spin request was ignored. The wheel is left untouched and no
/// random values are drawn in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRejection {
    EmptyRoster,
    AlreadySpinning,
}

/// Render-facing snapshot of the wheel
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WheelView {
    pub is_spinning: bool,
    pub rotation_degrees: f64,
    pub winner: Option<Participant>,
    pub participants: Vec<Participant>,
}

impl WheelGame {
    pub fn new() -> Self {
        Self {
            roster: Roster::new(),
            rotation_degrees: 0.0,
            phase: SpinPhase::Idle,
            last_winner: None,
        }
    }

    /// Appends an entrant. Additions made mid-spin only take effect for
    /// subsequent spins.
    pub fn add_participant(&mut self, raw: &str) -> bool {
        self.roster.add(raw)
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning(_))
    }

    /// Launches a spin: clears the previous winner, advances the wheel by
    /// five to nine full turns plus a random offset, and freezes the
    /// entrant list for resolution.
    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PendingSpin, SpinRejection> {
        if self.is_spinning() {
            return Err(SpinRejection::AlreadySpinning);
        }
        if self.roster.is_empty() {
            return Err(SpinRejection::EmptyRoster);
        }

        self.last_winner = None;

        let full_turns = rng.gen_range(MIN_FULL_TURNS..=MAX_FULL_TURNS);
        let extra_degrees = rng.gen_range(0..360);
        self.rotation_degrees += f64::from(full_turns * 360 + extra_degrees);

        let pending = PendingSpin {
            target_rotation: self.rotation_degrees,
            entrants: self.roster.snapshot(),
        };
        self.phase = SpinPhase::Spinning(pending.clone());
        Ok(pending)
    }

    /// Resolves the spin in flight against the rotation and entrants
    /// frozen at launch. Returns `None` when no spin is pending.
    pub fn complete_spin(&mut self) -> Option<&Participant> {
        let pending = match std::mem::replace(&mut self.phase, SpinPhase::Idle) {
            SpinPhase::Spinning(pending) => pending,
            SpinPhase::Idle => return None,
        };

        let index = winning_index(pending.target_rotation, pending.entrants.len());
        self.last_winner = pending.entrants.get(index).cloned();
        self.last_winner.as_ref()
    }

    pub fn view(&self) -> WheelView {
        WheelView {
            is_spinning: self.is_spinning(),
            rotation_degrees: self.rotation_degrees,
            winner: self.last_winner.clone(),
            participants: self.roster.snapshot(),
        }
    }
}

/// Maps a final rotation to the entrant index sitting under the pointer.
///
/// Segments start at the pointer and run clockwise in list order, while
/// the wheel itself has turned clockwise by `rotation_degrees`. The
/// segment under the pointer therefore sits at the reverse offset
/// `360 - normalized`; the second `% 360` folds `normalized == 0` back
/// to offset zero, and the final clamp absorbs float rounding at
/// segment boundaries.
pub fn winning_index(rotation_degrees: f64, entrant_count: usize) -> usize {
    if entrant_count == 0 {
        return 0;
    }
    let segment_angle = 360.0 / entrant_count as f64;
    let normalized = rotation_degrees.rem_euclid(360.0);
    let pointer_offset = (360.0 - normalized) % 360.0;
    let index = (pointer_offset / segment_angle).floor() as usize;
    index.min(entrant_count - 1)
}

// Constants shared with the wheel animation
pub const SPIN_DURATION_MS: u64 = 5000;  // Duration of the spin animation in milliseconds
pub const MIN_FULL_TURNS: u32 = 5;       // Minimum number of full rotations per spin
pub const MAX_FULL_TURNS: u32 = 9;       // Maximum number of full rotations per spin
