//! Session phase and turn alternation.

use core::fmt;

use crate::common::PlayerId;
use crate::config::NO_PLAYER;

/// Session-level stage gating which operations are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Registration,
    Placement,
    Playing,
    Finished,
}

impl Phase {
    /// Ships may be placed and players removed.
    pub fn is_setup(self) -> bool {
        matches!(self, Phase::Registration | Phase::Placement)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Why a shooter was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// Game not started yet.
    NotStarted,
    /// Someone else holds the turn.
    NotYourTurn { current: PlayerId },
    /// Game is over.
    Finished,
}

/// Tracks the phase, who moves next and who won.
///
/// Once `Playing`, the turn passes strictly between the two seated players
/// on every resolved shot. `Finished` is terminal.
#[derive(Debug, Clone, Default)]
pub struct TurnController {
    phase: Phase,
    seats: [PlayerId; 2],
    current: PlayerId,
    winner: PlayerId,
}

impl TurnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player who must move next, or `NO_PLAYER` outside `Playing`.
    pub fn current(&self) -> PlayerId {
        if self.phase == Phase::Playing {
            self.current
        } else {
            NO_PLAYER
        }
    }

    /// Winner once finished, otherwise `NO_PLAYER`.
    pub fn winner(&self) -> PlayerId {
        self.winner
    }

    /// First ship placed: Registration moves to Placement.
    pub fn begin_placement(&mut self) {
        if self.phase == Phase::Registration {
            self.phase = Phase::Placement;
        }
    }

    /// Back to Registration after the roster shrinks during setup.
    pub fn reopen_registration(&mut self) {
        if self.phase == Phase::Placement {
            self.phase = Phase::Registration;
        }
    }

    /// Start play with `first` holding the turn. Ignored outside setup.
    pub fn start(&mut self, first: PlayerId, second: PlayerId) -> bool {
        if !self.phase.is_setup() {
            return false;
        }
        self.seats = [first, second];
        self.current = first;
        self.phase = Phase::Playing;
        true
    }

    /// Check that `player` may shoot now. Never mutates.
    pub fn check(&self, player: PlayerId) -> Result<(), TurnError> {
        match self.phase {
            Phase::Registration | Phase::Placement => Err(TurnError::NotStarted),
            Phase::Finished => Err(TurnError::Finished),
            Phase::Playing if player != self.current => Err(TurnError::NotYourTurn {
                current: self.current,
            }),
            Phase::Playing => Ok(()),
        }
    }

    /// The seated opponent of `player`, if both are seated.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        match self.seats {
            [a, b] if a == player && b != NO_PLAYER => Some(b),
            [a, b] if b == player && a != NO_PLAYER => Some(a),
            _ => None,
        }
    }

    /// Hand the turn to the other seat after a resolved shot by the holder.
    pub fn advance(&mut self) -> PlayerId {
        if self.phase == Phase::Playing {
            if let Some(next) = self.opponent_of(self.current) {
                self.current = next;
            }
        }
        self.current
    }

    /// Terminal transition. Only the first call takes effect.
    pub fn finish(&mut self, winner: PlayerId) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.phase = Phase::Finished;
        self.winner = winner;
        self.current = NO_PLAYER;
        true
    }
}
