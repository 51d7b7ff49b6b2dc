//! Common types for the naval battle session: cells, shot outcomes and
//! domain errors.

use crate::bitboard::BitBoardError;
use core::fmt;

/// Session-scoped player identifier. `0` is reserved, see [`crate::NO_PLAYER`].
pub type PlayerId = u32;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    /// Glyph used by the text renderings.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '~',
            Cell::Ship => 'B',
            Cell::Hit => 'X',
            Cell::Miss => 'O',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Result of a shot as seen by the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot landed on open water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot hit the last intact cell of a ship.
    Sunk,
    /// Cell was already shot; nothing changed.
    AlreadyShot,
    /// Not the caller's turn, or the game has not started.
    InvalidTurn,
    /// The session is finished.
    GameAlreadyOver,
    /// Coordinates outside the board.
    OutOfBounds,
}

impl ShotOutcome {
    /// Whether the shot changed the target board.
    pub fn is_resolved(self) -> bool {
        matches!(self, ShotOutcome::Miss | ShotOutcome::Hit | ShotOutcome::Sunk)
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ShotOutcome::Miss => "miss",
            ShotOutcome::Hit => "hit",
            ShotOutcome::Sunk => "sunk",
            ShotOutcome::AlreadyShot => "cell already shot",
            ShotOutcome::InvalidTurn => "not your turn",
            ShotOutcome::GameAlreadyOver => "game already over",
            ShotOutcome::OutOfBounds => "coordinates out of bounds",
        };
        f.write_str(text)
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    /// Underlying bitboard index error.
    BitBoardError(BitBoardError),
    /// Ship would leave the grid.
    ShipOutOfBounds,
    /// Ship would cover a non-empty cell.
    ShipOverlaps,
    /// Ship size is zero or longer than the board.
    InvalidShipSize,
    /// Orientation token other than `H` or `V`.
    InvalidOrientation,
    /// Shot coordinates outside the grid.
    ShotOutOfBounds,
    /// Random placement gave up.
    UnableToPlaceShip,
    /// Ship map and fleet disagree about a cell.
    UnknownShipHit,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::InvalidShipSize => write!(f, "Ship size is not valid for this board"),
            BoardError::InvalidOrientation => write!(f, "Orientation must be H or V"),
            BoardError::ShotOutOfBounds => write!(f, "Shot is out of bounds"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::UnknownShipHit => write!(f, "Hit cell does not belong to any ship"),
        }
    }
}

/// Session-level rejections. Each one leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    /// Player id is not registered.
    UnknownPlayer(PlayerId),
    /// Both seats are taken.
    SessionFull,
    /// Operation not allowed in the current phase.
    WrongPhase(crate::turn::Phase),
    /// Board rejected the placement.
    Board(BoardError),
}

impl From<BoardError> for SessionError {
    fn from(err: BoardError) -> Self {
        SessionError::Board(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownPlayer(id) => write!(f, "No player with id {}", id),
            SessionError::SessionFull => write!(f, "Session already has two players"),
            SessionError::WrongPhase(phase) => {
                write!(f, "Operation not allowed during {:?}", phase)
            }
            SessionError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
