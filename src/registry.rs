//! Roster of the two seats in a session.

use alloc::string::String;
use alloc::vec::Vec;

use crate::board::Board;
use crate::common::{PlayerId, SessionError};
use crate::config::MAX_PLAYERS;
use crate::turn::Phase;

/// A registered player and the board they own.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub ready: bool,
    board: Board,
}

impl Player {
    fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            ready: false,
            board: Board::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

/// Result of a readiness request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadyOutcome {
    /// Player is now ready; waiting on the other seat.
    Marked,
    /// Player is now ready and play has begun.
    Started,
    /// Nothing changed.
    AlreadyReady,
    /// Nothing changed.
    UnknownPlayer,
    /// Nothing changed: the game is already under way or over.
    NotAccepted,
    /// Nothing changed: no ship placed yet.
    NoShips,
}

/// Registered players in registration order. Ids are sequential from 1 and
/// never reused.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    players: Vec<Player>,
    next_id: PlayerId,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            players: Vec::with_capacity(MAX_PLAYERS),
            next_id: 1,
        }
    }

    /// Seat a new player. Only allowed during `Registration` with a free seat.
    pub fn register(&mut self, name: &str, phase: Phase) -> Result<PlayerId, SessionError> {
        if phase != Phase::Registration {
            return Err(SessionError::WrongPhase(phase));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(SessionError::SessionFull);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.players.push(Player::new(id, String::from(name)));
        Ok(id)
    }

    /// Drop a player and their board. Only allowed during setup.
    pub fn remove(&mut self, id: PlayerId, phase: Phase) -> Result<Player, SessionError> {
        if !phase.is_setup() {
            return Err(SessionError::WrongPhase(phase));
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::UnknownPlayer(id))?;
        Ok(self.players.remove(idx))
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Mark `id` ready. Returns `false` if it was already ready.
    pub fn set_ready(&mut self, id: PlayerId) -> Result<bool, SessionError> {
        let player = self.get_mut(id).ok_or(SessionError::UnknownPlayer(id))?;
        if player.ready {
            return Ok(false);
        }
        player.ready = true;
        Ok(true)
    }

    /// Exactly two players seated and both ready.
    pub fn all_ready(&self) -> bool {
        self.players.len() == MAX_PLAYERS && self.players.iter().all(|p| p.ready)
    }

    /// The other seated player, if any.
    pub fn opponent_of(&self, id: PlayerId) -> Option<&Player> {
        if self.get(id).is_none() {
            return None;
        }
        self.players.iter().find(|p| p.id != id)
    }

    /// Seats in registration order, once both are filled.
    pub fn seats(&self) -> Option<(PlayerId, PlayerId)> {
        match self.players.as_slice() {
            [first, second] => Some((first.id, second.id)),
            _ => None,
        }
    }
}
