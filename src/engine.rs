#![cfg(feature = "std")]

//! The authoritative session engine.
//!
//! `GameEngine` owns the single game session behind one `RwLock`. Every
//! mutating operation takes the write lock, validates fully, then commits,
//! so a rejected call is a true no-op and no reader ever sees a half-applied
//! shot. Read-only operations share the read lock. Nothing here blocks on
//! I/O; the critical sections are a handful of bit operations.
//!
//! State changes are also published on a broadcast channel so clients can
//! follow the game without polling.

use std::string::String;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::vec::Vec;

use log::{debug, error, info};
use tokio::sync::broadcast;

use crate::board::BoardView;
use crate::common::{BoardError, PlayerId, SessionError, ShotOutcome};
use crate::config::{BOARD_SIZE, EVENT_CAPACITY, NO_PLAYER};
use crate::registry::{ReadyOutcome, SessionRegistry};
use crate::ship::Orientation;
use crate::turn::{Phase, TurnController, TurnError};

/// Pushed to subscribers after each committed change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SessionEvent {
    PlayerRegistered { id: PlayerId, name: String },
    PlayerRemoved { id: PlayerId },
    PlayerReady { id: PlayerId },
    GameStarted { first: PlayerId },
    ShotResolved {
        shooter: PlayerId,
        x: u8,
        y: u8,
        outcome: ShotOutcome,
    },
    TurnChanged { player: PlayerId },
    GameOver { winner: PlayerId },
}

/// Public facts about one seated player.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub ready: bool,
    pub ships_placed: usize,
}

/// Consistent read of the whole session taken under one lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub players: Vec<PlayerInfo>,
    pub current_turn: PlayerId,
    pub winner: PlayerId,
}

#[derive(Debug, Default)]
struct GameSession {
    registry: SessionRegistry,
    turns: TurnController,
}

impl GameSession {
    fn name_of(&self, id: PlayerId) -> Option<String> {
        if id == NO_PLAYER {
            return None;
        }
        self.registry.get(id).map(|p| p.name.clone())
    }
}

pub struct GameEngine {
    session: RwLock<Option<GameSession>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// An engine with no session yet; it is created on first registration.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            session: RwLock::new(None),
            events,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<GameSession>> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<GameSession>> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: SessionEvent) {
        // No receivers is not an error.
        let _ = self.events.send(event);
    }

    /// Receive every event committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn register_player(&self, name: &str) -> Result<PlayerId, SessionError> {
        let mut guard = self.write();
        let session = guard.get_or_insert_with(GameSession::default);
        let phase = session.turns.phase();
        match session.registry.register(name, phase) {
            Ok(id) => {
                if session.registry.seats().is_some()
                    && session
                        .registry
                        .players()
                        .iter()
                        .any(|p| !p.board().ships().is_empty())
                {
                    session.turns.begin_placement();
                }
                info!("Registered player {} as #{}", name, id);
                self.publish(SessionEvent::PlayerRegistered {
                    id,
                    name: String::from(name),
                });
                Ok(id)
            }
            Err(e) => {
                debug!("Rejected registration of {}: {}", name, e);
                Err(e)
            }
        }
    }

    pub fn place_ship(
        &self,
        player: PlayerId,
        x: usize,
        y: usize,
        size: usize,
        orientation: Orientation,
    ) -> Result<(), SessionError> {
        let mut guard = self.write();
        let session = guard.as_mut().ok_or(SessionError::UnknownPlayer(player))?;
        let phase = session.turns.phase();
        if !phase.is_setup() {
            debug!("Player #{} tried to place a ship during {}", player, phase);
            return Err(SessionError::WrongPhase(phase));
        }
        let entry = session
            .registry
            .get_mut(player)
            .ok_or(SessionError::UnknownPlayer(player))?;
        if let Err(e) = entry.board_mut().place_ship(x, y, size, orientation) {
            debug!(
                "Player #{} placement ({}, {}) size {} {:?} rejected: {}",
                player, x, y, size, orientation, e
            );
            return Err(e.into());
        }
        // Registration stays open until both seats are filled.
        if session.registry.seats().is_some() {
            session.turns.begin_placement();
        }
        info!(
            "Player #{} placed a size {} ship at ({}, {}) {}",
            player,
            size,
            x,
            y,
            orientation.token()
        );
        Ok(())
    }

    /// Like [`GameEngine::place_ship`] with a textual `H`/`V` orientation.
    pub fn place_ship_token(
        &self,
        player: PlayerId,
        x: usize,
        y: usize,
        size: usize,
        orientation: &str,
    ) -> Result<(), SessionError> {
        let orientation: Orientation = orientation.parse().map_err(SessionError::Board)?;
        self.place_ship(player, x, y, size, orientation)
    }

    /// Fire at the opponent of `player`.
    pub fn shoot(&self, player: PlayerId, x: usize, y: usize) -> ShotOutcome {
        let mut guard = self.write();
        let Some(session) = guard.as_mut() else {
            return ShotOutcome::InvalidTurn;
        };
        match session.turns.check(player) {
            Ok(()) => {}
            Err(TurnError::Finished) => return ShotOutcome::GameAlreadyOver,
            Err(e) => {
                debug!("Shot by #{} rejected: {:?}", player, e);
                return ShotOutcome::InvalidTurn;
            }
        }
        let n = BOARD_SIZE as usize;
        if x >= n || y >= n {
            return ShotOutcome::OutOfBounds;
        }
        let Some(target) = session.turns.opponent_of(player) else {
            return ShotOutcome::InvalidTurn;
        };
        let Some(opponent) = session.registry.get_mut(target) else {
            error!("Seated opponent #{} of #{} is not registered", target, player);
            return ShotOutcome::InvalidTurn;
        };

        let outcome = match opponent.board_mut().receive_shot(x, y) {
            Ok(outcome) => outcome,
            Err(BoardError::ShotOutOfBounds) => return ShotOutcome::OutOfBounds,
            Err(e) => {
                error!("Board of #{} rejected shot at ({}, {}): {}", target, x, y, e);
                return ShotOutcome::InvalidTurn;
            }
        };
        if !outcome.is_resolved() {
            return outcome;
        }
        let fleet_destroyed = opponent.board().is_fleet_destroyed();

        info!("Player #{} shot ({}, {}): {}", player, x, y, outcome);
        self.publish(SessionEvent::ShotResolved {
            shooter: player,
            x: x as u8,
            y: y as u8,
            outcome,
        });
        let next = session.turns.advance();
        if fleet_destroyed {
            session.turns.finish(player);
            info!("Player #{} wins", player);
            self.publish(SessionEvent::GameOver { winner: player });
        } else {
            self.publish(SessionEvent::TurnChanged { player: next });
        }
        outcome
    }

    /// Owner's view of their board, ships included.
    pub fn get_board(&self, player: PlayerId) -> Option<BoardView> {
        let guard = self.read();
        let session = guard.as_ref()?;
        session.registry.get(player).map(|p| p.board().own_view())
    }

    /// The opponent's board with intact ships hidden. Open water until an
    /// opponent has registered.
    pub fn get_enemy_board(&self, player: PlayerId) -> Option<BoardView> {
        let guard = self.read();
        let session = guard.as_ref()?;
        session.registry.get(player)?;
        Some(
            session
                .registry
                .opponent_of(player)
                .map(|p| p.board().opponent_view())
                .unwrap_or_default(),
        )
    }

    /// Name of the player who moves next, `None` unless playing.
    pub fn get_current_turn(&self) -> Option<String> {
        let guard = self.read();
        let session = guard.as_ref()?;
        session.name_of(session.turns.current())
    }

    pub fn current_turn_id(&self) -> PlayerId {
        self.read()
            .as_ref()
            .map_or(NO_PLAYER, |s| s.turns.current())
    }

    pub fn list_players(&self) -> Vec<String> {
        self.read()
            .as_ref()
            .map(|s| s.registry.names())
            .unwrap_or_default()
    }

    pub fn remove_player(&self, player: PlayerId) -> Result<(), SessionError> {
        let mut guard = self.write();
        let session = guard.as_mut().ok_or(SessionError::UnknownPlayer(player))?;
        let removed = match session.registry.remove(player, session.turns.phase()) {
            Ok(p) => p,
            Err(e) => {
                debug!("Removal of #{} rejected: {}", player, e);
                return Err(e);
            }
        };
        if session.registry.seats().is_none() {
            session.turns.reopen_registration();
        }
        info!("Removed player {} (#{})", removed.name, removed.id);
        self.publish(SessionEvent::PlayerRemoved { id: player });
        Ok(())
    }

    /// Mark `player` ready; starts play once both seats are ready.
    pub fn set_player_ready(&self, player: PlayerId) -> ReadyOutcome {
        let mut guard = self.write();
        let Some(session) = guard.as_mut() else {
            return ReadyOutcome::UnknownPlayer;
        };
        let Some(entry) = session.registry.get(player) else {
            return ReadyOutcome::UnknownPlayer;
        };
        if entry.ready {
            return ReadyOutcome::AlreadyReady;
        }
        if !session.turns.phase().is_setup() {
            return ReadyOutcome::NotAccepted;
        }
        if entry.board().ships().is_empty() {
            debug!("Player #{} signalled ready with an empty fleet", player);
            return ReadyOutcome::NoShips;
        }
        if !matches!(session.registry.set_ready(player), Ok(true)) {
            return ReadyOutcome::AlreadyReady;
        }
        info!("Player #{} is ready", player);
        self.publish(SessionEvent::PlayerReady { id: player });

        if !session.registry.all_ready() {
            return ReadyOutcome::Marked;
        }
        let Some((first, second)) = session.registry.seats() else {
            return ReadyOutcome::Marked;
        };
        session.turns.start(first, second);
        info!("Game started; #{} moves first", first);
        self.publish(SessionEvent::GameStarted { first });
        ReadyOutcome::Started
    }

    pub fn all_players_ready(&self) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|s| s.registry.all_ready())
    }

    pub fn is_game_over(&self) -> bool {
        self.phase() == Phase::Finished
    }

    /// Winner's name, `None` until the game is finished.
    pub fn get_winner(&self) -> Option<String> {
        let guard = self.read();
        let session = guard.as_ref()?;
        session.name_of(session.turns.winner())
    }

    pub fn winner_id(&self) -> PlayerId {
        self.read()
            .as_ref()
            .map_or(NO_PLAYER, |s| s.turns.winner())
    }

    pub fn phase(&self) -> Phase {
        self.read()
            .as_ref()
            .map_or(Phase::Registration, |s| s.turns.phase())
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let guard = self.read();
        let session = guard.as_ref()?;
        let players = session
            .registry
            .players()
            .iter()
            .map(|p| PlayerInfo {
                id: p.id,
                name: p.name.clone(),
                ready: p.ready,
                ships_placed: p.board().ships().len(),
            })
            .collect();
        Some(SessionSnapshot {
            phase: session.turns.phase(),
            players,
            current_turn: session.turns.current(),
            winner: session.turns.winner(),
        })
    }
}
