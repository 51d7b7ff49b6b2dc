#![cfg(feature = "std")]

//! Request/reply vocabulary between clients and the session engine, and the
//! typed `GameApi` built on top of it.

use std::string::String;
use std::vec::Vec;

use crate::board::BoardView;
use crate::common::{PlayerId, SessionError, ShotOutcome};
use crate::engine::{SessionEvent, SessionSnapshot};
use crate::registry::ReadyOutcome;
use crate::ship::Orientation;

/// Current protocol version. Peers must agree during the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// One engine operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Request {
    RegisterPlayer { name: String },
    PlaceShip {
        player: PlayerId,
        x: u8,
        y: u8,
        size: u8,
        orientation: Orientation,
    },
    Shoot { player: PlayerId, x: u8, y: u8 },
    GetBoard { player: PlayerId },
    GetEnemyBoard { player: PlayerId },
    GetCurrentTurn,
    ListPlayers,
    RemovePlayer { player: PlayerId },
    SetPlayerReady { player: PlayerId },
    AllPlayersReady,
    IsGameOver,
    GetWinner,
    Snapshot,
    /// Turn this connection into an event stream.
    Subscribe,
}

/// Engine answer to a [`Request`]. Domain rejections travel as values.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Reply {
    Registered(Result<PlayerId, SessionError>),
    Placed(Result<(), SessionError>),
    Shot(ShotOutcome),
    Board(Option<BoardView>),
    Turn(Option<String>),
    Players(Vec<String>),
    Removed(Result<(), SessionError>),
    Ready(ReadyOutcome),
    Flag(bool),
    Winner(Option<String>),
    Snapshot(Option<SessionSnapshot>),
    Subscribed,
}

/// Frames exchanged over a transport.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// Handshake, sent by the client and echoed by the server.
    Hello { version: u32 },
    Call { seq: u64, request: Request },
    Return { seq: u64, reply: Reply },
    Event(SessionEvent),
}

fn unexpected(reply: Reply) -> anyhow::Error {
    anyhow::anyhow!("Unexpected reply: {:?}", reply)
}

/// Typed engine operations over some request/reply channel.
///
/// The outer `Result` carries transport faults only; domain rejections are
/// returned inside the `Ok` value.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    async fn call(&self, request: Request) -> anyhow::Result<Reply>;

    async fn register_player(&self, name: &str) -> anyhow::Result<Result<PlayerId, SessionError>> {
        match self
            .call(Request::RegisterPlayer {
                name: String::from(name),
            })
            .await?
        {
            Reply::Registered(res) => Ok(res),
            other => Err(unexpected(other)),
        }
    }

    async fn place_ship(
        &self,
        player: PlayerId,
        x: u8,
        y: u8,
        size: u8,
        orientation: Orientation,
    ) -> anyhow::Result<Result<(), SessionError>> {
        let request = Request::PlaceShip {
            player,
            x,
            y,
            size,
            orientation,
        };
        match self.call(request).await? {
            Reply::Placed(res) => Ok(res),
            other => Err(unexpected(other)),
        }
    }

    async fn shoot(&self, player: PlayerId, x: u8, y: u8) -> anyhow::Result<ShotOutcome> {
        match self.call(Request::Shoot { player, x, y }).await? {
            Reply::Shot(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    async fn get_board(&self, player: PlayerId) -> anyhow::Result<Option<BoardView>> {
        match self.call(Request::GetBoard { player }).await? {
            Reply::Board(view) => Ok(view),
            other => Err(unexpected(other)),
        }
    }

    async fn get_enemy_board(&self, player: PlayerId) -> anyhow::Result<Option<BoardView>> {
        match self.call(Request::GetEnemyBoard { player }).await? {
            Reply::Board(view) => Ok(view),
            other => Err(unexpected(other)),
        }
    }

    async fn get_current_turn(&self) -> anyhow::Result<Option<String>> {
        match self.call(Request::GetCurrentTurn).await? {
            Reply::Turn(name) => Ok(name),
            other => Err(unexpected(other)),
        }
    }

    async fn list_players(&self) -> anyhow::Result<Vec<String>> {
        match self.call(Request::ListPlayers).await? {
            Reply::Players(names) => Ok(names),
            other => Err(unexpected(other)),
        }
    }

    async fn remove_player(&self, player: PlayerId) -> anyhow::Result<Result<(), SessionError>> {
        match self.call(Request::RemovePlayer { player }).await? {
            Reply::Removed(res) => Ok(res),
            other => Err(unexpected(other)),
        }
    }

    async fn set_player_ready(&self, player: PlayerId) -> anyhow::Result<ReadyOutcome> {
        match self.call(Request::SetPlayerReady { player }).await? {
            Reply::Ready(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    async fn all_players_ready(&self) -> anyhow::Result<bool> {
        match self.call(Request::AllPlayersReady).await? {
            Reply::Flag(flag) => Ok(flag),
            other => Err(unexpected(other)),
        }
    }

    async fn is_game_over(&self) -> anyhow::Result<bool> {
        match self.call(Request::IsGameOver).await? {
            Reply::Flag(flag) => Ok(flag),
            other => Err(unexpected(other)),
        }
    }

    async fn get_winner(&self) -> anyhow::Result<Option<String>> {
        match self.call(Request::GetWinner).await? {
            Reply::Winner(name) => Ok(name),
            other => Err(unexpected(other)),
        }
    }

    async fn snapshot(&self) -> anyhow::Result<Option<SessionSnapshot>> {
        match self.call(Request::Snapshot).await? {
            Reply::Snapshot(snapshot) => Ok(snapshot),
            other => Err(unexpected(other)),
        }
    }
}
