#![cfg(feature = "std")]

//! Binding between protocol requests and the in-process engine.

use std::sync::Arc;

use crate::engine::GameEngine;
use crate::protocol::{GameApi, Reply, Request};

/// Run one request against the engine.
///
/// `Subscribe` only has meaning on a connection; here it is acknowledged
/// and nothing else happens.
pub fn dispatch(engine: &GameEngine, request: Request) -> Reply {
    match request {
        Request::RegisterPlayer { name } => Reply::Registered(engine.register_player(&name)),
        Request::PlaceShip {
            player,
            x,
            y,
            size,
            orientation,
        } => Reply::Placed(engine.place_ship(
            player,
            x as usize,
            y as usize,
            size as usize,
            orientation,
        )),
        Request::Shoot { player, x, y } => Reply::Shot(engine.shoot(player, x as usize, y as usize)),
        Request::GetBoard { player } => Reply::Board(engine.get_board(player)),
        Request::GetEnemyBoard { player } => Reply::Board(engine.get_enemy_board(player)),
        Request::GetCurrentTurn => Reply::Turn(engine.get_current_turn()),
        Request::ListPlayers => Reply::Players(engine.list_players()),
        Request::RemovePlayer { player } => Reply::Removed(engine.remove_player(player)),
        Request::SetPlayerReady { player } => Reply::Ready(engine.set_player_ready(player)),
        Request::AllPlayersReady => Reply::Flag(engine.all_players_ready()),
        Request::IsGameOver => Reply::Flag(engine.is_game_over()),
        Request::GetWinner => Reply::Winner(engine.get_winner()),
        Request::Snapshot => Reply::Snapshot(engine.snapshot()),
        Request::Subscribe => Reply::Subscribed,
    }
}

/// `GameApi` served directly by a shared engine, no transport involved.
#[derive(Clone, Default)]
pub struct LocalApi {
    engine: Arc<GameEngine>,
}

impl LocalApi {
    pub fn new(engine: Arc<GameEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait::async_trait]
impl GameApi for LocalApi {
    async fn call(&self, request: Request) -> anyhow::Result<Reply> {
        Ok(dispatch(&self.engine, request))
    }
}
