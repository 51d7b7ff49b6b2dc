#![cfg(feature = "std")]

//! Automated players: random fleet placement and random shooting, driven
//! through any `GameApi`.

use std::string::String;
use std::vec::Vec;

use anyhow::{anyhow, bail};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::common::{Cell, PlayerId, ShotOutcome};
use crate::config::BOARD_SIZE;
use crate::protocol::GameApi;
use crate::ship::Orientation;

/// Upper bound on shots per game; a game that runs longer is stuck.
const MAX_SHOTS: usize = 2 * (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Place ships of `sizes` at random free positions on `player`'s board.
///
/// The current server-side board is read first so the new ships avoid
/// whatever is already there.
pub async fn place_random_fleet<A, R>(
    api: &A,
    player: PlayerId,
    rng: &mut R,
    sizes: &[usize],
) -> anyhow::Result<Vec<(usize, usize, usize, Orientation)>>
where
    A: GameApi + ?Sized,
    R: Rng,
{
    let view = api
        .get_board(player)
        .await?
        .ok_or_else(|| anyhow!("Player #{} is not registered", player))?;
    let mut scratch = Board::new();
    for (y, row) in view.rows.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell != Cell::Empty {
                scratch
                    .place_ship(x, y, 1, Orientation::Horizontal)
                    .map_err(|e| anyhow!(e))?;
            }
        }
    }

    let mut placed = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let (x, y, orient) = scratch
            .random_placement(rng, size)
            .map_err(|e| anyhow!(e))?;
        scratch
            .place_ship(x, y, size, orient)
            .map_err(|e| anyhow!(e))?;
        api.place_ship(player, x as u8, y as u8, size as u8, orient)
            .await?
            .map_err(|e| anyhow!(e))?;
        placed.push((x, y, size, orient));
    }
    Ok(placed)
}

/// Random untouched cell on the enemy board.
pub fn pick_target<R: Rng>(rng: &mut R, enemy: &crate::board::BoardView) -> Option<(usize, usize)> {
    let open: Vec<(usize, usize)> = (0..BOARD_SIZE as usize)
        .flat_map(|y| (0..BOARD_SIZE as usize).map(move |x| (x, y)))
        .filter(|&(x, y)| enemy.get(x, y) == Some(Cell::Empty))
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Result of a simulated game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimOutcome {
    pub winner: String,
    pub shots: usize,
}

/// Register two random players, place `fleet` for each and shoot at random
/// until one fleet is gone.
pub async fn play_random_game<A: GameApi + ?Sized>(
    api: &A,
    names: [&str; 2],
    fleet: &[usize],
    seed: u64,
) -> anyhow::Result<SimOutcome> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut ids = [0; 2];
    for (slot, name) in ids.iter_mut().zip(names) {
        *slot = api.register_player(name).await?.map_err(|e| anyhow!(e))?;
    }
    for &id in &ids {
        place_random_fleet(api, id, &mut rng, fleet).await?;
    }
    for &id in &ids {
        api.set_player_ready(id).await?;
    }

    let mut shots = 0;
    while !api.is_game_over().await? {
        if shots >= MAX_SHOTS {
            bail!("No winner after {} shots", shots);
        }
        let snapshot = api
            .snapshot()
            .await?
            .ok_or_else(|| anyhow!("Session vanished"))?;
        let shooter = snapshot.current_turn;
        let enemy = api
            .get_enemy_board(shooter)
            .await?
            .ok_or_else(|| anyhow!("No board for #{}", shooter))?;
        let (x, y) = pick_target(&mut rng, &enemy).ok_or_else(|| anyhow!("No cells left"))?;
        let outcome = api.shoot(shooter, x as u8, y as u8).await?;
        if !outcome.is_resolved() {
            bail!("Shot by #{} at ({}, {}) rejected: {}", shooter, x, y, outcome);
        }
        if outcome == ShotOutcome::Sunk {
            info!("#{} sank a ship at ({}, {})", shooter, x, y);
        }
        shots += 1;
    }

    let winner = api
        .get_winner()
        .await?
        .ok_or_else(|| anyhow!("Finished without a winner"))?;
    Ok(SimOutcome { winner, shots })
}
