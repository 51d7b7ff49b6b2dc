//! Text rendering for the terminal client.

use std::fmt::Write;
use std::string::String;

use crate::board::BoardView;
use crate::common::{PlayerId, SessionError, ShotOutcome};
use crate::config::BOARD_SIZE;
use crate::engine::SessionSnapshot;
use crate::registry::ReadyOutcome;

const GAP: &str = "     ";

/// Own board and enemy board next to each other, columns on top, rows down
/// the side.
pub fn render_side_by_side(own: &BoardView, enemy: &BoardView) -> String {
    let own_text = own.to_string();
    let enemy_text = enemy.to_string();
    let width = 2 + 2 * BOARD_SIZE as usize;

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}{}{}", "Your board", GAP, "Enemy board", width = width);
    for (left, right) in own_text.lines().zip(enemy_text.lines()) {
        let _ = writeln!(out, "{:<width$}{}{}", left, GAP, right, width = width);
    }
    out
}

pub fn describe_shot(outcome: ShotOutcome) -> &'static str {
    match outcome {
        ShotOutcome::Miss => "Miss. Water.",
        ShotOutcome::Hit => "Hit!",
        ShotOutcome::Sunk => "Hit and sunk!",
        ShotOutcome::AlreadyShot => "You already shot there.",
        ShotOutcome::InvalidTurn => "It is not your turn.",
        ShotOutcome::GameAlreadyOver => "The game is already over.",
        ShotOutcome::OutOfBounds => "Coordinates must be between 0 and 9.",
    }
}

pub fn describe_ready(outcome: ReadyOutcome) -> &'static str {
    match outcome {
        ReadyOutcome::Marked => "Marked as ready. Waiting for your opponent...",
        ReadyOutcome::Started => "Both players are ready. The game has started!",
        ReadyOutcome::AlreadyReady => "You are already ready.",
        ReadyOutcome::UnknownPlayer => "The server does not know you any more.",
        ReadyOutcome::NotAccepted => "The game is already under way.",
        ReadyOutcome::NoShips => "Place at least one ship first.",
    }
}

pub fn describe_error(err: &SessionError) -> String {
    format!("Rejected: {}", err)
}

/// One-paragraph status line built from a snapshot.
pub fn render_status(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Phase: {}", snapshot.phase);
    for p in &snapshot.players {
        let _ = writeln!(
            out,
            "  #{} {} - {} ship(s){}",
            p.id,
            p.name,
            p.ships_placed,
            if p.ready { ", ready" } else { "" }
        );
    }
    let name_of = |id: PlayerId| {
        snapshot
            .players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    };
    if let Some(name) = name_of(snapshot.current_turn) {
        let _ = writeln!(out, "Turn: {}", name);
    }
    if let Some(name) = name_of(snapshot.winner) {
        let _ = writeln!(out, "Winner: {}", name);
    }
    out
}
