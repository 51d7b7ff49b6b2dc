//! Line-oriented terminal client.
//!
//! The client keeps its identity in a [`ClientContext`] value handed to every
//! command; nothing about the session is stored globally.

#![cfg(feature = "std")]

pub mod interface;

use std::io::Write;
use std::string::{String, ToString};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::common::PlayerId;
use crate::config::{BOARD_SIZE, DEFAULT_FLEET};
use crate::protocol::GameApi;
use crate::ship::Orientation;
use crate::sim::place_random_fleet;

pub use interface::*;

/// Who this client is playing as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub player: PlayerId,
    pub name: String,
}

/// Parsed user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place {
        x: u8,
        y: u8,
        size: u8,
        orientation: Orientation,
    },
    Auto,
    Shoot { x: u8, y: u8 },
    Board,
    Enemy,
    Turn,
    Players,
    Ready,
    Status,
    Winner,
    Leave,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  place <x> <y> <size> <H|V>   place a ship (x = column, y = row, 0-9)
  auto                         place the standard fleet (2, 3, 4) at random
  ready                        signal that your fleet is in position
  shoot <x> <y>                fire at the enemy board
  board                        show both boards
  enemy                        show the enemy board
  turn                         whose turn it is
  players                      list registered players
  status                       session summary
  winner                       show the winner
  leave                        leave the session (setup only)
  quit                         exit the client";

fn parse_coord(token: Option<&str>, what: &str) -> Result<u8, String> {
    let token = token.ok_or_else(|| format!("Missing {}", what))?;
    let value: u8 = token
        .parse()
        .map_err(|_| format!("Invalid {} '{}' - must be a number 0-9", what, token))?;
    if value >= BOARD_SIZE {
        return Err(format!("{} {} out of bounds - must be 0-9", what, value));
    }
    Ok(value)
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().ok_or_else(|| "Empty input".to_string())?;
    let cmd = match verb.to_ascii_lowercase().as_str() {
        "place" | "p" => {
            let x = parse_coord(parts.next(), "x")?;
            let y = parse_coord(parts.next(), "y")?;
            let size_token = parts.next().ok_or("Missing size")?;
            let size: u8 = size_token
                .parse()
                .map_err(|_| format!("Invalid size '{}'", size_token))?;
            let orientation: Orientation = parts
                .next()
                .ok_or("Missing orientation")?
                .parse()
                .map_err(|_| "Orientation must be H or V".to_string())?;
            Command::Place {
                x,
                y,
                size,
                orientation,
            }
        }
        "auto" => Command::Auto,
        "shoot" | "s" | "fire" => {
            let x = parse_coord(parts.next(), "x")?;
            let y = parse_coord(parts.next(), "y")?;
            Command::Shoot { x, y }
        }
        "board" | "b" => Command::Board,
        "enemy" | "e" => Command::Enemy,
        "turn" | "t" => Command::Turn,
        "players" => Command::Players,
        "ready" | "r" => Command::Ready,
        "status" => Command::Status,
        "winner" => Command::Winner,
        "leave" => Command::Leave,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    if parts.next().is_some() {
        return Err("Too many arguments".to_string());
    }
    Ok(cmd)
}

/// Run one command and return the text to show. Transport faults are errors;
/// game rejections are part of the text.
pub async fn execute<A: GameApi + ?Sized>(
    api: &A,
    ctx: &ClientContext,
    command: Command,
) -> anyhow::Result<String> {
    let me = ctx.player;
    let text = match command {
        Command::Place {
            x,
            y,
            size,
            orientation,
        } => match api.place_ship(me, x, y, size, orientation).await? {
            Ok(()) => format!("Ship of size {} placed at ({}, {}).", size, x, y),
            Err(e) => describe_error(&e),
        },
        Command::Auto => {
            let mut rng = SmallRng::from_rng(&mut rand::rng());
            match place_random_fleet(api, me, &mut rng, &DEFAULT_FLEET).await {
                Ok(placed) => {
                    let own = api.get_board(me).await?.unwrap_or_default();
                    format!("Placed {} ships.\n{}", placed.len(), own)
                }
                Err(e) => format!("Could not place the fleet: {}", e),
            }
        }
        Command::Shoot { x, y } => {
            let outcome = api.shoot(me, x, y).await?;
            let mut text = describe_shot(outcome).to_string();
            if api.is_game_over().await? {
                if let Some(winner) = api.get_winner().await? {
                    text.push_str(&format!("\nGame over. The winner is: {}", winner));
                }
            } else if outcome.is_resolved() {
                if let Some(next) = api.get_current_turn().await? {
                    text.push_str(&format!("\nTurn: {}", next));
                }
            }
            text
        }
        Command::Board => {
            let own = api.get_board(me).await?.unwrap_or_default();
            let enemy = api.get_enemy_board(me).await?.unwrap_or_default();
            render_side_by_side(&own, &enemy)
        }
        Command::Enemy => api
            .get_enemy_board(me)
            .await?
            .unwrap_or_default()
            .to_string(),
        Command::Turn => match api.get_current_turn().await? {
            Some(name) if name == ctx.name => format!("Turn: {} (you)", name),
            Some(name) => format!("Turn: {}", name),
            None => "The game has not started.".to_string(),
        },
        Command::Players => format!("Players: {}", api.list_players().await?.join(", ")),
        Command::Ready => describe_ready(api.set_player_ready(me).await?).to_string(),
        Command::Status => match api.snapshot().await? {
            Some(snapshot) => render_status(&snapshot),
            None => "No session yet.".to_string(),
        },
        Command::Winner => match api.get_winner().await? {
            Some(name) => format!("The winner is: {}", name),
            None => "No winner yet.".to_string(),
        },
        Command::Leave => match api.remove_player(me).await? {
            Ok(()) => "You left the session.".to_string(),
            Err(e) => describe_error(&e),
        },
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(text)
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run_repl<A: GameApi + ?Sized>(api: &A, ctx: ClientContext) -> anyhow::Result<()> {
    println!("Welcome {} (player #{}). Place your ships; type 'help'.", ctx.name, ctx.player);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => println!("{}", execute(api, &ctx, command).await?),
            Err(msg) => println!("{}", msg),
        }
    }
    Ok(())
}
