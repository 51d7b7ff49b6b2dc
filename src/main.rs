#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use naval_battle::{
    cli::{self, ClientContext},
    init_logging, server,
    sim::play_random_game,
    GameApi, GameEngine, LocalApi, Stub, TcpTransport, DEFAULT_FLEET,
};
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Host the game session and wait for two players.
    Serve {
        #[arg(long, default_value = "0.0.0.0:1099")]
        bind: String,
    },
    /// Join a session as a player and play from the terminal.
    Client {
        #[arg(long, default_value = "127.0.0.1:1099")]
        connect: String,
        #[arg(long, help = "Name shown to the other player")]
        name: String,
    },
    /// Print session events as they happen.
    Watch {
        #[arg(long, default_value = "127.0.0.1:1099")]
        connect: String,
    },
    /// Play a random game between two automated players in-process.
    Demo {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let listener = TcpListener::bind(&bind).await?;
            let engine = Arc::new(GameEngine::new());
            server::serve(listener, engine).await?;
        }
        Commands::Client { connect, name } => {
            println!("Connecting to {}...", connect);
            let stub = Stub::new(TcpTransport::connect(&connect).await?);
            let player = stub
                .register_player(&name)
                .await?
                .map_err(|e| anyhow::anyhow!("Registration refused: {}", e))?;
            println!("Registered as player #{}", player);
            cli::run_repl(&stub, ClientContext { player, name }).await?;
        }
        Commands::Watch { connect } => {
            let stub = Stub::new(TcpTransport::connect(&connect).await?);
            let mut events = stub.subscribe().await?;
            println!("Watching session at {}", connect);
            loop {
                match events.next().await {
                    Ok(event) => println!("{:?}", event),
                    Err(e) => {
                        println!("Stream ended: {}", e);
                        break;
                    }
                }
            }
        }
        Commands::Demo { seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            println!("Playing a random game with seed {}", seed);
            let api = LocalApi::new(Arc::new(GameEngine::new()));
            let outcome = play_random_game(&api, ["Alice", "Bob"], &DEFAULT_FLEET, seed).await?;
            println!("{} wins after {} shots", outcome.winner, outcome.shots);
            let own = api.get_board(1).await?.unwrap_or_default();
            let enemy = api.get_enemy_board(1).await?.unwrap_or_default();
            print!("{}", cli::render_side_by_side(&own, &enemy));
        }
    }
    Ok(())
}
