#![cfg(feature = "std")]

use std::sync::Arc;

use naval_battle::cli::{execute, parse_command, render_side_by_side, ClientContext, Command};
use naval_battle::{BoardView, GameApi, GameEngine, LocalApi, Orientation};

fn ctx(player: u32, name: &str) -> ClientContext {
    ClientContext {
        player,
        name: name.to_string(),
    }
}

#[test]
fn test_parse_commands() {
    assert_eq!(
        parse_command("place 1 2 3 h"),
        Ok(Command::Place {
            x: 1,
            y: 2,
            size: 3,
            orientation: Orientation::Horizontal
        })
    );
    assert_eq!(parse_command("  s 0 9 "), Ok(Command::Shoot { x: 0, y: 9 }));
    assert_eq!(parse_command("FIRE 4 4"), Ok(Command::Shoot { x: 4, y: 4 }));
    assert_eq!(parse_command("auto"), Ok(Command::Auto));
    assert_eq!(parse_command("r"), Ok(Command::Ready));
    assert_eq!(parse_command("?"), Ok(Command::Help));
    assert_eq!(parse_command("exit"), Ok(Command::Quit));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_command(""), Err("Empty input".to_string()));
    assert!(parse_command("shoot 10 0").unwrap_err().contains("out of bounds"));
    assert!(parse_command("shoot a 0").unwrap_err().contains("Invalid x"));
    assert_eq!(parse_command("shoot 1"), Err("Missing y".to_string()));
    assert_eq!(
        parse_command("place 1 1 3 D"),
        Err("Orientation must be H or V".to_string())
    );
    assert_eq!(
        parse_command("board now"),
        Err("Too many arguments".to_string())
    );
    assert_eq!(
        parse_command("dance"),
        Err("Unknown command 'dance'. Type 'help'.".to_string())
    );
}

#[test]
fn test_side_by_side_has_both_headers() {
    let text = render_side_by_side(&BoardView::default(), &BoardView::default());
    let first = text.lines().next().unwrap();
    assert!(first.starts_with("Your board"));
    assert!(first.contains("Enemy board"));
    assert_eq!(text.lines().count(), 12);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_execute_full_game() -> anyhow::Result<()> {
    let api = LocalApi::new(Arc::new(GameEngine::new()));
    let alice = ctx(api.register_player("Alice").await?.unwrap(), "Alice");
    let bob = ctx(api.register_player("Bob").await?.unwrap(), "Bob");

    let placed = execute(&api, &alice, parse_command("place 0 0 1 H").unwrap()).await?;
    assert_eq!(placed, "Ship of size 1 placed at (0, 0).");
    let rejected = execute(&api, &alice, parse_command("place 0 0 2 V").unwrap()).await?;
    assert!(rejected.starts_with("Rejected:"));
    execute(&api, &bob, parse_command("place 5 5 1 V").unwrap()).await?;

    let players = execute(&api, &alice, Command::Players).await?;
    assert_eq!(players, "Players: Alice, Bob");
    let early = execute(&api, &alice, Command::Turn).await?;
    assert_eq!(early, "The game has not started.");

    execute(&api, &alice, Command::Ready).await?;
    let started = execute(&api, &bob, Command::Ready).await?;
    assert!(started.contains("started"));
    assert_eq!(execute(&api, &alice, Command::Turn).await?, "Turn: Alice (you)");
    assert_eq!(execute(&api, &bob, Command::Turn).await?, "Turn: Alice");

    let not_yours = execute(&api, &bob, Command::Shoot { x: 0, y: 0 }).await?;
    assert_eq!(not_yours, "It is not your turn.");
    let miss = execute(&api, &alice, Command::Shoot { x: 9, y: 9 }).await?;
    assert_eq!(miss, "Miss. Water.\nTurn: Bob");
    let win = execute(&api, &bob, Command::Shoot { x: 0, y: 0 }).await?;
    assert_eq!(win, "Hit and sunk!\nGame over. The winner is: Bob");

    assert_eq!(
        execute(&api, &alice, Command::Winner).await?,
        "The winner is: Bob"
    );
    let status = execute(&api, &alice, Command::Status).await?;
    assert!(status.contains("Phase: Finished"));
    assert!(status.contains("Winner: Bob"));
    let leave = execute(&api, &alice, Command::Leave).await?;
    assert!(leave.starts_with("Rejected:"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_execute_auto_places_default_fleet() -> anyhow::Result<()> {
    let api = LocalApi::new(Arc::new(GameEngine::new()));
    let alice = ctx(api.register_player("Alice").await?.unwrap(), "Alice");

    let text = execute(&api, &alice, Command::Auto).await?;
    assert!(text.starts_with("Placed 3 ships."));
    let snapshot = api.snapshot().await?.unwrap();
    assert_eq!(snapshot.players[0].ships_placed, 3);
    assert_eq!(
        execute(&api, &alice, Command::Winner).await?,
        "No winner yet."
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_auto_before_opponent_joins() -> anyhow::Result<()> {
    let api = LocalApi::new(Arc::new(GameEngine::new()));
    let alice = ctx(api.register_player("Alice").await?.unwrap(), "Alice");
    execute(&api, &alice, Command::Auto).await?;

    let bob = ctx(api.register_player("Bob").await?.unwrap(), "Bob");
    execute(&api, &bob, Command::Auto).await?;
    execute(&api, &alice, Command::Ready).await?;
    let started = execute(&api, &bob, Command::Ready).await?;
    assert!(started.contains("started"));
    assert_eq!(execute(&api, &bob, Command::Turn).await?, "Turn: Alice");
    Ok(())
}
