//! Tic-tac-toe - server and terminal client.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_engine::{Board, Player};
use tictactoe_server::{GameClient, ServerConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            database_url,
        } => run_server(config, host, port, database_url).await,
        Command::Play {
            server_url,
            game_id,
            mark,
        } => tictactoe_server::run_tui(server_url, game_id, mark).await,
        Command::List { server_url } => list_games(server_url).await,
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,tictactoe_server=debug,tower_http=debug")
        }))
        .init();

    let config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env()?
    .with_overrides(host, port, database_url);

    info!(
        host = %config.host(),
        port = config.port(),
        database = %config.database_url(),
        "Starting tic-tac-toe server"
    );
    tictactoe_server::serve(&config).await
}

/// Print the games on a server
async fn list_games(server_url: String) -> Result<()> {
    let client = GameClient::new(server_url);
    let games = client.list_games().await?;

    if games.is_empty() {
        println!("No games yet.");
        return Ok(());
    }

    println!("{:>5}  {:<11}  {:<14}  {:>7}  {}", "ID", "BOARD", "STATUS", "VERSION", "UPDATED");
    for game in &games {
        let status = if game.outcome().is_over() {
            game.outcome().to_string()
        } else {
            format!("{} to move", game.next_player())
        };
        println!(
            "{:>5}  {:<11}  {:<14}  {:>7}  {}",
            game.id(),
            compact_board(game.board()),
            status,
            game.version(),
            game.updated_at().format("%Y-%m-%d %H:%M:%S"),
        );
    }
    Ok(())
}

/// One-line board, rows separated by `/`, e.g. `X.O/.X./..O`.
fn compact_board(board: &Board) -> String {
    board
        .cells()
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(Player::X) => 'X',
                    Some(Player::O) => 'O',
                    None => '.',
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/")
}
