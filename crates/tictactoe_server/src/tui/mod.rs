//! Terminal client for the game server.

mod app;
mod client;
mod input;
mod ui;

pub use app::App;
pub use client::{ClientError, GameClient};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tictactoe_engine::Player;
use tracing::{debug, error, info, instrument, warn};

use input::digit_cell;

/// How often the displayed game is re-fetched while idle.
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);
/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the terminal client against `server_url`.
///
/// Opens `game_id` if given, otherwise starts a new game. Logs go to
/// `tictactoe_tui.log` so they don't interfere with the display.
pub async fn run_tui(server_url: String, game_id: Option<i32>, mark: Option<Player>) -> Result<()> {
    let log_file = std::fs::File::create("tictactoe_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %server_url, ?game_id, ?mark, "Starting tic-tac-toe TUI");

    let client = GameClient::new(server_url);
    let game = match game_id {
        Some(id) => client.get_game(id).await?,
        None => client.create_game().await?,
    };

    let mut app = App::new(mark);
    app.set_game(game);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_loop(&mut terminal, &client, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

#[instrument(skip_all, fields(server = %client.base_url()))]
async fn run_loop(terminal: &mut Term, client: &GameClient, app: &mut App) -> Result<()> {
    let mut last_refresh = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if last_refresh.elapsed() >= REFRESH_INTERVAL {
            refresh(client, app).await;
            last_refresh = Instant::now();
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Ok(());
            }
            KeyCode::Char('n') => match client.create_game().await {
                Ok(game) => {
                    app.set_game(game);
                    app.set_message("New game started");
                }
                Err(e) => app.set_message(e.to_string()),
            },
            KeyCode::Char('r') => {
                app.clear_message();
                refresh(client, app).await;
                last_refresh = Instant::now();
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                app.handle_arrow(key.code);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cell = app.cursor();
                play(client, app, cell).await;
                last_refresh = Instant::now();
            }
            KeyCode::Char(c) => {
                if let Some(cell) = digit_cell(c) {
                    app.set_cursor(cell);
                    play(client, app, cell).await;
                    last_refresh = Instant::now();
                }
            }
            _ => {}
        }
    }
}

/// Checks a move locally, submits it, then reloads the game.
async fn play(client: &GameClient, app: &mut App, cell: usize) {
    let request = match app.prepare_move(cell) {
        Ok(request) => request,
        Err(message) => {
            debug!(cell, %message, "Move rejected locally");
            app.set_message(message);
            return;
        }
    };
    let Some(id) = app.game().map(|g| *g.id()) else {
        return;
    };

    match client.submit_move(id, request).await {
        Ok(()) => {
            info!(game_id = id, cell, player = %request.player, "Move played");
            app.clear_message();
        }
        Err(ClientError::Conflict { .. }) => {
            warn!(game_id = id, "Move lost to a concurrent update");
            app.set_message("The game changed before your move landed; board refreshed");
        }
        Err(e) => app.set_message(e.to_string()),
    }
    refresh(client, app).await;
}

async fn refresh(client: &GameClient, app: &mut App) {
    let Some(id) = app.game().map(|g| *g.id()) else {
        return;
    };
    match client.get_game(id).await {
        Ok(game) => app.set_game(game),
        Err(e) => {
            warn!(game_id = id, error = %e, "Refresh failed");
            app.set_message(e.to_string());
        }
    }
}
