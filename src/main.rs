mod analysis;
mod arena;
mod config;
mod error;
mod fetch;
mod models;
mod sprites;
mod ui;
mod utils;

use std::fs::File;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, FetchConfig};
use crate::fetch::{FetchProgress, HttpSource, RosterFetcher};
use crate::models::Pokemon;
use crate::ui::{draw_ui, App, Command};

/// Slot where a background fetch leaves its result for the event loop.
type RosterSlot = Arc<Mutex<Option<Result<Vec<Pokemon>, String>>>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = FetchConfig::from_cli(&cli)?;
    init_tracing(&cli)?;

    let source = HttpSource::new(&config)?;
    if cli.json {
        return print_roster(source, config).await;
    }
    run_tui(source, config)
}

/// Headless mode logs to stderr; the terminal UI only logs to a file.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if cli.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .init();
    } else if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

async fn print_roster(source: HttpSource, config: FetchConfig) -> Result<()> {
    let limit = config.limit;
    let roster = RosterFetcher::new(source, config)
        .fetch_pokemon_roster()
        .await?;
    info!("Fetched {} of {} Pokémon", roster.len(), limit);
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}

fn spawn_fetch(fetcher: &Arc<RosterFetcher<HttpSource>>, slot: &RosterSlot) {
    let fetcher = fetcher.clone();
    let slot = slot.clone();
    tokio::spawn(async move {
        let result = fetcher
            .fetch_pokemon_roster()
            .await
            .map_err(|e| e.to_string());
        if let Ok(mut s) = slot.lock() {
            *s = Some(result);
        }
    });
}

fn run_tui(source: HttpSource, config: FetchConfig) -> Result<()> {
    let sprite_client = source.client().clone();
    let progress = Arc::new(FetchProgress::default());
    let fetcher = Arc::new(RosterFetcher::new(source, config).with_progress(progress.clone()));
    let updated: RosterSlot = Arc::new(Mutex::new(None));
    spawn_fetch(&fetcher, &updated);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::loading(progress);
    let result = event_loop(&mut terminal, &mut app, &fetcher, &updated, &sprite_client);

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    fetcher: &Arc<RosterFetcher<HttpSource>>,
    updated: &RosterSlot,
    sprite_client: &Client,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        draw_ui(terminal, app)?;

        // Pick up a finished background fetch
        let finished = updated.lock().ok().and_then(|mut slot| slot.take());
        match finished {
            Some(Ok(roster)) => {
                info!("Roster ready with {} Pokémon", roster.len());
                app.set_roster(roster);
            }
            Some(Err(message)) => {
                error!("Roster fetch failed: {}", message);
                app.fail(message);
            }
            None => {}
        }

        for url in app.slot_images() {
            app.sprites.request(sprite_client, &url);
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key.code) {
                        Command::Quit => break,
                        Command::Refresh => spawn_fetch(fetcher, updated),
                        Command::None => {}
                    }
                }
                CEvent::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.handle_click(m.column, m.row);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
    Ok(())
}
