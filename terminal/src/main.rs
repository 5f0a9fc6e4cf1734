use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use terminal::app::{App, AppCommand};

const REPLAY_DIR_ENV: &str = "BOOJUM_REPLAY_DIR";
const DEFAULT_REPLAY_DIR: &str = "/tmp/boojum_replays";
const FRAME_POLL: Duration = Duration::from_millis(16);

/// Replay directory: first CLI argument, then the environment, then the default.
fn replay_dir() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(REPLAY_DIR_ENV).ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPLAY_DIR))
}

fn init_logging() -> Result<PathBuf> {
    // The TUI owns stdout, so logs go to a file.
    let log_path = std::env::temp_dir().join("boojum-terminal.log");
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {:?}", log_path))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(log_path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;

    let replay_dir = replay_dir();
    println!("Looking for replays in: {:?} (log: {:?})", replay_dir, log_path);

    if !replay_dir.exists() {
        eprintln!("Replay directory does not exist, creating {:?}", replay_dir);
        std::fs::create_dir_all(&replay_dir)
            .with_context(|| format!("Failed to create replay directory: {:?}", replay_dir))?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = App::new(replay_dir).and_then(|mut app| run_app(&mut terminal, &mut app));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Viewer exited with error: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.update(Instant::now());

        terminal.draw(|f| app.render(f))?;

        if event::poll(FRAME_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = app.handle_input(key, Instant::now()) {
                    match command {
                        AppCommand::Quit => return Ok(()),
                        _ => {
                            if let Err(err) = app.handle_command(command) {
                                // A bad replay file should not take the viewer down.
                                tracing::warn!("Command failed: {:?}", err);
                            }
                        }
                    }
                }
            }
        }
    }
}
