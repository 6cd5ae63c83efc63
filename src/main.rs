//! membertable - a terminal admin table for member records
//!
//! Fetches the member list once, then searches, pages, selects, edits and
//! deletes rows locally.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod table;
mod tasks;
mod ui;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::MembersClient;
use crate::app::App;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::events::EventHandler;
use crate::tasks::TaskSpawner;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal admin table for member records")]
struct Cli {
    /// URL of the JSON member list (overrides the config file)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Path to a config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    let terminal = or_undo(enter_alternate_screen(), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    // Put the shell back before the panic message is printed.
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        previous(info);
    }));

    Ok(terminal)
}

fn enter_alternate_screen() -> io::Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Run `undo` if a setup step failed, passing the result through.
fn or_undo<T, E>(
    result: std::result::Result<T, E>,
    undo: impl FnOnce(),
) -> std::result::Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });

    match &cli.url {
        Some(url) => Ok(config.with_source_url(url.as_str())?),
        None => Ok(config),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_dir = logging::init()
        .map_err(|e| eprintln!("Warning: logging disabled: {}", e))
        .ok();

    let result = run(cli).await;
    logging::shutdown();

    if let Err(e) = result {
        eprintln!("Error: {}", e.user_message());
        if let Some(dir) = log_dir {
            eprintln!("Logs: {}", dir.display());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let settings = config.settings;

    let client = MembersClient::new(&settings)?;
    info!(source = %client.url(), "Starting");
    let (tx, mut rx) = mpsc::unbounded_channel();
    TaskSpawner::new(tx).spawn_load_records(client);

    let mut terminal = setup_terminal()?;
    let mut app = App::new(settings.source_url.clone());
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    let result = run_loop(&mut terminal, &mut app, &events, &mut rx);
    restore_terminal(&mut terminal)?;
    result
}

fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    events: &EventHandler,
    rx: &mut mpsc::UnboundedReceiver<tasks::TaskMessage>,
) -> Result<()> {
    while !app.should_quit() {
        while let Ok(message) = rx.try_recv() {
            app.handle_task_message(message);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::config::ConfigError;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "membertable",
            "--url",
            "http://localhost:8080/members.json",
            "--config",
            "/tmp/membertable.toml",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://localhost:8080/members.json"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/membertable.toml")));
    }

    #[test]
    fn test_invalid_config_file_falls_back_to_defaults() {
        let file = config_file("source_url = [not toml");
        let cli = Cli {
            url: None,
            config: Some(file.path().to_path_buf()),
        };
        assert_eq!(load_config(&cli).unwrap(), Config::default());
    }

    #[test]
    fn test_config_file_that_fails_validation_falls_back() {
        let file = config_file("tick_rate_ms = 0");
        let cli = Cli {
            url: None,
            config: Some(file.path().to_path_buf()),
        };
        assert_eq!(load_config(&cli).unwrap(), Config::default());
    }

    #[test]
    fn test_url_flag_overrides_config_file() {
        let file = config_file("source_url = \"https://example.com/a.json\"\ntick_rate_ms = 250");
        let cli = Cli {
            url: Some("http://localhost/members.json".to_string()),
            config: Some(file.path().to_path_buf()),
        };
        let settings = load_config(&cli).unwrap().settings;
        assert_eq!(settings.source_url, "http://localhost/members.json");
        assert_eq!(settings.tick_rate_ms, 250);
    }

    #[test]
    fn test_invalid_url_flag_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            url: Some("nope".to_string()),
            config: Some(dir.path().join("absent.toml")),
        };
        let err = load_config(&cli).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_or_undo_runs_only_on_error() {
        let mut undone = false;
        let ok: std::result::Result<u8, ()> = or_undo(Ok(1), || undone = true);
        assert_eq!(ok, Ok(1));
        assert!(!undone);

        let err: std::result::Result<u8, &str> = or_undo(Err("no tty"), || undone = true);
        assert_eq!(err, Err("no tty"));
        assert!(undone);
    }
}
