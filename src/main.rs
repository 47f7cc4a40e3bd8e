//! tempconv - Temperature Converter
//!
//! A TUI form for converting temperatures between Celsius, Fahrenheit,
//! and Kelvin.
//!
//! Features:
//! - Interactive form with value input and unit selectors
//! - Numeric result (two decimals) plus the formula applied
//! - Conversion history with persistence
//! - One-shot CLI mode for scripting
//!
//! Usage: tempconv [<value> <from> <to>]

mod app;
mod config;
mod convert;
mod history;
mod types;
mod ui;

use anyhow::{anyhow, bail, Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use types::{format_temperature, Unit};

fn main() -> Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("tempconv {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // One-shot mode: convert on the command line without entering the TUI
    let result = if args.is_empty() {
        run_app()
    } else {
        convert_once(&args)
    };

    // Always try to restore terminal state, even on error
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"tempconv - Temperature Converter

USAGE:
    tempconv                     Start the interactive form
    tempconv <value> <from> <to> Convert once and exit
                                 (units: c/celsius, f/fahrenheit, k/kelvin)

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    1-3              Switch tabs
    Tab              Cycle focus (Value / From / To)
    ◂ ▸ or h/l       Cycle unit in focused selector
    Enter            Convert
    x                Clear the form
    j/k              Navigate (History, Settings)
    d                Delete entry (History tab)
    q                Quit

TABS:
    [1] Convert      The conversion form
    [2] History      Browse and reuse past conversions
    [3] Settings     Configure theme, default units, and history

CONFIG:
    ~/.config/tempconv/config.toml
    ~/.local/share/tempconv/history.json
"#
    );
}

/// One-shot mode: `tempconv <value> <from> <to>`
fn convert_once(args: &[String]) -> Result<()> {
    if args.len() != 3 {
        bail!("Expected <value> <from> <to>, e.g.: tempconv 100 c f (see --help)");
    }

    let value: f64 = args[0]
        .parse()
        .map_err(|_| anyhow!("'{}' is not a number", args[0]))?;
    if !value.is_finite() {
        bail!("'{}' is not a finite value", args[0]);
    }

    let from: Unit = args[1].parse().map_err(|e: String| anyhow!(e))?;
    let to: Unit = args[2].parse().map_err(|e: String| anyhow!(e))?;

    let result = convert::convert(value, from, to);
    println!(
        "{} = {}",
        format_temperature(value, from),
        format_temperature(result, to)
    );
    println!("{}", convert::formula(from, to));

    Ok(())
}

fn run_app() -> Result<()> {
    // Load configuration
    let config = config::Config::load()
        .context("Failed to load configuration")?;

    // Create application state
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Expire flash messages
        app.tick();

        // Poll for events with timeout (so flash expiry stays timely)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_convert_once_accepts_valid_args() {
        assert!(convert_once(&strings(&["100", "c", "f"])).is_ok());
        assert!(convert_once(&strings(&["-40", "fahrenheit", "Celsius"])).is_ok());
        assert!(convert_once(&strings(&["273.15", "k", "k"])).is_ok());
    }

    #[test]
    fn test_convert_once_rejects_bad_args() {
        assert!(convert_once(&strings(&["100", "c"])).is_err());
        assert!(convert_once(&strings(&["abc", "c", "f"])).is_err());
        assert!(convert_once(&strings(&["NaN", "c", "f"])).is_err());
        assert!(convert_once(&strings(&["100", "c", "rankine"])).is_err());
    }
}
