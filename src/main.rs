//! dicebox - Dice Roller
//!
//! A TUI for rolling dice and keeping a log of the results.
//!
//! Features:
//! - Pick a face count and up to 15 dice
//! - Roll continuously until stopped, or roll once
//! - Store results in a log, with optional sums per line
//!
//! Usage: dicebox [--faces N] [--dice N]

mod app;
mod config;
mod roll;
mod types;
mod ui;

use anyhow::{bail, Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::prelude::*;
use std::fs::{self, File};
use std::io::stdout;
use std::path::PathBuf;

/// Environment variable holding the log filter (e.g. `debug`)
const LOG_ENV: &str = "DICEBOX_LOG";

/// Command line options
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    faces: Option<u32>,
    dice: Option<u32>,
    help: bool,
    version: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-v" | "--version" => parsed.version = true,
                "-f" | "--faces" => parsed.faces = Some(parse_number(&arg, iter.next())?),
                "-d" | "--dice" => parsed.dice = Some(parse_number(&arg, iter.next())?),
                other => bail!("Unknown argument: {}", other),
            }
        }

        Ok(parsed)
    }
}

fn parse_number(flag: &str, value: Option<String>) -> Result<u32> {
    let value = value.with_context(|| format!("{} requires a value", flag))?;
    value
        .parse()
        .with_context(|| format!("Invalid value for {}: {:?}", flag, value))
}

fn main() -> Result<()> {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Try 'dicebox --help' for more information.");
            std::process::exit(2);
        }
    };

    if args.help {
        print_help();
        return Ok(());
    }

    if args.version {
        println!("dicebox {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    // Run the application
    if let Err(e) = run_app(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"dicebox - Dice Roller

USAGE:
    dicebox [OPTIONS]

OPTIONS:
    -f, --faces <N>  Preselect the number of faces per die
    -d, --dice <N>   Preselect the number of dice (1-15)
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    Tab/Shift+Tab    Move focus
    Enter/Space      Press focused control
    j/k              Change focused dropdown
    f / d            Open Faces / Dice list
    r                Roll continuously / stop
    o, 1             Roll once
    s                Store results in the log
    c                Clear the log
    x                Toggle sums in the log
    t                Next theme
    q                Quit

CONFIG:
    ~/.config/dicebox/config.toml

LOG:
    ~/.cache/dicebox/dicebox.log  (level via DICEBOX_LOG, default: info)
"#
    );
}

/// Diagnostic log location
fn log_path() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("dicebox");
    Ok(dir.join("dicebox.log"))
}

/// Send log output to a file; the terminal belongs to the TUI
fn init_logging() -> Result<()> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = File::create(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}

fn run_app(args: &Args) -> Result<()> {
    // Load configuration
    let config = config::Config::load().context("Failed to load configuration")?;

    // Create application state
    let mut app = App::new(config);
    app.preselect(args.faces, args.dice)
        .context("Invalid command line selection")?;
    info!("Starting dicebox {}", env!("CARGO_PKG_VERSION"));

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Exiting, {} roll(s) in log", app.history.len());
    debug!("Final log:\n{}", app.history.text());
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Advance the roll animation
        app.update_timer();

        // Poll for events with timeout (the tick interval drives rolling)
        if event::poll(app.tick_interval())? {
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

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(args(&[]).unwrap(), Args::default());

        let parsed = args(&["--faces", "20", "-d", "3"]).unwrap();
        assert_eq!(parsed.faces, Some(20));
        assert_eq!(parsed.dice, Some(3));

        assert!(args(&["-h"]).unwrap().help);
        assert!(args(&["--version"]).unwrap().version);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--faces"]).is_err());
        assert!(args(&["--dice", "many"]).is_err());
        assert!(args(&["--loud"]).is_err());
    }
}
