use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::{error::Error, sync::Mutex};
use tracing_subscriber::EnvFilter;

mod app;
mod aqi;
mod city;
mod cli;
mod error;
mod pollutant;
mod render;
mod screen;
mod units;

use crate::app::run_app;
use crate::aqi::calculator::UsEpa;
use crate::city::City;
use crate::cli::Args;
use crate::error::LoadError;
use crate::screen::CityDetail;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Logs go to `--log-file`, or stderr in plain mode. The TUI owns the terminal
/// otherwise, so nothing is installed.
fn init_logging(args: &Args, plain: bool) -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if let Some(ref path) = args.log_file {
        let file = File::create(path)?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if plain {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

fn load_city(args: &Args) -> Result<City, LoadError> {
    match args.input() {
        Some(path) => City::from_path(path),
        None => City::from_reader(io::stdin().lock(), Path::new("<stdin>")),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let plain = args.plain || !io::stdout().is_terminal();
    init_logging(&args, plain)?;

    let city = load_city(&args)?;
    let detail = CityDetail::assemble(&city, &UsEpa);

    if plain {
        print!("{}", render::plain(&detail));
        return Ok(());
    }

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &detail);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "terminal ui failed");
        return Err(err.into());
    }

    Ok(())
}
