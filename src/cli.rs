use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Air quality detail TUI";

const LONG_ABOUT: &str = "
TUI for viewing the air quality of a single city.

The user supplies a JSON file describing the city and its air quality samples. Only the first
sample is shown: the overall AQI with its health recommendation, the pollutant concentrations and,
when the sample has it, the weather. Reads from stdin when no file (or `-`) is given.

Set RUST_LOG to control log verbosity.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "City JSON file, `-` for stdin")]
    pub path: Option<PathBuf>,

    #[arg(long, help = "Print the detail as plain text instead of starting the TUI")]
    pub plain: bool,

    #[arg(long, value_name = "FILE", help = "Write logs to FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// `None` means stdin.
    pub fn input(&self) -> Option<&PathBuf> {
        self.path.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
