//! Command-line interface for the JMA forecast viewer

use argh::FromArgs;
use std::path::PathBuf;

/// Three-day forecasts from the Japan Meteorological Agency
#[derive(FromArgs, Debug)]
pub struct Args {
    /// region codes to show (e.g. 130000); selections are read from stdin when omitted
    #[argh(positional)]
    pub regions: Vec<String>,

    /// list the available regions and exit
    #[argh(switch)]
    pub list: bool,

    /// print forecasts as JSON
    #[argh(switch)]
    pub json: bool,

    /// path to the config file (default: <config dir>/jma-forecast/config.toml)
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"warn\")")]
    pub log_level: String,
}

/// Split one input line into region codes. `q` or `quit` ends the session.
pub fn parse_selection(line: &str) -> Selection<'_> {
    let line = line.trim();
    if line == "q" || line == "quit" {
        return Selection::Quit;
    }
    Selection::Codes(line.split_whitespace().collect())
}

#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a> {
    Codes(Vec<&'a str>),
    Quit,
}
