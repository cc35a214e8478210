//! echord - hold 1-7 to play the chords of C major
//!
//! Run with:
//!   cargo run -- [--wave sawtooth|sine|square|triangle] [--hold-timeout <ms>] [--verbose]
//!
//! `--hold-timeout` only matters on terminals without key-up events; set it
//! above the desktop's key repeat delay.

mod app;
mod input;
mod ui;

use std::{fs::File, path::PathBuf, time::Duration};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use echord::{dsp::Waveform, SynthConfig};

use app::App;
use input::HOLD_TIMEOUT;

fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("echord")
        .join("echord.log")
}

fn init_logging(verbose: bool) -> EyreResult<PathBuf> {
    use simplelog::{Config, LevelFilter, WriteLogger};

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut path = log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(_) => {
            path = std::env::temp_dir().join("echord.log");
            File::create(&path)
                .wrap_err_with(|| format!("cannot create log file {}", path.display()))?
        }
    };

    WriteLogger::init(level, Config::default(), file).wrap_err("failed to install logger")?;
    log::info!("echord starting (log level: {level:?})");
    Ok(path)
}

/// Command-line options.
struct Options {
    config: SynthConfig,
    hold_timeout: Duration,
    verbose: bool,
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
}

fn parse_args(args: &[String]) -> EyreResult<Options> {
    let mut config = SynthConfig::default();
    if let Some(name) = flag_value(args, "--wave") {
        let waveform: Waveform = name.parse()?;
        config = config.with_waveform(waveform);
    }

    let hold_timeout = match flag_value(args, "--hold-timeout") {
        Some(ms) => {
            let ms: u64 = ms
                .parse()
                .wrap_err_with(|| format!("--hold-timeout expects milliseconds, got {ms:?}"))?;
            Duration::from_millis(ms)
        }
        None => HOLD_TIMEOUT,
    };

    Ok(Options {
        config,
        hold_timeout,
        verbose: args.iter().any(|a| a == "--verbose" || a == "-v"),
    })
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args)?;
    let log_file = init_logging(options.verbose)?;

    let app = App::new(options.config, options.hold_timeout, log_file)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}
