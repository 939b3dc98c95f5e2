//! badgeflasher - Flash every newly attached badge
//!
//! Watches the host's USB serial ports for boards of the selected badge type
//! and starts `esptool.py` once for every new board it sees. Flashing runs in
//! the background, so any number of badges can be plugged in at once; each
//! one is flashed exactly once per run, keyed on its USB serial number.
//!
//! # Architecture
//!
//! - `badgeflasher-core` holds the badge table, the flash layout and the
//!   watch loop, all independent of the host
//! - `host` plugs the loop into real serial ports and real processes

mod cli;
mod host;

use clap::Parser;
use cli::Cli;
use host::{ProcessLauncher, SerialPortSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG still overrides the verbosity default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let never = badgeflasher_core::run(
        cli.badge.name(),
        SerialPortSource,
        ProcessLauncher::default(),
    )?;
    match never {}
}
