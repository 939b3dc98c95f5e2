//! CLI argument parsing

use badgeflasher_core::Badge;
use clap::Parser;

/// Parse a badge selector, listing the known names on failure
fn parse_badge(s: &str) -> Result<Badge, String> {
    Badge::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = Badge::ALL.iter().map(|b| b.name()).collect();
        format!("unknown badge '{}' [possible values: {}]", s, names.join(", "))
    })
}

#[derive(Parser, Debug)]
#[command(name = "badgeflasher")]
#[command(author, version, about = "Flash every newly attached badge", long_about = None)]
#[command(after_help = "Firmware images are read from ./images/<name>_<badge>.bin \
and written with esptool.py, which must be on the PATH.")]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Badge type to watch for [possible values: fox, octopus]
    #[arg(default_value = "fox", value_parser = parse_badge)]
    pub badge: Badge,
}

impl Cli {
    /// Default log filter for the requested verbosity
    #[allow(dead_code)] // not used by gen-manpage
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
