//! Known badge types and their USB identifiers

use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// A supported badge board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Badge {
    /// Fox badge (ESP32-S3 native USB, VID:303a PID:1001)
    #[default]
    Fox,
    /// Octopus badge (CP210x USB-UART bridge, VID:10c4 PID:ea60)
    Octopus,
}

impl Badge {
    /// All known badges, in the order they are listed to the user
    pub const ALL: [Badge; 2] = [Badge::Fox, Badge::Octopus];

    /// Selector name, also used as the firmware image filename suffix
    pub fn name(&self) -> &'static str {
        match self {
            Badge::Fox => "fox",
            Badge::Octopus => "octopus",
        }
    }

    /// USB vendor ID reported by this badge
    pub fn vendor_id(&self) -> u16 {
        match self {
            Badge::Fox => 0x303A,
            Badge::Octopus => 0x10C4,
        }
    }

    /// USB product ID reported by this badge
    pub fn product_id(&self) -> u16 {
        match self {
            Badge::Fox => 0x1001,
            Badge::Octopus => 0xEA60,
        }
    }

    /// Look up a badge by its selector name
    pub fn from_name(name: &str) -> Option<Badge> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl FromStr for Badge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Badge::from_name(s).ok_or_else(|| Error::UnknownBadge(s.to_string()))
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
