//! Error types for badgeflasher-core

use thiserror::Error;

/// Errors raised while watching for and flashing badges
#[derive(Debug, Error)]
pub enum Error {
    /// Badge selector is not one of the known badge types
    #[error("Unknown badge type: {0} (expected one of: fox, octopus)")]
    UnknownBadge(String),

    /// Listing the host's serial devices failed
    #[error("Device enumeration failed: {0}")]
    Enumeration(String),

    /// The flashing tool could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        /// Program that was being started
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for badgeflasher-core operations
pub type Result<T> = core::result::Result<T, Error>;
