//! badgeflasher-core - Device matching and dispatch for badge flashing
//!
//! This crate knows which USB serial devices are badges, what arguments the
//! external flashing tool needs for each badge, and how to watch the host
//! for newly attached boards. Host access is abstracted behind two traits so
//! the watch loop can be driven without real hardware:
//!
//! - [`DeviceSource`] - lists the currently connected serial devices
//! - [`Launcher`] - starts the flashing tool without waiting for it
//!
//! # Example
//!
//! ```ignore
//! use badgeflasher_core::{Badge, Watcher};
//!
//! let mut watcher = Watcher::new(Badge::Fox, source, launcher);
//! let dispatched = watcher.poll_once()?;
//! println!("Started {} flash jobs", dispatched);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod badge;
pub mod device;
pub mod error;
pub mod flash;
pub mod watch;

pub use badge::Badge;
pub use device::{DeviceDescriptor, DeviceSource};
pub use error::{Error, Result};
pub use flash::{FlashInvocation, Launcher};
pub use watch::{run, Watcher, POLL_INTERVAL};
