//! Device watch loop
//!
//! Polls the host for connected serial devices, keeps the ones that look like
//! the selected badge and starts one flashing job per serial number. Flash
//! jobs are fire-and-forget, so several badges can be flashed in parallel
//! while the loop keeps polling.

use crate::badge::Badge;
use crate::device::DeviceSource;
use crate::error::Result;
use crate::flash::{FlashInvocation, Launcher};
use core::convert::Infallible;
use std::collections::HashSet;
use std::time::Duration;

/// Delay between two polls of the host's device list
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Watches for newly attached badges and dispatches flash jobs
pub struct Watcher<S, L> {
    badge: Badge,
    source: S,
    launcher: L,
    /// Serial numbers already dispatched during this run
    seen: HashSet<String>,
}

impl<S: DeviceSource, L: Launcher> Watcher<S, L> {
    /// Create a watcher for `badge` with an empty seen set
    pub fn new(badge: Badge, source: S, launcher: L) -> Self {
        Self {
            badge,
            source,
            launcher,
            seen: HashSet::new(),
        }
    }

    /// Badge this watcher is looking for
    pub fn badge(&self) -> Badge {
        self.badge
    }

    /// Returns true if a device with this serial number was already dispatched
    pub fn has_seen(&self, serial_number: &str) -> bool {
        self.seen.contains(serial_number)
    }

    /// Poll the host once and dispatch every new matching device
    ///
    /// Returns the number of flash jobs dispatched, including ones whose
    /// launch failed. Launch failures are logged and do not stop the poll;
    /// the device stays marked as seen and is not retried. Enumeration
    /// failures are returned to the caller.
    pub fn poll_once(&mut self) -> Result<usize> {
        let badge = self.badge;
        let devices = self.source.enumerate()?;
        let total = devices.len();
        let mut matched = 0;
        let mut dispatched = 0;

        for device in devices.iter().filter(|d| d.matches(badge)) {
            matched += 1;

            if !self.seen.insert(device.serial_number.clone()) {
                log::debug!(
                    "Skipping already flashed device {} ({})",
                    device.serial_number,
                    device.path
                );
                continue;
            }

            if device.serial_number.is_empty() {
                log::warn!(
                    "Device at {} has no serial number, other unnamed devices will be ignored",
                    device.path
                );
            }

            log::info!(
                "New {} badge: serial={} port={}",
                badge,
                device.serial_number,
                device.path
            );

            let invocation = FlashInvocation::new(badge, device);
            log::trace!("Flash command: {}", invocation.argv().join(" "));

            if let Err(e) = self.launcher.launch(&invocation) {
                log::error!("{} (device {})", e, device.path);
            }
            dispatched += 1;
        }

        log::debug!(
            "Poll: {} devices, {} matching, {} dispatched",
            total,
            matched,
            dispatched
        );

        Ok(dispatched)
    }

    /// Poll forever, sleeping [`POLL_INTERVAL`] between polls
    ///
    /// Only returns if enumerating devices fails.
    pub fn run(&mut self) -> Result<Infallible> {
        log::info!(
            "Watching for {} badges (VID={:04X} PID={:04X})",
            self.badge,
            self.badge.vendor_id(),
            self.badge.product_id()
        );

        loop {
            self.poll_once()?;
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Validate `badge_type` and watch for that badge forever
///
/// The badge name is checked before the host is polled, so an unknown name
/// fails with [`crate::Error::UnknownBadge`] without any enumeration or launch.
pub fn run<S: DeviceSource, L: Launcher>(
    badge_type: &str,
    source: S,
    launcher: L,
) -> Result<Infallible> {
    let badge = badge_type.parse::<Badge>()?;
    Watcher::new(badge, source, launcher).run()
}
