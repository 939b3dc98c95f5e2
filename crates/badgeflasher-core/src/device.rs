//! Connected serial devices and the host enumeration seam

use crate::badge::Badge;
use crate::error::Result;

/// One serial device as reported by the host
///
/// A fresh list of these is produced on every poll; nothing here is kept
/// between polls except the serial number once a device has been flashed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceDescriptor {
    /// USB vendor ID, absent for non-USB ports
    pub vendor_id: Option<u16>,
    /// USB product ID, absent for non-USB ports
    pub product_id: Option<u16>,
    /// USB serial number string, empty if the device reports none
    pub serial_number: String,
    /// OS path used to address the port (e.g. `/dev/ttyACM0`, `COM3`)
    pub path: String,
}

impl DeviceDescriptor {
    /// Returns true if both USB IDs are present and equal to the badge's
    pub fn matches(&self, badge: Badge) -> bool {
        self.vendor_id == Some(badge.vendor_id()) && self.product_id == Some(badge.product_id())
    }
}

/// Source of the host's currently connected serial devices
pub trait DeviceSource {
    /// List all connected serial devices, in host order
    fn enumerate(&mut self) -> Result<Vec<DeviceDescriptor>>;
}

impl<S: DeviceSource + ?Sized> DeviceSource for &mut S {
    fn enumerate(&mut self) -> Result<Vec<DeviceDescriptor>> {
        (**self).enumerate()
    }
}
