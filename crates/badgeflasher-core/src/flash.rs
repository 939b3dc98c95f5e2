//! Flash layout and the external flashing tool invocation
//!
//! The flashing itself is done by `esptool.py`. This module only decides
//! what to pass it: the target chip and link settings, the serial port of
//! the badge, and the list of `(offset, image)` pairs to write. Offsets and
//! image names must line up with the partition table baked into the
//! firmware build, so they are fixed here.

use crate::badge::Badge;
use crate::device::DeviceDescriptor;
use crate::error::Result;

/// Program used to flash the badges
pub const FLASH_TOOL: &str = "esptool.py";

/// Directory holding the firmware images, relative to the working directory
pub const IMAGE_DIR: &str = "images";

/// One firmware image written at a fixed flash offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSlot {
    /// Flash offset in bytes
    pub offset: u32,
    /// Image filename stem; the badge name is appended as `_<badge>.bin`
    pub stem: &'static str,
}

const fn slot(offset: u32, stem: &'static str) -> ImageSlot {
    ImageSlot { offset, stem }
}

/// Images written to every badge, in write order
///
/// The firmware appears twice to fill both OTA slots.
pub const FLASH_LAYOUT: &[ImageSlot] = &[
    slot(0x0, "bootloader"),
    slot(0x8000, "partition_table"),
    slot(0x9000, "ota_data"),
    slot(0x10000, "fri3d_firmware"),
    slot(0x210000, "fri3d_firmware"),
    slot(0x410000, "micropython"),
    slot(0x710000, "retro_go_launcher"),
    slot(0x810000, "retro_go_core"),
    slot(0x8b0000, "retro_go_prboom"),
    slot(0x990000, "vfs"),
];

impl ImageSlot {
    /// Path of this slot's image for the given badge
    pub fn image_path(&self, badge: Badge) -> String {
        format!("{}/{}_{}.bin", IMAGE_DIR, self.stem, badge.name())
    }
}

/// A fully assembled flashing tool command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashInvocation {
    /// Program to run
    pub program: String,
    /// Arguments, not including the program name
    pub args: Vec<String>,
}

impl FlashInvocation {
    /// Build the invocation that flashes `badge` firmware onto `device`
    pub fn new(badge: Badge, device: &DeviceDescriptor) -> Self {
        let mut args: Vec<String> = [
            "--chip",
            "esp32s3",
            "-b",
            "1500000",
            "-p",
            device.path.as_str(),
            "--before",
            "default_reset",
            "--after",
            "hard_reset",
            "write_flash",
            "--erase-all",
            "--flash_mode",
            "dio",
            "--flash_freq",
            "80m",
            "--flash_size",
            "16MB",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        for slot in FLASH_LAYOUT {
            args.push(format!("{:#x}", slot.offset));
            args.push(slot.image_path(badge));
        }

        Self {
            program: FLASH_TOOL.to_string(),
            args,
        }
    }

    /// Program name followed by all arguments
    pub fn argv(&self) -> Vec<&str> {
        core::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Starts flashing tool processes
///
/// Implementations must return as soon as the process has been started;
/// they must not wait for it to finish or inspect its result.
pub trait Launcher {
    /// Start the tool described by `invocation`
    fn launch(&mut self, invocation: &FlashInvocation) -> Result<()>;
}

impl<L: Launcher + ?Sized> Launcher for &mut L {
    fn launch(&mut self, invocation: &FlashInvocation) -> Result<()> {
        (**self).launch(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fox_device() -> DeviceDescriptor {
        DeviceDescriptor {
            vendor_id: Some(0x303A),
            product_id: Some(0x1001),
            serial_number: "AA1".into(),
            path: "/dev/ttyACM0".into(),
        }
    }

    #[test]
    fn test_fox_invocation() {
        let inv = FlashInvocation::new(Badge::Fox, &fox_device());
        let expected = [
            "esptool.py",
            "--chip",
            "esp32s3",
            "-b",
            "1500000",
            "-p",
            "/dev/ttyACM0",
            "--before",
            "default_reset",
            "--after",
            "hard_reset",
            "write_flash",
            "--erase-all",
            "--flash_mode",
            "dio",
            "--flash_freq",
            "80m",
            "--flash_size",
            "16MB",
            "0x0",
            "images/bootloader_fox.bin",
            "0x8000",
            "images/partition_table_fox.bin",
            "0x9000",
            "images/ota_data_fox.bin",
            "0x10000",
            "images/fri3d_firmware_fox.bin",
            "0x210000",
            "images/fri3d_firmware_fox.bin",
            "0x410000",
            "images/micropython_fox.bin",
            "0x710000",
            "images/retro_go_launcher_fox.bin",
            "0x810000",
            "images/retro_go_core_fox.bin",
            "0x8b0000",
            "images/retro_go_prboom_fox.bin",
            "0x990000",
            "images/vfs_fox.bin",
        ];
        assert_eq!(inv.argv(), expected);
    }

    #[test]
    fn test_badge_changes_only_suffixes() {
        let device = fox_device();
        let fox = FlashInvocation::new(Badge::Fox, &device);
        let octopus = FlashInvocation::new(Badge::Octopus, &device);

        assert_eq!(fox.program, octopus.program);
        assert_eq!(fox.args.len(), octopus.args.len());
        assert!(octopus
            .args
            .contains(&"images/partition_table_octopus.bin".to_string()));

        let mut images = 0;
        for (f, o) in fox.args.iter().zip(&octopus.args) {
            if let Some(stem) = f.strip_suffix("_fox.bin") {
                assert_eq!(o, &format!("{}_octopus.bin", stem));
                images += 1;
            } else {
                assert_eq!(f, o);
            }
        }
        assert_eq!(images, FLASH_LAYOUT.len());
        assert!(!octopus.args.iter().any(|a| a.contains("fox")));
    }
}
