//! Host bindings: serial port enumeration and process launching

use badgeflasher_core::{DeviceDescriptor, DeviceSource, Error, FlashInvocation, Launcher, Result};
use serialport::{SerialPortInfo, SerialPortType};
use std::process::{Child, Command};

/// Lists serial ports through the `serialport` crate
#[derive(Debug, Default)]
pub struct SerialPortSource;

impl DeviceSource for SerialPortSource {
    fn enumerate(&mut self) -> Result<Vec<DeviceDescriptor>> {
        let ports = serialport::available_ports().map_err(|e| Error::Enumeration(e.to_string()))?;
        Ok(ports.into_iter().map(descriptor_from_port).collect())
    }
}

/// Convert a port report into a descriptor; non-USB ports carry no IDs
fn descriptor_from_port(port: SerialPortInfo) -> DeviceDescriptor {
    match port.port_type {
        SerialPortType::UsbPort(usb) => DeviceDescriptor {
            vendor_id: Some(usb.vid),
            product_id: Some(usb.pid),
            serial_number: usb.serial_number.unwrap_or_default(),
            path: port.port_name,
        },
        _ => DeviceDescriptor {
            path: port.port_name,
            ..Default::default()
        },
    }
}

/// Spawns the flashing tool as a background child process
///
/// The child inherits stdio so the tool's progress output is visible.
/// `launch` never waits for a child; handles are kept only so that finished
/// children can be reaped with a non-blocking `try_wait` on the next launch.
/// Exit statuses are discarded.
#[derive(Debug, Default)]
pub struct ProcessLauncher {
    children: Vec<Child>,
}

impl ProcessLauncher {
    /// Drop handles of children that have exited, reaping them
    pub fn reap(&mut self) {
        self.children
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
    }

    /// Number of children not yet seen to exit
    pub fn running(&self) -> usize {
        self.children.len()
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&mut self, invocation: &FlashInvocation) -> Result<()> {
        self.reap();

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .spawn()
            .map_err(|source| Error::Launch {
                program: invocation.program.clone(),
                source,
            })?;

        log::info!("Started {} (pid {})", invocation.program, child.id());
        self.children.push(child);
        log::debug!("{} flash jobs running", self.running());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    #[test]
    fn test_usb_port_descriptor() {
        let port = SerialPortInfo {
            port_name: "/dev/ttyACM0".into(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid: 0x303A,
                pid: 0x1001,
                serial_number: Some("AA1".into()),
                manufacturer: None,
                product: None,
            }),
        };
        let d = descriptor_from_port(port);
        assert_eq!(d.vendor_id, Some(0x303A));
        assert_eq!(d.product_id, Some(0x1001));
        assert_eq!(d.serial_number, "AA1");
        assert_eq!(d.path, "/dev/ttyACM0");
    }

    #[test]
    fn test_non_usb_port_has_no_ids() {
        let port = SerialPortInfo {
            port_name: "/dev/ttyS0".into(),
            port_type: SerialPortType::Unknown,
        };
        let d = descriptor_from_port(port);
        assert_eq!(d.vendor_id, None);
        assert_eq!(d.product_id, None);
        assert!(d.serial_number.is_empty());
    }

    #[test]
    fn test_missing_tool_reports_launch_error() {
        let invocation = FlashInvocation {
            program: "badgeflasher-no-such-tool".into(),
            args: vec![],
        };
        match ProcessLauncher::default().launch(&invocation) {
            Err(Error::Launch { program, .. }) => assert_eq!(program, "badgeflasher-no-such-tool"),
            other => panic!("expected Launch error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_finished_children_are_reaped() {
        use std::time::{Duration, Instant};

        let invocation = FlashInvocation {
            program: "true".into(),
            args: vec![],
        };
        let mut launcher = ProcessLauncher::default();
        for _ in 0..3 {
            launcher.launch(&invocation).unwrap();
        }
        assert!(launcher.running() >= 1);

        let deadline = Instant::now() + Duration::from_secs(10);
        while launcher.running() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
            launcher.reap();
        }
        assert_eq!(launcher.running(), 0);

        // A later launch starts with the exited children already gone
        launcher.launch(&invocation).unwrap();
        assert_eq!(launcher.running(), 1);
    }
}
