//! Selected-device state carried between messages.

use kit_common::DiagnosticSink;
use kit_device::DeviceType;
use kit_hal::{DeviceInfo, Hal, PhysicalInterface};
use log::{debug, warn};

/// Selection state owned by one interpreter.
///
/// Survives across messages until a later message overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    selected_handle: u32,
    selected_device_type: DeviceType,
    pending_interface: Option<PhysicalInterface>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Handle passed to device handlers.
    pub fn selected_handle(&self) -> u32 {
        self.selected_handle
    }

    pub fn selected_device_type(&self) -> DeviceType {
        self.selected_device_type
    }

    /// Bus requested for the next resolution, if any.
    pub fn pending_interface(&self) -> Option<PhysicalInterface> {
        self.pending_interface
    }

    /// Require the next resolution to match this bus family.
    pub fn set_pending_interface(&mut self, iface: PhysicalInterface) {
        self.pending_interface = Some(iface);
    }

    /// Resolve `handle` against the discovered devices and select it.
    ///
    /// With a pending interface, address and bus family must both match;
    /// otherwise the first device with that address wins. The pending
    /// interface is consumed either way. On a match the device's bus is
    /// bound and initialized and a selection line is emitted. Without one
    /// the previous selection is kept and `Invalid device` is emitted.
    pub fn select_device(
        &mut self,
        handle: u32,
        hal: &mut Hal,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<DeviceInfo> {
        let pending = self.pending_interface.take();
        let found = hal
            .devices()
            .iter()
            .find(|device| {
                device.address == handle
                    && pending.map_or(true, |iface| iface.same_family(device.interface))
            })
            .copied();

        let Some(device) = found else {
            debug!("No device at handle {:02X} (interface {:?})", handle, pending);
            sink.emit("Invalid device");
            return None;
        };

        self.selected_handle = device.address;
        self.selected_device_type = device.device_type;
        sink.emit(&device.selection_line());

        match hal.select(device.interface.into()) {
            Ok(()) => {
                let status = hal.init();
                if !status.is_success() {
                    warn!("Init of {} failed after selection: {}", device.interface, status);
                }
            }
            Err(e) => warn!("Could not bind {}: {}", device.interface, e),
        }

        Some(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_hal::{ExtHeader, SimDevice, SimulatedBus};

    fn hal() -> Hal {
        let mut hal = Hal::new()
            .with_transport(
                PhysicalInterface::I2c,
                SimulatedBus::new(
                    PhysicalInterface::I2c,
                    vec![SimDevice { address: 0x01, device_type: DeviceType::Ecc608b, header: ExtHeader::None }],
                ),
            )
            .with_transport(
                PhysicalInterface::Swi2,
                SimulatedBus::new(
                    PhysicalInterface::Swi2,
                    vec![SimDevice { address: 0x01, device_type: DeviceType::Sha105, header: ExtHeader::Ext1 }],
                ),
            );
        hal.discover(&mut kit_common::NullSink);
        hal
    }

    #[test]
    fn test_address_only_takes_first_match() {
        let mut hal = hal();
        let mut session = Session::new();
        let mut lines: Vec<String> = Vec::new();

        let device = session.select_device(0x01, &mut hal, &mut lines).unwrap();
        assert_eq!(device.interface, PhysicalInterface::I2c);
        assert_eq!(session.selected_device_type(), DeviceType::Ecc608b);
        assert_eq!(hal.bound(), Some(PhysicalInterface::I2c));
        assert_eq!(lines, vec!["Selected TWI ATECC608B01"]);
    }

    #[test]
    fn test_pending_interface_matches_family_and_is_consumed() {
        let mut hal = hal();
        let mut session = Session::new();
        let mut lines: Vec<String> = Vec::new();

        session.set_pending_interface(PhysicalInterface::Swi);
        let device = session.select_device(0x01, &mut hal, &mut lines).unwrap();
        assert_eq!(device.interface, PhysicalInterface::Swi2);
        assert_eq!(session.selected_device_type(), DeviceType::Sha105);
        assert_eq!(session.pending_interface(), None);
        assert_eq!(hal.bound(), Some(PhysicalInterface::Swi2));
    }

    #[test]
    fn test_no_match_keeps_selection_and_clears_override() {
        let mut hal = hal();
        let mut session = Session::new();
        let mut lines: Vec<String> = Vec::new();
        session.select_device(0x01, &mut hal, &mut lines).unwrap();

        session.set_pending_interface(PhysicalInterface::Spi);
        assert!(session.select_device(0x01, &mut hal, &mut lines).is_none());
        assert_eq!(session.pending_interface(), None);
        assert_eq!(session.selected_handle(), 0x01);
        assert_eq!(session.selected_device_type(), DeviceType::Ecc608b);
        assert_eq!(lines.last().map(String::as_str), Some("Invalid device"));

        assert!(session.select_device(0x55, &mut hal, &mut lines).is_none());
        assert_eq!(session.selected_handle(), 0x01);
    }
}
