//! Transport dispatch and device discovery.
//!
//! [`Hal`] owns one optional driver per bus and binds at most one of them
//! at a time. Binding always releases the previously bound driver first.

use kit_common::{DiagnosticSink, KitStatus};
use log::{debug, warn};

use crate::error::{HalError, HalResult};
use crate::interface::{DeviceInfo, InterfaceId, PhysicalInterface};
use crate::transport::Transport;

/// Capacity of the discovered-device table.
pub const MAX_DISCOVER_DEVICES: usize = 16;

/// Active-transport dispatcher and discovered-device table.
#[derive(Default)]
pub struct Hal {
    swi: Option<Box<dyn Transport>>,
    i2c: Option<Box<dyn Transport>>,
    spi: Option<Box<dyn Transport>>,
    swi2: Option<Box<dyn Transport>>,
    bound: Option<PhysicalInterface>,
    devices: Vec<DeviceInfo>,
}

impl Hal {
    /// Create a dispatcher with no drivers registered.
    pub fn new() -> Self {
        Hal::default()
    }

    /// Register a driver for a bus, builder style.
    pub fn with_transport<T: Transport + 'static>(mut self, kind: PhysicalInterface, transport: T) -> Self {
        self.register(kind, Box::new(transport));
        self
    }

    /// Register a driver for a bus, replacing any previous one.
    pub fn register(&mut self, kind: PhysicalInterface, transport: Box<dyn Transport>) {
        if self.bound == Some(kind) {
            self.unbind();
        }
        *self.slot(kind) = Some(transport);
    }

    /// Check whether a driver is registered for a bus.
    pub fn is_registered(&self, kind: PhysicalInterface) -> bool {
        match kind {
            PhysicalInterface::Swi => self.swi.is_some(),
            PhysicalInterface::I2c => self.i2c.is_some(),
            PhysicalInterface::Spi => self.spi.is_some(),
            PhysicalInterface::Swi2 => self.swi2.is_some(),
        }
    }

    /// Currently bound bus, if any.
    pub fn bound(&self) -> Option<PhysicalInterface> {
        self.bound
    }

    fn slot(&mut self, kind: PhysicalInterface) -> &mut Option<Box<dyn Transport>> {
        match kind {
            PhysicalInterface::Swi => &mut self.swi,
            PhysicalInterface::I2c => &mut self.i2c,
            PhysicalInterface::Spi => &mut self.spi,
            PhysicalInterface::Swi2 => &mut self.swi2,
        }
    }

    fn active(&mut self) -> Option<&mut (dyn Transport + 'static)> {
        let kind = self.bound?;
        self.slot(kind).as_deref_mut()
    }

    fn unbind(&mut self) {
        if let Some(transport) = self.active() {
            let status = transport.deinit();
            if !status.is_success() {
                warn!("Deinit of bound transport failed: {}", status);
            }
        }
        self.bound = None;
    }

    // ========================================================================
    // Binding
    // ========================================================================

    /// Bind the driver for `kind` as the active transport.
    ///
    /// The currently bound driver is deinitialized first, whatever the
    /// outcome. On error the dispatcher is left unbound.
    pub fn select(&mut self, kind: InterfaceId) -> HalResult<()> {
        self.unbind();

        let physical = PhysicalInterface::try_from(kind).map_err(HalError::NotPhysical)?;
        if !self.is_registered(physical) {
            return Err(HalError::NotRegistered(physical));
        }

        debug!("Bound {} transport", physical);
        self.bound = Some(physical);
        Ok(())
    }

    // ========================================================================
    // Discovery
    // ========================================================================

    /// Scan every registered bus and rebuild the device table.
    ///
    /// Buses are scanned in [`PhysicalInterface::DISCOVERY_ORDER`]; each bus
    /// fills the table from the next free slot. One line per device is
    /// written to `sink`. Returns the bus of the first device found.
    pub fn discover(&mut self, sink: &mut dyn DiagnosticSink) -> Option<PhysicalInterface> {
        self.devices.clear();

        for kind in PhysicalInterface::DISCOVERY_ORDER {
            if !self.is_registered(kind) {
                continue;
            }
            if let Err(e) = self.select(kind.into()) {
                warn!("Skipping {} during discovery: {}", kind, e);
                continue;
            }

            let remaining = MAX_DISCOVER_DEVICES - self.devices.len();
            let Some(transport) = self.active() else {
                continue;
            };
            let status = transport.init();
            if !status.is_success() {
                warn!("Init of {} transport failed: {}", kind, status);
                continue;
            }

            let mut found = transport.discover(remaining);
            found.truncate(remaining);
            debug!("Discovered {} device(s) on {}", found.len(), kind);
            self.devices.extend(found);
        }

        for device in &self.devices {
            sink.emit(&device.discovery_line());
        }

        self.devices.first().map(|device| device.interface)
    }

    /// Discovered device at `index`, if the table holds that many.
    pub fn device_info(&self, index: usize) -> Option<&DeviceInfo> {
        self.devices.get(index)
    }

    /// All discovered devices, in discovery order.
    pub fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    /// Number of discovered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    // ========================================================================
    // Active Transport Operations
    // ========================================================================
    //
    // Every operation answers InvalidParam while unbound.

    pub fn init(&mut self) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.init())
    }

    pub fn deinit(&mut self) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.deinit())
    }

    pub fn wake(&mut self, handle: u32) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.wake(handle))
    }

    pub fn idle(&mut self, handle: u32) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.idle(handle))
    }

    pub fn sleep(&mut self, handle: u32) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.sleep(handle))
    }

    pub fn send(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.send(handle, data))
    }

    pub fn receive(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.receive(handle, data))
    }

    pub fn talk(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        self.active().map_or(KitStatus::InvalidParam, |t| t.talk(handle, data))
    }
}

impl std::fmt::Debug for Hal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hal")
            .field("bound", &self.bound)
            .field("devices", &self.devices)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::ExtHeader;
    use crate::sim::{BusEvent, SimDevice, SimulatedBus};
    use kit_device::DeviceType;

    fn sim(kind: PhysicalInterface, devices: &[(u32, DeviceType)]) -> SimulatedBus {
        SimulatedBus::new(
            kind,
            devices
                .iter()
                .map(|&(address, device_type)| SimDevice {
                    address,
                    device_type,
                    header: ExtHeader::Ext1,
                })
                .collect(),
        )
    }

    #[test]
    fn test_unbound_operations_are_invalid() {
        let mut hal = Hal::new();
        let mut data = vec![0x01];
        assert_eq!(hal.bound(), None);
        assert_eq!(hal.wake(0), KitStatus::InvalidParam);
        assert_eq!(hal.talk(0, &mut data), KitStatus::InvalidParam);
        assert_eq!(hal.deinit(), KitStatus::InvalidParam);
    }

    #[test]
    fn test_select_rejects_sentinels_and_unregistered() {
        let mut hal = Hal::new().with_transport(PhysicalInterface::I2c, sim(PhysicalInterface::I2c, &[]));
        assert_eq!(hal.select(InterfaceId::Uart), Err(HalError::NotPhysical(InterfaceId::Uart)));
        assert_eq!(hal.select(InterfaceId::Unknown), Err(HalError::NotPhysical(InterfaceId::Unknown)));
        assert_eq!(
            hal.select(InterfaceId::Spi),
            Err(HalError::NotRegistered(PhysicalInterface::Spi))
        );
        assert_eq!(hal.select(InterfaceId::I2c), Ok(()));
        assert_eq!(hal.bound(), Some(PhysicalInterface::I2c));
    }

    #[test]
    fn test_select_deinits_previous_transport() {
        let i2c = sim(PhysicalInterface::I2c, &[]);
        let log = i2c.log();
        let mut hal = Hal::new()
            .with_transport(PhysicalInterface::I2c, i2c)
            .with_transport(PhysicalInterface::Spi, sim(PhysicalInterface::Spi, &[]));

        hal.select(InterfaceId::I2c).unwrap();
        hal.select(InterfaceId::Spi).unwrap();
        assert_eq!(log.events(), vec![BusEvent::Deinit]);

        // A failed select still releases the bound transport
        hal.select(InterfaceId::Uart).unwrap_err();
        assert_eq!(hal.bound(), None);
    }

    #[test]
    fn test_discover_order_and_first_bus() {
        let mut hal = Hal::new()
            .with_transport(PhysicalInterface::Swi2, sim(PhysicalInterface::Swi2, &[(0x0A, DeviceType::Sha105)]))
            .with_transport(PhysicalInterface::I2c, sim(PhysicalInterface::I2c, &[(0xC0, DeviceType::Ecc608b)]))
            .with_transport(PhysicalInterface::Spi, sim(PhysicalInterface::Spi, &[]));

        let mut lines: Vec<String> = Vec::new();
        let first = hal.discover(&mut lines);

        assert_eq!(first, Some(PhysicalInterface::I2c));
        assert_eq!(hal.device_count(), 2);
        assert_eq!(hal.device_info(0).map(|d| d.address), Some(0xC0));
        assert_eq!(hal.device_info(1).map(|d| d.interface), Some(PhysicalInterface::Swi2));
        assert!(hal.device_info(2).is_none());
        assert_eq!(lines, vec!["I2C ATECC608B C0", "SWI SHA105 0A"]);
    }

    #[test]
    fn test_discover_empty_returns_none() {
        let mut hal = Hal::new().with_transport(PhysicalInterface::Swi, sim(PhysicalInterface::Swi, &[]));
        let mut lines: Vec<String> = Vec::new();
        assert_eq!(hal.discover(&mut lines), None);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_discover_is_bounded() {
        let many: Vec<(u32, DeviceType)> = (0..12).map(|a| (a, DeviceType::Ecc608a)).collect();
        let mut hal = Hal::new()
            .with_transport(PhysicalInterface::I2c, sim(PhysicalInterface::I2c, &many))
            .with_transport(PhysicalInterface::Spi, sim(PhysicalInterface::Spi, &many));

        hal.discover(&mut kit_common::NullSink);
        assert_eq!(hal.device_count(), MAX_DISCOVER_DEVICES);
        assert_eq!(hal.device_info(12).map(|d| d.interface), Some(PhysicalInterface::Spi));
    }
}
