//! Demo board handler.
//!
//! [`KitBoard`] answers the board commands from its configured identity and
//! the discovered-device table, and forwards device commands to whichever
//! transport the interpreter has bound.

use kit_common::KitStatus;
use kit_device::{revision_bytes, supports_idle};
use kit_protocol::{frame, HandlerContext, KitHandler};
use tracing::{debug, info, warn};

/// Response a CryptoAuth device gives after a successful wake.
pub const WAKE_RESPONSE: [u8; 4] = [0x04, 0x11, 0x33, 0x43];

/// Handler for a board populated from the `kitd` configuration.
#[derive(Debug, Clone)]
pub struct KitBoard {
    name: String,
    version: Vec<u8>,
    firmware: String,
    polling: bool,
}

impl KitBoard {
    pub fn new(name: &str, version: Vec<u8>, firmware: &str) -> Self {
        KitBoard {
            name: name.to_string(),
            version,
            firmware: firmware.to_string(),
            polling: false,
        }
    }

    pub fn polling(&self) -> bool {
        self.polling
    }

    /// `<label> SS(HEX)` followed by the terminator.
    fn labelled(label: &str, payload: &[u8], ctx: &HandlerContext<'_>) -> Vec<u8> {
        let mut out = format!("{} ", label).into_bytes();
        out.extend_from_slice(&frame(KitStatus::Success, payload, ctx.config));
        out
    }
}

impl KitHandler for KitBoard {
    fn board_get_version(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        *data = KitBoard::labelled(&self.name, &self.version, ctx);
        KitStatus::Success
    }

    fn board_get_firmware(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        *data = KitBoard::labelled(&self.firmware, &[], ctx);
        KitStatus::Success
    }

    fn board_get_device(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        let Some(device) = ctx.hal.devices().iter().find(|d| d.address == handle).copied() else {
            data.clear();
            return KitStatus::InvalidId;
        };
        let info = revision_bytes(device.device_type).unwrap_or_default();
        *data = KitBoard::labelled(&device.device_type.to_string(), &info, ctx);
        KitStatus::Success
    }

    /// One address byte per discovered device, in discovery order. Handles
    /// wider than a byte are left out.
    fn board_get_devices(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        data.clear();
        for device in ctx.hal.devices() {
            match u8::try_from(device.address) {
                Ok(address) => data.push(address),
                Err(_) => warn!("Skipping device handle {:#X} wider than one byte", device.address),
            }
        }
        KitStatus::Success
    }

    fn board_discover(&mut self, ctx: &mut HandlerContext<'_>, enable: bool) -> KitStatus {
        let first = ctx.hal.discover(&mut *ctx.diagnostics);
        info!(
            "Discovered {} device(s), first on {:?} (flag {})",
            ctx.hal.device_count(),
            first,
            enable
        );
        KitStatus::Success
    }

    fn board_get_last_error(&mut self, ctx: &mut HandlerContext<'_>, data: &mut Vec<u8>) -> KitStatus {
        let bytes = ctx.last_error.get().map(|e| e.to_bytes()).unwrap_or_default();
        *data = frame(KitStatus::Success, &bytes, ctx.config).to_vec();
        KitStatus::Success
    }

    fn board_polling(&mut self, _ctx: &mut HandlerContext<'_>, enable: bool) -> KitStatus {
        debug!("Polling {}", if enable { "enabled" } else { "disabled" });
        self.polling = enable;
        KitStatus::Success
    }

    fn device_idle(&mut self, ctx: &mut HandlerContext<'_>, handle: u32) -> KitStatus {
        if supports_idle(ctx.session.selected_device_type()) {
            ctx.hal.idle(handle)
        } else {
            ctx.hal.sleep(handle)
        }
    }

    fn device_sleep(&mut self, ctx: &mut HandlerContext<'_>, handle: u32) -> KitStatus {
        ctx.hal.sleep(handle)
    }

    fn device_wake(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        let status = ctx.hal.wake(handle);
        data.clear();
        if status.is_success() {
            data.extend_from_slice(&WAKE_RESPONSE);
        }
        status
    }

    fn device_receive(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        ctx.hal.receive(handle, data)
    }

    fn device_send(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        ctx.hal.send(handle, data)
    }

    fn device_talk(&mut self, ctx: &mut HandlerContext<'_>, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        ctx.hal.talk(handle, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use kit_common::{LastErrorSlot, NullSink};
    use kit_device::DeviceType;
    use kit_hal::{BusEvent, BusLog, ExtHeader, Hal, PhysicalInterface, SimDevice, SimulatedBus};
    use kit_protocol::{Interpreter, ProtocolConfig, Session};

    fn interpreter(devices: Vec<SimDevice>) -> (Interpreter, BusLog) {
        let bus = SimulatedBus::new(PhysicalInterface::I2c, devices);
        let log = bus.log();
        let mut interp = Interpreter::builder()
            .handler(KitBoard::new("KIT-SIM", vec![0x01, 0x02, 0x03], "kitd"))
            .hal(Hal::new().with_transport(PhysicalInterface::I2c, bus))
            .build()
            .unwrap();
        interp.discover();
        (interp, log)
    }

    fn device(address: u32, device_type: DeviceType) -> SimDevice {
        SimDevice {
            address,
            device_type,
            header: ExtHeader::None,
        }
    }

    #[test]
    fn test_version_and_firmware() {
        let (mut interp, _) = interpreter(vec![]);
        assert_eq!(
            interp.process(b"board:version()\n"),
            Bytes::from_static(b"KIT-SIM 00(010203)\n")
        );
        assert_eq!(interp.process(b"board:firmware()\n"), Bytes::from_static(b"kitd 00()\n"));
    }

    #[test]
    fn test_get_devices_lists_addresses() {
        let (mut interp, _) = interpreter(vec![
            device(0xC0, DeviceType::Ecc608b),
            device(0xB0, DeviceType::Ecc204),
        ]);
        assert_eq!(interp.process(b"board:get_devices()\n"), Bytes::from_static(b"00(C0B0)\n"));
    }

    #[test]
    fn test_get_devices_skips_wide_handles() {
        let (mut interp, _) = interpreter(vec![
            device(0x1C0, DeviceType::Ta100),
            device(0xC0, DeviceType::Ecc608b),
        ]);
        assert_eq!(interp.hal().device_count(), 2);
        assert_eq!(interp.process(b"board:get_devices()\n"), Bytes::from_static(b"00(C0)\n"));
    }

    #[test]
    fn test_get_device_reports_selected() {
        let (mut interp, _) = interpreter(vec![device(0xC0, DeviceType::Ecc608b)]);
        assert_eq!(
            interp.process(b"board(C0):device()\n"),
            Bytes::from_static(b"ATECC608B 00(00006003)\n")
        );

        let (mut interp, _) = interpreter(vec![]);
        assert_eq!(interp.process(b"board:device()\n"), Bytes::from_static(b"E3()\n"));
    }

    #[test]
    fn test_talk_info() {
        let (mut interp, log) = interpreter(vec![device(0xC0, DeviceType::Ecc608b)]);
        assert_eq!(
            interp.process(b"device(C0):talk(0730000000035D)\n"),
            Bytes::from_static(b"00(070000600383BB)\n")
        );
        assert!(log
            .events()
            .contains(&BusEvent::Send(0xC0, vec![0x07, 0x30, 0x00, 0x00, 0x00, 0x03, 0x5D])));
    }

    #[test]
    fn test_wake_reports_token() {
        let (mut interp, _) = interpreter(vec![device(0xC0, DeviceType::Ecc608b)]);
        assert_eq!(interp.process(b"device(C0):wake()\n"), Bytes::from_static(b"00(04113343)\n"));
    }

    #[test]
    fn test_idle_falls_back_to_sleep() {
        let (mut interp, log) = interpreter(vec![
            device(0xC0, DeviceType::Ecc608b),
            device(0x33, DeviceType::Ecc204),
        ]);

        interp.process(b"device(C0):idle()\n");
        assert_eq!(log.events().last(), Some(&BusEvent::Idle(0xC0)));

        interp.process(b"device(33):idle()\n");
        assert_eq!(log.events().last(), Some(&BusEvent::Sleep(0x33)));
    }

    #[test]
    fn test_device_command_without_selection() {
        // Discovery leaves the last scanned bus bound, handle 0 is absent
        let (mut interp, _) = interpreter(vec![device(0xC0, DeviceType::Ecc608b)]);
        assert_eq!(interp.process(b"device:sleep()\n"), Bytes::from_static(b"E7()\n"));
    }

    #[test]
    fn test_polling_toggle() {
        // No mnemonic decodes to polling, so call the handler directly
        let mut board = KitBoard::new("KIT-SIM", vec![], "kitd");
        let mut hal = Hal::new();
        let session = Session::new();
        let last_error = LastErrorSlot::new();
        let mut sink = NullSink;
        let config = ProtocolConfig::default();
        let mut ctx = HandlerContext {
            hal: &mut hal,
            session: &session,
            last_error: &last_error,
            diagnostics: &mut sink,
            config: &config,
        };

        assert_eq!(board.board_polling(&mut ctx, true), KitStatus::Success);
        assert!(board.polling());
        board.board_polling(&mut ctx, false);
        assert!(!board.polling());
    }

    #[test]
    fn test_memory_commands_unsupported() {
        let (mut interp, _) = interpreter(vec![]);
        assert_eq!(interp.process(b"device:mr(0000)\n"), Bytes::from_static(b"E1()\n"));
        assert_eq!(interp.process(b"board:application()\n"), Bytes::from_static(b"E1()\n"));
    }
}
