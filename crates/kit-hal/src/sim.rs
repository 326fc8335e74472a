//! Simulated device bus.
//!
//! [`SimulatedBus`] answers like a bus populated with CryptoAuth devices:
//! Info returns the device's revision bytes and every other command returns
//! a zero-filled response of the size the device would send, framed with a
//! count byte and CRC. Every call is recorded in a shared [`BusLog`].

use std::collections::HashMap;
use std::sync::Arc;

use kit_common::KitStatus;
use kit_device::{
    response_size_for_packet, revision_bytes, DeviceType, ATCA_INFO, ATCA_OPCODE_IDX,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::interface::{DeviceInfo, ExtHeader, PhysicalInterface};
use crate::transport::Transport;

/// Count byte plus two CRC bytes.
const FRAME_OVERHEAD: usize = 3;

/// A device attached to a simulated bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimDevice {
    pub address: u32,
    pub device_type: DeviceType,
    #[serde(default)]
    pub header: ExtHeader,
}

/// One recorded bus call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Init,
    Deinit,
    Discover,
    Wake(u32),
    Idle(u32),
    Sleep(u32),
    Send(u32, Vec<u8>),
    Receive(u32),
}

/// Shared view of the calls made on a [`SimulatedBus`].
#[derive(Debug, Clone, Default)]
pub struct BusLog {
    events: Arc<Mutex<Vec<BusEvent>>>,
}

impl BusLog {
    fn push(&self, event: BusEvent) {
        self.events.lock().push(event);
    }

    /// Snapshot of the recorded calls.
    pub fn events(&self) -> Vec<BusEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// In-memory [`Transport`] over a fixed device list.
#[derive(Debug)]
pub struct SimulatedBus {
    kind: PhysicalInterface,
    devices: Vec<SimDevice>,
    pending: HashMap<u32, Vec<u8>>,
    initialized: bool,
    log: BusLog,
}

impl SimulatedBus {
    pub fn new(kind: PhysicalInterface, devices: Vec<SimDevice>) -> Self {
        SimulatedBus {
            kind,
            devices,
            pending: HashMap::new(),
            initialized: false,
            log: BusLog::default(),
        }
    }

    /// Handle to this bus's call log.
    pub fn log(&self) -> BusLog {
        self.log.clone()
    }

    pub fn kind(&self) -> PhysicalInterface {
        self.kind
    }

    fn device(&self, handle: u32) -> Option<&SimDevice> {
        self.devices.iter().find(|d| d.address == handle)
    }

    /// Status for a power-state or transfer call on `handle`.
    fn check(&self, handle: u32) -> KitStatus {
        if !self.initialized {
            KitStatus::CommFail
        } else if self.device(handle).is_none() {
            KitStatus::RxNoResponse
        } else {
            KitStatus::Success
        }
    }

    fn respond(device: &SimDevice, packet: &[u8]) -> Vec<u8> {
        let size = response_size_for_packet(packet);
        let mut body = vec![0u8; size.saturating_sub(FRAME_OVERHEAD)];
        if packet.get(ATCA_OPCODE_IDX) == Some(&ATCA_INFO) {
            let info = revision_bytes(device.device_type).unwrap_or_default();
            body[..info.len()].copy_from_slice(&info);
        }

        let mut response = Vec::with_capacity(size);
        response.push(size as u8);
        response.extend_from_slice(&body);
        let crc = crc16(&response);
        response.extend_from_slice(&crc);
        response
    }
}

impl Transport for SimulatedBus {
    fn init(&mut self) -> KitStatus {
        self.log.push(BusEvent::Init);
        self.initialized = true;
        KitStatus::Success
    }

    fn deinit(&mut self) -> KitStatus {
        self.log.push(BusEvent::Deinit);
        self.initialized = false;
        self.pending.clear();
        KitStatus::Success
    }

    fn discover(&mut self, limit: usize) -> Vec<DeviceInfo> {
        self.log.push(BusEvent::Discover);
        self.devices
            .iter()
            .take(limit)
            .map(|d| DeviceInfo {
                address: d.address,
                interface: self.kind,
                device_type: d.device_type,
                header: d.header,
            })
            .collect()
    }

    fn wake(&mut self, handle: u32) -> KitStatus {
        self.log.push(BusEvent::Wake(handle));
        self.check(handle)
    }

    fn idle(&mut self, handle: u32) -> KitStatus {
        self.log.push(BusEvent::Idle(handle));
        self.check(handle)
    }

    fn sleep(&mut self, handle: u32) -> KitStatus {
        self.log.push(BusEvent::Sleep(handle));
        self.check(handle)
    }

    fn send(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        self.log.push(BusEvent::Send(handle, data.clone()));
        let status = self.check(handle);
        if !status.is_success() {
            return status;
        }
        let Some(device) = self.device(handle) else {
            return KitStatus::RxNoResponse;
        };

        let response = SimulatedBus::respond(device, data);
        self.pending.insert(handle, response);
        data.clear();
        KitStatus::Success
    }

    fn receive(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        self.log.push(BusEvent::Receive(handle));
        let status = self.check(handle);
        if !status.is_success() {
            return status;
        }
        match self.pending.remove(&handle) {
            Some(response) => {
                *data = response;
                KitStatus::Success
            }
            None => KitStatus::RxNoResponse,
        }
    }
}

/// CRC-16 used by CryptoAuth devices: polynomial 0x8005, bits fed LSB
/// first, result little-endian.
pub fn crc16(data: &[u8]) -> [u8; 2] {
    let mut crc: u16 = 0;
    for &byte in data {
        for bit in 0..8 {
            let data_bit = (byte >> bit) & 0x01 != 0;
            let crc_bit = crc >> 15 != 0;
            crc <<= 1;
            if data_bit != crc_bit {
                crc ^= 0x8005;
            }
        }
    }
    crc.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_device::{classify_from_info_bytes, ATCA_RANDOM, ATCA_READ};

    fn bus() -> SimulatedBus {
        let mut bus = SimulatedBus::new(
            PhysicalInterface::I2c,
            vec![SimDevice {
                address: 0xC0,
                device_type: DeviceType::Ecc608b,
                header: ExtHeader::None,
            }],
        );
        bus.init();
        bus
    }

    #[test]
    fn test_crc16_known_vector() {
        // Info command: count, opcode, param1, param2
        assert_eq!(crc16(&[0x07, 0x30, 0x00, 0x00, 0x00]), [0x03, 0x5D]);
        assert_eq!(crc16(&[]), [0x00, 0x00]);
    }

    #[test]
    fn test_info_reports_revision() {
        let mut bus = bus();
        let mut data = vec![0x07, ATCA_INFO, 0x00, 0x00, 0x00];
        assert_eq!(bus.talk(0xC0, &mut data), KitStatus::Success);
        assert_eq!(data.len(), 7);
        assert_eq!(data[0], 7);

        let info = [data[1], data[2], data[3], data[4]];
        assert_eq!(classify_from_info_bytes(info), DeviceType::Ecc608b);
        assert_eq!(crc16(&data[..5]), [data[5], data[6]]);
    }

    #[test]
    fn test_response_sized_by_opcode() {
        let mut bus = bus();
        let mut data = vec![0x07, ATCA_RANDOM, 0x00, 0x00, 0x00];
        assert_eq!(bus.talk(0xC0, &mut data), KitStatus::Success);
        assert_eq!(data.len(), 35);

        let mut data = vec![0x07, ATCA_READ, 0x00, 0x00, 0x00];
        assert_eq!(bus.talk(0xC0, &mut data), KitStatus::Success);
        assert_eq!(data.len(), 7);
    }

    #[test]
    fn test_unknown_handle_and_uninitialized() {
        let mut bus = bus();
        assert_eq!(bus.wake(0x10), KitStatus::RxNoResponse);

        let mut data = Vec::new();
        assert_eq!(bus.receive(0xC0, &mut data), KitStatus::RxNoResponse);

        bus.deinit();
        assert_eq!(bus.wake(0xC0), KitStatus::CommFail);
    }

    #[test]
    fn test_log_records_calls() {
        let mut bus = bus();
        let log = bus.log();
        bus.sleep(0xC0);
        assert_eq!(log.events(), vec![BusEvent::Init, BusEvent::Sleep(0xC0)]);
        log.clear();
        assert!(log.events().is_empty());
    }
}
